//! Date parsing and manifest ordering

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::PostRecord;

/// Parse a date string in the formats accepted in metadata blocks
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // Dates with an explicit offset are compared in UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }

    None
}

/// Sort posts newest first.
///
/// Posts whose date does not parse go after every dated post and keep
/// their relative order.
pub fn sort_manifest(posts: &mut [PostRecord]) {
    posts.sort_by_cached_key(|post| {
        let date = parse_date(&post.date);
        (date.is_none(), std::cmp::Reverse(date))
    });
}
