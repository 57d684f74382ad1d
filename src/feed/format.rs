//! Date display

use chrono::{DateTime, Locale, Utc};

use crate::content::parse_date;

/// Format a manifest date in long form for the given locale.
///
/// Values that do not parse are shown as written.
pub fn display_date(raw: &str, locale: &str) -> String {
    let Some(date) = parse_date(raw) else {
        return raw.to_string();
    };

    let (locale, name) = match Locale::try_from(locale) {
        Ok(parsed) => (parsed, locale),
        Err(_) => (Locale::POSIX, "POSIX"),
    };

    DateTime::<Utc>::from_naive_utc_and_offset(date, Utc)
        .format_localized(long_format(name), locale)
        .to_string()
}

/// Day, month name and year in the locale's usual order
fn long_format(name: &str) -> &'static str {
    if name.starts_with("es_") || name.starts_with("pt_") {
        "%-d de %B de %Y"
    } else if name.starts_with("en_") || name == "POSIX" {
        "%B %-d, %Y"
    } else {
        "%-d %B %Y"
    }
}
