//! Content module - post records, metadata blocks and manifest ordering

mod date;
mod meta;
mod post;

pub use date::{parse_date, sort_manifest};
pub use meta::{extract_meta, MetaError};
pub use post::PostRecord;
