//! Metadata block extraction
//!
//! Posts carry their feed metadata inside an HTML comment:
//!
//! ```text
//! <!-- blog-meta: { "title": "...", "excerpt": "...", "date": "2024-01-15" } -->
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

lazy_static! {
    static ref META_BLOCK: Regex =
        Regex::new(r"(?s)<!--\s*blog-meta:\s*(\{.*?\})\s*-->").expect("valid metadata regex");
}

/// Errors raised while reading a metadata block
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("no blog-meta block found")]
    Missing,

    #[error("invalid blog-meta payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Extract and parse the first metadata block of a document
pub fn extract_meta(content: &str) -> Result<Map<String, Value>, MetaError> {
    let captures = META_BLOCK.captures(content).ok_or(MetaError::Missing)?;
    let payload = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let meta: Map<String, Value> = serde_json::from_str(payload)?;
    Ok(meta)
}
