//! CLI command implementations

pub mod clean;
pub mod index;
pub mod list;
pub mod preview;
