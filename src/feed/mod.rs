//! Feed renderer
//!
//! The renderer is split into a pure state layer ([`FeedState`]), a
//! controller that owns the page-load lifecycle ([`FeedController`]), and a
//! presentation seam ([`FeedView`]) that turns computed state into markup.

mod controller;
mod format;
mod origin;
pub mod render;
mod source;
mod state;
mod view;

pub use controller::{CardPart, FeedController, FeedEvent, Phase, ScrollMetrics};
pub use format::display_date;
pub use origin::PageOrigin;
pub use source::{FetchError, HttpSource, ManifestSource};
pub use state::{filter_indices, matches_category, matches_query, page_range, FeedState, ALL};
pub use view::{Anchors, FeedView, HtmlView};
