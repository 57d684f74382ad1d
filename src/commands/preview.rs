//! Render the feed headlessly against a served site

use anyhow::Result;
use std::time::Duration;

use crate::feed::{FeedController, FeedEvent, HtmlView, HttpSource, PageOrigin, Phase, ScrollMetrics};
use crate::Site;

/// What to do with the feed once it has loaded
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// URL of the page hosting the feed
    pub origin: String,
    pub query: Option<String>,
    pub category: Option<String>,
    /// Number of pages to load, counting the first one
    pub pages: usize,
}

/// Load the feed like a browser would and return the grid markup
pub async fn run(site: &Site, options: &PreviewOptions) -> Result<String> {
    let origin = PageOrigin::parse(&options.origin)?;
    let source = HttpSource::new();
    let mut feed = FeedController::new(site.config.feed.clone(), HtmlView::new());

    feed.start(&origin, &source).await;
    if feed.phase() != &Phase::Ready {
        tracing::warn!("Feed did not load: {:?}", feed.phase());
        return Ok(feed.view().grid_html());
    }

    if let Some(query) = &options.query {
        feed.handle(FeedEvent::SearchInput(query.clone()));
    }
    if let Some(category) = &options.category {
        feed.handle(FeedEvent::ChipClick(category.clone()));
    }
    for _ in 1..options.pages {
        feed.handle(FeedEvent::Scroll(ScrollMetrics {
            viewport_height: 0.0,
            scroll_y: 0.0,
            document_height: 0.0,
        }));
    }

    if feed.reveal_pending() {
        tokio::time::sleep(Duration::from_millis(site.config.feed.entrance_delay_ms)).await;
        feed.handle(FeedEvent::RevealTick);
    }

    tracing::info!(
        "Showing {} of {} posts",
        feed.state().visible_count(),
        feed.state().filtered_len()
    );

    Ok(feed.into_view().grid_html())
}
