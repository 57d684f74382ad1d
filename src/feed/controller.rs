//! Feed controller: page-load lifecycle and event handlers

use url::Url;

use super::origin::PageOrigin;
use super::render::{cards_html, empty_html, message_html, overlay_html};
use super::source::{FetchError, ManifestSource};
use super::state::FeedState;
use super::view::{Anchors, FeedView};
use crate::config::FeedConfig;
use crate::content::PostRecord;

/// Where a page load currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    /// Page opened without a server; nothing is fetched
    Unavailable,
    Loading,
    /// Manifest loaded; the feed reacts to events
    Ready,
    /// Manifest could not be loaded, with the reason shown to the reader
    Error(String),
}

/// Scroll position reported by the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub scroll_y: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.viewport_height + self.scroll_y >= self.document_height - threshold
    }
}

/// Part of a card that received a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPart {
    Thumbnail,
    Title,
    PreviewButton,
    Other,
}

impl CardPart {
    fn opens_preview(self) -> bool {
        !matches!(self, CardPart::Other)
    }
}

/// Events the host page forwards to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Search field changed; carries the field's current value
    SearchInput(String),
    /// A filter chip was clicked; carries its filter key
    ChipClick(String),
    Scroll(ScrollMetrics),
    CardClick { id: String, part: CardPart },
    /// Click anywhere in the window; `on_backdrop` when outside the overlay panel
    WindowClick { on_backdrop: bool },
    CloseClick,
    /// Deferred pass after a render, once the entrance delay has elapsed
    RevealTick,
}

impl FeedEvent {
    /// Name the host registers the handler under
    pub fn name(&self) -> &'static str {
        match self {
            FeedEvent::SearchInput(_) => "input",
            FeedEvent::ChipClick(_) => "chip-click",
            FeedEvent::Scroll(_) => "scroll",
            FeedEvent::CardClick { .. } => "card-click",
            FeedEvent::WindowClick { .. } => "window-click",
            FeedEvent::CloseClick => "close-click",
            FeedEvent::RevealTick => "reveal",
        }
    }
}

/// Owns the feed state for one page load and keeps the view in sync with it
pub struct FeedController<V: FeedView> {
    config: FeedConfig,
    state: FeedState,
    view: V,
    phase: Phase,
    anchors: Anchors,
    open_post: Option<String>,
    reveal_pending: bool,
}

impl<V: FeedView> FeedController<V> {
    pub fn new(config: FeedConfig, view: V) -> Self {
        let state = FeedState::new(config.page_size);
        let anchors = view.anchors();
        Self {
            config,
            state,
            view,
            phase: Phase::Uninitialized,
            anchors,
            open_post: None,
            reveal_pending: false,
        }
    }

    /// Run a page load: check the origin, fetch the manifest once and render
    /// the first page.
    pub async fn start<S: ManifestSource>(&mut self, origin: &PageOrigin, source: &S) -> &Phase {
        if let Some(url) = self.prepare(origin) {
            let result = source.fetch_manifest(&url).await;
            self.finish_loading(result);
        }
        &self.phase
    }

    /// Locate anchors and check the origin.
    ///
    /// Returns the manifest URL when a fetch should be issued, moving to
    /// [`Phase::Loading`].
    pub fn prepare(&mut self, origin: &PageOrigin) -> Option<Url> {
        if self.phase != Phase::Uninitialized {
            tracing::warn!("Feed already started ({:?})", self.phase);
            return None;
        }

        self.anchors = self.view.anchors();
        if !self.anchors.grid {
            tracing::warn!("Feed grid not found, nothing will be displayed");
        }
        if !self.anchors.overlay {
            tracing::warn!("Preview overlay not found, previews are disabled");
        }

        if !origin.is_served() {
            tracing::warn!("Page loaded from {}, manifest cannot be fetched", origin.url());
            self.phase = Phase::Unavailable;
            let messages = self.config.messages.clone();
            self.show_message(&messages.unavailable, Some(&messages.unavailable_hint));
            return None;
        }

        match origin.manifest_url(&self.config.manifest_path) {
            Ok(url) => {
                self.phase = Phase::Loading;
                Some(url)
            }
            Err(e) => {
                self.fail(e.to_string());
                None
            }
        }
    }

    /// Apply the outcome of the manifest fetch
    pub fn finish_loading(&mut self, result: Result<Vec<PostRecord>, FetchError>) {
        if self.phase != Phase::Loading {
            tracing::warn!("Manifest arrived while {:?}, ignoring", self.phase);
            return;
        }

        match result {
            Ok(posts) => {
                tracing::info!("Loaded {} posts", posts.len());
                self.state.load(posts);
                self.phase = Phase::Ready;
                self.render_feed(false);
            }
            Err(e) => {
                tracing::error!("Error loading posts: {}", e);
                self.fail(e.to_string());
            }
        }
    }

    /// Dispatch a page event. Ignored unless the feed is ready.
    pub fn handle(&mut self, event: FeedEvent) {
        if self.phase != Phase::Ready {
            tracing::debug!("Ignoring {} event while {:?}", event.name(), self.phase);
            return;
        }

        match event {
            FeedEvent::SearchInput(query) => self.search(&query),
            FeedEvent::ChipClick(key) => self.select_category(&key),
            FeedEvent::Scroll(metrics) => self.scroll(metrics),
            FeedEvent::CardClick { id, part } => {
                if part.opens_preview() {
                    self.open_preview(&id);
                }
            }
            FeedEvent::WindowClick { on_backdrop } => {
                if on_backdrop {
                    self.close_preview();
                }
            }
            FeedEvent::CloseClick => {
                if self.anchors.overlay_close {
                    self.close_preview();
                }
            }
            FeedEvent::RevealTick => self.reveal(),
        }
    }

    pub fn search(&mut self, query: &str) {
        if !self.anchors.search {
            return;
        }
        self.state.set_query(query);
        self.render_feed(false);
    }

    /// Make `key` the only active chip and refilter
    pub fn select_category(&mut self, key: &str) {
        if self.anchors.chips {
            self.view.set_active_chip(key);
        }
        self.state.set_filter(key);
        self.render_feed(false);
    }

    /// Append the next page once the reader nears the bottom
    pub fn scroll(&mut self, metrics: ScrollMetrics) {
        if metrics.near_bottom(self.config.scroll_threshold) && self.state.advance_page() {
            tracing::debug!("Loading page {}", self.state.current_page());
            self.render_feed(true);
        }
    }

    pub fn open_preview(&mut self, id: &str) {
        let Some(post) = self.state.find(id) else {
            tracing::debug!("No post with id {}", id);
            return;
        };
        if !self.anchors.overlay {
            return;
        }

        let html = overlay_html(post, &self.config);
        self.view.show_overlay(html);
        self.view.lock_background_scroll(true);
        self.open_post = Some(id.to_string());
    }

    pub fn close_preview(&mut self) {
        if self.open_post.take().is_some() {
            self.view.hide_overlay();
            self.view.lock_background_scroll(false);
        }
    }

    fn reveal(&mut self) {
        if self.reveal_pending {
            self.view.reveal_new_cards();
            self.reveal_pending = false;
        }
    }

    /// Render the current page, replacing the grid or appending to it
    fn render_feed(&mut self, append: bool) {
        if !self.anchors.grid {
            return;
        }

        let page = self.state.page_posts();
        if page.is_empty() {
            if !append {
                self.view
                    .replace_grid(empty_html(&self.config.messages.no_results));
            }
            return;
        }

        let html = cards_html(&page, &self.config);
        if append {
            self.view.append_to_grid(html);
        } else {
            self.view.replace_grid(html);
        }
        self.reveal_pending = true;
    }

    fn fail(&mut self, reason: String) {
        let messages = self.config.messages.clone();
        let hint = messages
            .fetch_failed_hint
            .replace("{reason}", &reason)
            .replace("{manifest}", &self.config.manifest_path);
        self.phase = Phase::Error(reason);
        self.show_message(&messages.fetch_failed, Some(&hint));
    }

    fn show_message(&mut self, message: &str, detail: Option<&str>) {
        if !self.anchors.grid {
            return;
        }
        let html = message_html(&self.config.messages.error_title, message, detail);
        self.view.replace_grid(html);
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Id of the post shown in the overlay
    pub fn open_post(&self) -> Option<&str> {
        self.open_post.as_deref()
    }

    /// Whether rendered cards are waiting for [`FeedEvent::RevealTick`]
    pub fn reveal_pending(&self) -> bool {
        self.reveal_pending
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::HtmlView;
    use indexmap::IndexMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Canned {
        Posts(Vec<PostRecord>),
        Status(u16),
    }

    struct FakeSource {
        canned: Canned,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn posts(posts: Vec<PostRecord>) -> Self {
            Self {
                canned: Canned::Posts(posts),
                calls: AtomicUsize::new(0),
            }
        }

        fn status(code: u16) -> Self {
            Self {
                canned: Canned::Status(code),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ManifestSource for FakeSource {
        async fn fetch_manifest(&self, url: &Url) -> Result<Vec<PostRecord>, FetchError> {
            assert!(url.as_str().ends_with("/posts.json"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.canned {
                Canned::Posts(posts) => Ok(posts.clone()),
                Canned::Status(code) => Err(FetchError::Status(*code)),
            }
        }
    }

    fn post(id: &str, title: &str, category: &str, date: &str) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            url: format!("entradas-blog/{}.html", id),
            title: title.to_string(),
            excerpt: format!("Resumen {}", id),
            date: date.to_string(),
            category: Some(category.to_string()),
            author: None,
            image: None,
            tags: Vec::new(),
            extra: IndexMap::new(),
        }
    }

    fn many(n: usize) -> Vec<PostRecord> {
        (0..n)
            .map(|i| {
                let category = if i % 2 == 0 { "tutorial" } else { "noticias" };
                post(&format!("p{}", i), &format!("Entrada {}", i), category, "2024-01-01")
            })
            .collect()
    }

    fn served() -> PageOrigin {
        PageOrigin::parse("http://localhost:4000/BLOG/index.html").unwrap()
    }

    async fn ready(posts: Vec<PostRecord>) -> FeedController<HtmlView> {
        let mut feed = FeedController::new(FeedConfig::default(), HtmlView::new());
        feed.start(&served(), &FakeSource::posts(posts)).await;
        assert_eq!(feed.phase(), &Phase::Ready);
        feed
    }

    fn bottom() -> ScrollMetrics {
        ScrollMetrics {
            viewport_height: 900.0,
            scroll_y: 2000.0,
            document_height: 3500.0,
        }
    }

    fn card_count(view: &HtmlView) -> usize {
        view.grid_html().matches("<article").count()
    }

    #[tokio::test]
    async fn test_file_origin_is_unavailable() {
        let source = FakeSource::posts(many(3));
        let origin = PageOrigin::parse("file:///home/ana/BLOG/index.html").unwrap();
        let mut feed = FeedController::new(FeedConfig::default(), HtmlView::new());

        feed.start(&origin, &source).await;

        assert_eq!(feed.phase(), &Phase::Unavailable);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(feed.view().grid_html().contains("file://"));
    }

    #[tokio::test]
    async fn test_http_404_shows_error() {
        let source = FakeSource::status(404);
        let mut feed = FeedController::new(FeedConfig::default(), HtmlView::new());

        feed.start(&served(), &source).await;

        assert!(matches!(feed.phase(), Phase::Error(reason) if reason.contains("404")));
        assert!(feed.view().grid_html().contains("404"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        feed.handle(FeedEvent::SearchInput("x".to_string()));
        assert!(feed.view().grid_html().contains("404"));
        assert_eq!(card_count(feed.view()), 0);
    }

    #[tokio::test]
    async fn test_error_without_grid_is_silent() {
        let anchors = Anchors {
            grid: false,
            ..Anchors::all()
        };
        let mut feed = FeedController::new(FeedConfig::default(), HtmlView::with_anchors(anchors));

        feed.start(&served(), &FakeSource::status(500)).await;

        assert!(matches!(feed.phase(), Phase::Error(_)));
        assert!(feed.view().grid.is_empty());
    }

    #[tokio::test]
    async fn test_start_only_once() {
        let source = FakeSource::posts(many(2));
        let mut feed = FeedController::new(FeedConfig::default(), HtmlView::new());
        feed.start(&served(), &source).await;
        feed.start(&served(), &source).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_first_page_and_reveal() {
        let mut feed = ready(many(8)).await;

        assert_eq!(card_count(feed.view()), 6);
        assert!(feed.reveal_pending());
        assert!(feed.view().grid_html().contains("post-card new"));

        feed.handle(FeedEvent::RevealTick);
        assert!(!feed.reveal_pending());
        assert!(!feed.view().grid_html().contains("post-card new"));
        assert!(feed.view().grid_html().contains("post-card reveal"));
    }

    #[tokio::test]
    async fn test_manifest_order_is_trusted() {
        let feed = ready(vec![
            post("a", "A", "tutorial", "2024-01-01"),
            post("b", "B", "tutorial", "2024-06-01"),
        ])
        .await;

        assert_eq!(feed.state().all_posts()[0].id, "a");
        let html = feed.view().grid_html();
        let a = html.find(r#"data-id="a""#).unwrap();
        let b = html.find(r#"data-id="b""#).unwrap();
        assert!(a < b);
    }

    #[tokio::test]
    async fn test_search_react() {
        let mut feed = ready(vec![
            post("a", "Aprende React hoy", "tutorial", "2024-01-01"),
            post("b", "Rust y WebAssembly", "tutorial", "2024-01-02"),
            post("c", "Noticias de CSS", "noticias", "2024-01-03"),
        ])
        .await;

        feed.handle(FeedEvent::SearchInput("react".to_string()));

        let ids: Vec<_> = feed.state().filtered_posts().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
        assert_eq!(card_count(feed.view()), 1);
    }

    #[tokio::test]
    async fn test_category_resets_page() {
        let mut feed = ready(many(20)).await;
        feed.handle(FeedEvent::Scroll(bottom()));
        assert_eq!(feed.state().current_page(), 2);

        feed.handle(FeedEvent::ChipClick("tutorial".to_string()));

        assert_eq!(feed.state().current_page(), 1);
        assert_eq!(feed.state().current_filter(), "tutorial");
        assert_eq!(feed.view().active_chip.as_deref(), Some("tutorial"));
        assert_eq!(feed.view().grid.len(), 1);
        assert_eq!(card_count(feed.view()), 6);
        assert!(feed.view().grid_html().starts_with(r#"<article class="post-card new" data-id="p0""#));
    }

    #[tokio::test]
    async fn test_infinite_scroll_appends() {
        let mut feed = ready(many(14)).await;

        let far = ScrollMetrics {
            viewport_height: 900.0,
            scroll_y: 0.0,
            document_height: 3500.0,
        };
        feed.handle(FeedEvent::Scroll(far));
        assert_eq!(feed.state().current_page(), 1);

        feed.handle(FeedEvent::Scroll(bottom()));
        feed.handle(FeedEvent::Scroll(bottom()));
        assert_eq!(feed.state().current_page(), 3);
        assert_eq!(feed.view().grid.len(), 3);
        assert_eq!(card_count(feed.view()), 14);

        feed.handle(FeedEvent::Scroll(bottom()));
        assert_eq!(feed.state().current_page(), 3);
        assert_eq!(card_count(feed.view()), 14);

        let html = feed.view().grid_html();
        for i in 0..14 {
            assert_eq!(html.matches(&format!(r#"data-id="p{}""#, i)).count(), 1);
        }
    }

    #[tokio::test]
    async fn test_no_results_placeholder() {
        let mut feed = ready(many(3)).await;
        feed.handle(FeedEvent::SearchInput("nada que ver".to_string()));

        assert_eq!(card_count(feed.view()), 0);
        assert!(feed
            .view()
            .grid_html()
            .contains(&feed.config().messages.no_results));
    }

    #[tokio::test]
    async fn test_preview_overlay() {
        let mut feed = ready(many(3)).await;

        feed.handle(FeedEvent::CardClick {
            id: "p1".to_string(),
            part: CardPart::Other,
        });
        assert_eq!(feed.open_post(), None);

        feed.handle(FeedEvent::CardClick {
            id: "p1".to_string(),
            part: CardPart::Title,
        });
        assert_eq!(feed.open_post(), Some("p1"));
        assert!(feed.view().overlay_visible);
        assert!(feed.view().scroll_locked);
        assert!(feed.view().overlay.as_deref().unwrap().contains("Entrada 1"));

        feed.handle(FeedEvent::WindowClick { on_backdrop: false });
        assert!(feed.view().overlay_visible);

        feed.handle(FeedEvent::WindowClick { on_backdrop: true });
        assert!(!feed.view().overlay_visible);
        assert!(!feed.view().scroll_locked);

        feed.handle(FeedEvent::CardClick {
            id: "p2".to_string(),
            part: CardPart::PreviewButton,
        });
        feed.handle(FeedEvent::CloseClick);
        assert_eq!(feed.open_post(), None);
        assert!(!feed.view().scroll_locked);
    }

    #[tokio::test]
    async fn test_preview_unknown_id() {
        let mut feed = ready(many(2)).await;
        feed.handle(FeedEvent::CardClick {
            id: "missing".to_string(),
            part: CardPart::Thumbnail,
        });
        assert_eq!(feed.open_post(), None);
        assert!(feed.view().overlay.is_none());
    }

    #[tokio::test]
    async fn test_missing_search_and_close_anchors() {
        let anchors = Anchors {
            search: false,
            overlay_close: false,
            ..Anchors::all()
        };
        let mut feed = FeedController::new(FeedConfig::default(), HtmlView::with_anchors(anchors));
        feed.start(&served(), &FakeSource::posts(many(3))).await;

        feed.handle(FeedEvent::SearchInput("entrada 1".to_string()));
        assert_eq!(feed.state().query(), "");
        assert_eq!(feed.state().filtered_len(), 3);

        feed.handle(FeedEvent::CardClick {
            id: "p0".to_string(),
            part: CardPart::Thumbnail,
        });
        feed.handle(FeedEvent::CloseClick);
        assert_eq!(feed.open_post(), Some("p0"));

        feed.handle(FeedEvent::WindowClick { on_backdrop: true });
        assert_eq!(feed.open_post(), None);

        let view = feed.into_view();
        assert!(!view.overlay_visible);
        assert!(!view.scroll_locked);
    }

    #[test]
    fn test_drive_without_runtime() {
        let mut feed = FeedController::new(FeedConfig::default(), HtmlView::new());
        let url = feed.prepare(&served()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/BLOG/posts.json");
        assert_eq!(feed.phase(), &Phase::Loading);

        feed.finish_loading(Ok(many(4)));
        assert_eq!(feed.phase(), &Phase::Ready);
        assert_eq!(card_count(feed.view()), 4);
    }
}
