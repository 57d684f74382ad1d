//! Presentation seam between the controller and the page

/// Which page anchors are present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub grid: bool,
    pub search: bool,
    pub chips: bool,
    pub overlay: bool,
    pub overlay_close: bool,
}

impl Anchors {
    pub fn all() -> Self {
        Self {
            grid: true,
            search: true,
            chips: true,
            overlay: true,
            overlay_close: true,
        }
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Self::all()
    }
}

/// Display operations the feed needs from its host page
pub trait FeedView {
    fn anchors(&self) -> Anchors;

    /// Replace the grid contents
    fn replace_grid(&mut self, html: String);

    /// Append cards after the current grid contents
    fn append_to_grid(&mut self, html: String);

    /// Finish the entrance transition of freshly rendered cards
    fn reveal_new_cards(&mut self);

    fn set_active_chip(&mut self, key: &str);

    fn show_overlay(&mut self, html: String);

    fn hide_overlay(&mut self);

    fn lock_background_scroll(&mut self, locked: bool);
}

/// Headless view that keeps the generated markup in memory
#[derive(Debug, Clone, Default)]
pub struct HtmlView {
    pub anchors: Anchors,
    /// Grid contents, one entry per rendered fragment
    pub grid: Vec<String>,
    pub overlay: Option<String>,
    pub overlay_visible: bool,
    pub active_chip: Option<String>,
    pub scroll_locked: bool,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchors(anchors: Anchors) -> Self {
        Self {
            anchors,
            ..Default::default()
        }
    }

    pub fn grid_html(&self) -> String {
        self.grid.concat()
    }
}

impl FeedView for HtmlView {
    fn anchors(&self) -> Anchors {
        self.anchors
    }

    fn replace_grid(&mut self, html: String) {
        self.grid = vec![html];
    }

    fn append_to_grid(&mut self, html: String) {
        self.grid.push(html);
    }

    fn reveal_new_cards(&mut self) {
        for fragment in &mut self.grid {
            if fragment.contains("post-card new") {
                *fragment = fragment.replace("post-card new", "post-card reveal");
            }
        }
    }

    fn set_active_chip(&mut self, key: &str) {
        self.active_chip = Some(key.to_string());
    }

    fn show_overlay(&mut self, html: String) {
        self.overlay = Some(html);
        self.overlay_visible = true;
    }

    fn hide_overlay(&mut self) {
        self.overlay_visible = false;
    }

    fn lock_background_scroll(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}
