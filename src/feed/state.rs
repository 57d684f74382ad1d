//! In-memory feed state and the pure filtering/pagination rules

use std::ops::Range;

use crate::content::PostRecord;

/// Filter key that matches every category
pub const ALL: &str = "all";

/// Whether a post matches a lowercase search query.
///
/// Title, excerpt and tags are searched case-insensitively; an empty query
/// matches everything.
pub fn matches_query(post: &PostRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    post.title.to_lowercase().contains(query)
        || post.excerpt.to_lowercase().contains(query)
        || post.tags.iter().any(|t| t.to_lowercase().contains(query))
}

/// Whether a post belongs to the selected category
pub fn matches_category(post: &PostRecord, filter: &str) -> bool {
    filter == ALL || post.category.as_deref() == Some(filter)
}

/// Indices of the posts passing both predicates, in manifest order
pub fn filter_indices(posts: &[PostRecord], query: &str, filter: &str) -> Vec<usize> {
    let query = query.to_lowercase();
    posts
        .iter()
        .enumerate()
        .filter(|(_, post)| matches_query(post, &query) && matches_category(post, filter))
        .map(|(i, _)| i)
        .collect()
}

/// Slice bounds of a 1-based page, clamped to `len`
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// The renderer's view of the manifest
#[derive(Debug, Clone)]
pub struct FeedState {
    all_posts: Vec<PostRecord>,
    /// Indices into `all_posts`
    filtered: Vec<usize>,
    current_page: usize,
    current_filter: String,
    query: String,
    page_size: usize,
}

impl FeedState {
    pub fn new(page_size: usize) -> Self {
        Self {
            all_posts: Vec::new(),
            filtered: Vec::new(),
            current_page: 1,
            current_filter: ALL.to_string(),
            query: String::new(),
            page_size: page_size.max(1),
        }
    }

    /// Replace the post list with a freshly fetched manifest.
    ///
    /// Order is kept as received.
    pub fn load(&mut self, posts: Vec<PostRecord>) {
        self.all_posts = posts;
        self.filtered = (0..self.all_posts.len()).collect();
        self.current_page = 1;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.apply_filters();
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.current_filter = filter.to_string();
        self.apply_filters();
    }

    /// Recompute the filtered list and go back to the first page
    pub fn apply_filters(&mut self) {
        self.filtered = filter_indices(&self.all_posts, &self.query, &self.current_filter);
        self.current_page = 1;
    }

    /// Move to the next page if any filtered posts remain beyond it
    pub fn advance_page(&mut self) -> bool {
        if self.has_more() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn has_more(&self) -> bool {
        self.filtered.len() > self.current_page * self.page_size
    }

    /// Posts on the current page
    pub fn page_posts(&self) -> Vec<&PostRecord> {
        self.page(self.current_page)
    }

    /// Posts on a given 1-based page of the filtered list
    pub fn page(&self, page: usize) -> Vec<&PostRecord> {
        let range = page_range(self.filtered.len(), page, self.page_size);
        self.filtered[range]
            .iter()
            .map(|&i| &self.all_posts[i])
            .collect()
    }

    /// Number of filtered posts shown so far
    pub fn visible_count(&self) -> usize {
        (self.current_page * self.page_size).min(self.filtered.len())
    }

    /// Look a post up by exact id
    pub fn find(&self, id: &str) -> Option<&PostRecord> {
        self.all_posts.iter().find(|p| p.id == id)
    }

    pub fn all_posts(&self) -> &[PostRecord] {
        &self.all_posts
    }

    pub fn filtered_posts(&self) -> impl Iterator<Item = &PostRecord> + '_ {
        self.filtered.iter().map(move |&i| &self.all_posts[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn current_filter(&self) -> &str {
        &self.current_filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
