use threadscope_core::{filter, Comment, ContentItem, FilterConfig, ViewState};
use tracing::{debug, warn};

/// The current posts, the comments of one post, and which of the two is shown.
#[derive(Debug, Default)]
pub struct ResultSet {
    posts: Vec<ContentItem>,
    comments: Vec<Comment>,
    comments_for: Option<String>,
    view: ViewState,
    available_sources: Vec<String>,
    selected_sources: Vec<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the posts. Comments belonged to the old context, so they go too.
    pub fn set_posts(&mut self, posts: Vec<ContentItem>) {
        debug!("Result set replaced with {} posts", posts.len());
        self.posts = posts;
        self.comments.clear();
        self.comments_for = None;
        self.view = ViewState::Posts;
    }

    pub fn clear_posts(&mut self) {
        self.set_posts(Vec::new());
    }

    pub fn set_comments(&mut self, comments: Vec<Comment>, permalink: &str) {
        debug!("Loaded {} comments for {}", comments.len(), permalink);
        self.comments = comments;
        self.comments_for = Some(permalink.to_string());
        self.view = ViewState::Comments;
    }

    /// Switching views never clears either collection.
    pub fn set_view(&mut self, view: ViewState) {
        self.view = view;
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn posts(&self) -> &[ContentItem] {
        &self.posts
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Permalink of the post whose comments are loaded.
    pub fn comments_for(&self) -> Option<&str> {
        self.comments_for.as_deref()
    }

    /// New subreddit choices from an unscoped search. Clears the selection.
    pub fn replace_sources(&mut self, sources: Vec<String>) {
        self.available_sources = sources;
        self.selected_sources.clear();
    }

    pub fn available_sources(&self) -> &[String] {
        &self.available_sources
    }

    pub fn selected_sources(&self) -> &[String] {
        &self.selected_sources
    }

    /// Adds or removes a subreddit from the selection. Returns whether it is
    /// selected afterwards; unknown subreddits are never selected.
    pub fn toggle_source(&mut self, source: &str) -> bool {
        let source = source.trim();
        if let Some(pos) = self.selected_sources.iter().position(|s| s == source) {
            self.selected_sources.remove(pos);
            return false;
        }
        if !self.available_sources.iter().any(|s| s == source) {
            warn!("Ignoring selection of unknown subreddit '{}'", source);
            return false;
        }
        self.selected_sources.push(source.to_string());
        true
    }

    pub fn reset_sources(&mut self) {
        self.selected_sources.clear();
    }

    /// Posts passing the filter, in their original order.
    pub fn visible_posts(
        &self,
        filter_config: &FilterConfig,
        selected_sources: &[String],
    ) -> Vec<&ContentItem> {
        self.visible_posts_at(filter_config, selected_sources, filter::now_utc())
    }

    pub fn visible_posts_at(
        &self,
        filter_config: &FilterConfig,
        selected_sources: &[String],
        now: f64,
    ) -> Vec<&ContentItem> {
        self.posts
            .iter()
            .filter(|post| filter::passes_at(post, filter_config, selected_sources, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadscope_core::FilterField;

    const NOW: f64 = 1_700_000_000.0;

    fn post(id: &str, subreddit: &str, score: i64) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: format!("Post {id}"),
            subreddit: subreddit.to_string(),
            score,
            num_comments: 0,
            created_utc: NOW - 3600.0,
            permalink: format!("/r/{subreddit}/comments/{id}/"),
            url: None,
        }
    }

    fn comment(id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            author: "someone".to_string(),
            score: 1,
            body: "hello".to_string(),
            created_utc: None,
        }
    }

    #[test]
    fn test_set_posts_resets_comments_and_view() {
        let mut results = ResultSet::new();
        results.set_comments(vec![comment("c1")], "/r/a/comments/x/");
        assert_eq!(results.view(), ViewState::Comments);

        results.set_posts(vec![post("p1", "a", 1)]);
        assert!(results.comments().is_empty());
        assert_eq!(results.comments_for(), None);
        assert_eq!(results.view(), ViewState::Posts);
    }

    #[test]
    fn test_set_view_keeps_data() {
        let mut results = ResultSet::new();
        results.set_posts(vec![post("p1", "a", 1)]);
        results.set_comments(vec![comment("c1")], "/r/a/comments/p1/");

        results.set_view(ViewState::Posts);
        results.set_view(ViewState::Comments);
        results.set_view(ViewState::Posts);

        assert_eq!(results.posts().len(), 1);
        assert_eq!(results.comments().len(), 1);
    }

    #[test]
    fn test_visible_posts_is_a_stable_filter() {
        let mut results = ResultSet::new();
        results.set_posts(vec![
            post("p1", "a", 50),
            post("p2", "b", 5),
            post("p3", "a", 500),
            post("p4", "c", 70),
        ]);

        let mut filter_config = FilterConfig::new();
        filter_config.set(FilterField::MinScore, "10");

        let ids: Vec<&str> = results
            .visible_posts_at(&filter_config, &[], NOW)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["p1", "p3", "p4"]);
    }

    #[test]
    fn test_toggle_and_reset_sources() {
        let mut results = ResultSet::new();
        results.replace_sources(vec!["a".to_string(), "b".to_string()]);

        assert!(results.toggle_source("a"));
        assert!(!results.toggle_source("zzz"));
        assert_eq!(results.selected_sources(), ["a"]);

        assert!(!results.toggle_source("a"));
        assert!(results.selected_sources().is_empty());

        results.toggle_source("b");
        results.reset_sources();
        assert!(results.selected_sources().is_empty());
    }

    #[test]
    fn test_replace_sources_clears_selection() {
        let mut results = ResultSet::new();
        results.replace_sources(vec!["a".to_string()]);
        results.toggle_source("a");

        results.replace_sources(vec!["b".to_string()]);
        assert!(results.selected_sources().is_empty());
        assert_eq!(results.available_sources(), ["b"]);
    }
}
