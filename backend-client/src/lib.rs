pub mod api;
pub mod schema;

#[cfg(test)]
mod tests;

pub use api::BackendApiClient;
pub use schema::SearchResponse;

use threadscope_core::{Audience, Comment, ContentItem, CoreError};

/// The remote search, topic and persistence service.
///
/// Every call is a single request; implementations never retry.
pub trait Backend {
    async fn search(&self, question: &str) -> Result<SearchResponse, CoreError>;

    async fn search_audience(
        &self,
        question: &str,
        audience: &str,
    ) -> Result<Vec<ContentItem>, CoreError>;

    async fn fetch_comments(&self, permalink: &str) -> Result<Vec<Comment>, CoreError>;

    async fn list_audiences(&self) -> Result<Vec<Audience>, CoreError>;

    /// Returns the server's confirmation message, if it sent one.
    async fn create_audience(
        &self,
        name: &str,
        subreddits: &[String],
    ) -> Result<Option<String>, CoreError>;

    async fn get_topics(&self, audience: &str) -> Result<Vec<String>, CoreError>;

    async fn filter_posts(&self, topic: &str, audience: &str)
        -> Result<Vec<ContentItem>, CoreError>;

    /// Returns the server's confirmation message, if it sent one.
    async fn save_post(&self, post: &ContentItem) -> Result<Option<String>, CoreError>;
}
