//! Request and response bodies for every backend endpoint.
//!
//! Response types have no defaults on required fields, so a body missing a
//! field fails to deserialize and is reported as an invalid response.

use serde::{Deserialize, Serialize};
use threadscope_core::{Audience, Comment, ContentItem};

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub posts: Vec<ContentItem>,
    pub subreddits: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudienceSearchRequest<'a> {
    pub question: &'a str,
    pub audience: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<ContentItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentsRequest<'a> {
    pub permalink: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudiencesResponse {
    pub audiences: Vec<Audience>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAudienceRequest<'a> {
    pub name: &'a str,
    pub subreddits: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicsRequest<'a> {
    pub audience: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterPostsRequest<'a> {
    pub topic: &'a str,
    pub audience: &'a str,
}

/// Confirmation body of save and create calls.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of any failed call. The field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
}
