use serde::{Deserialize, Serialize};

const REDDIT_WEB_BASE: &str = "https://reddit.com";

/// A post returned by the backend. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub subreddit: String,
    pub score: i64,
    pub num_comments: i64,
    pub created_utc: f64,
    pub permalink: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ContentItem {
    /// Absolute link to the discussion page.
    pub fn full_link(&self) -> String {
        format!("{}{}", REDDIT_WEB_BASE, self.permalink)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub score: i64,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_utc: Option<f64>,
}

/// A named grouping of subreddits. Names are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audience {
    pub name: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Posts,
    Comments,
}

impl std::str::FromStr for ViewState {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posts" => Ok(ViewState::Posts),
            "comments" => Ok(ViewState::Comments),
            other => Err(crate::CoreError::InvalidInput {
                message: format!("unknown view '{other}'"),
            }),
        }
    }
}
