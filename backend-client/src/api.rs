use crate::schema::*;
use crate::Backend;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use threadscope_core::{AppConfig, Audience, BackendError, Comment, ContentItem, CoreError};
use tracing::{debug, error, info, warn};

pub const SEARCH_ENDPOINT: &str = "/search";
pub const SEARCH_AUDIENCE_ENDPOINT: &str = "/search_audience";
pub const COMMENTS_ENDPOINT: &str = "/comments";
pub const AUDIENCES_ENDPOINT: &str = "/audiences";
pub const TOPICS_ENDPOINT: &str = "/get_topics";
pub const FILTER_POSTS_ENDPOINT: &str = "/filter_posts";
pub const SAVE_ENDPOINT: &str = "/save";

#[derive(Debug)]
pub struct BackendApiClient {
    http_client: Client,
    base_url: String,
}

impl BackendApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn make_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Response, CoreError> {
        let url = self.endpoint_url(endpoint);
        let start_time = Instant::now();

        let mut request_builder = self.http_client.request(method.clone(), &url);

        if let Some(body) = body {
            request_builder = request_builder.json(body);
        }

        info!("Making backend request: {} {}", method, endpoint);
        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {} {}: {}", method, endpoint, e);
                if e.is_timeout() {
                    return Err(CoreError::Backend(BackendError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        debug!(
            "{} {} answered {} in {:?}",
            method,
            endpoint,
            status,
            start_time.elapsed()
        );

        if status.is_success() {
            return Ok(response);
        }

        error!("Request failed with status: {} for {}", status, endpoint);
        let message = Self::read_error_message(response).await;
        Err(Self::status_error(endpoint, status, message))
    }

    async fn read_error_message(response: Response) -> Option<String> {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not read error body: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<ErrorPayload>(&body) {
            Ok(payload) => payload.error,
            Err(_) => {
                debug!("Error body is not an error payload: {}", body);
                None
            }
        }
    }

    fn status_error(endpoint: &str, status: StatusCode, message: Option<String>) -> CoreError {
        let error = if status.is_server_error() {
            BackendError::ServerError {
                status_code: status.as_u16(),
                message,
            }
        } else {
            BackendError::Rejected {
                endpoint: endpoint.to_string(),
                status_code: status.as_u16(),
                message,
            }
        };
        CoreError::Backend(error)
    }

    async fn parse_body<T: DeserializeOwned>(
        endpoint: &str,
        response: Response,
    ) -> Result<T, CoreError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response from {}: {}", endpoint, e);
            CoreError::Backend(BackendError::InvalidResponse {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            })
        })
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, CoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.make_request(Method::POST, endpoint, Some(body)).await?;
        Self::parse_body(endpoint, response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CoreError> {
        let response = self
            .make_request::<()>(Method::GET, endpoint, None)
            .await?;
        Self::parse_body(endpoint, response).await
    }
}

impl Backend for BackendApiClient {
    async fn search(&self, question: &str) -> Result<SearchResponse, CoreError> {
        let response: SearchResponse = self
            .post_json(SEARCH_ENDPOINT, &SearchRequest { question })
            .await?;
        info!(
            "Search returned {} posts from {} subreddits",
            response.posts.len(),
            response.subreddits.len()
        );
        Ok(response)
    }

    async fn search_audience(
        &self,
        question: &str,
        audience: &str,
    ) -> Result<Vec<ContentItem>, CoreError> {
        let response: PostsResponse = self
            .post_json(
                SEARCH_AUDIENCE_ENDPOINT,
                &AudienceSearchRequest { question, audience },
            )
            .await?;
        info!(
            "Audience search in '{}' returned {} posts",
            audience,
            response.posts.len()
        );
        Ok(response.posts)
    }

    async fn fetch_comments(&self, permalink: &str) -> Result<Vec<Comment>, CoreError> {
        let response: CommentsResponse = self
            .post_json(COMMENTS_ENDPOINT, &CommentsRequest { permalink })
            .await?;
        debug!("Retrieved {} comments for {}", response.comments.len(), permalink);
        Ok(response.comments)
    }

    async fn list_audiences(&self) -> Result<Vec<Audience>, CoreError> {
        let response: AudiencesResponse = self.get_json(AUDIENCES_ENDPOINT).await?;
        debug!("Retrieved {} audiences", response.audiences.len());
        Ok(response.audiences)
    }

    async fn create_audience(
        &self,
        name: &str,
        subreddits: &[String],
    ) -> Result<Option<String>, CoreError> {
        let response: MessageResponse = self
            .post_json(AUDIENCES_ENDPOINT, &CreateAudienceRequest { name, subreddits })
            .await?;
        info!("Created audience '{}' with {} subreddits", name, subreddits.len());
        Ok(response.message)
    }

    async fn get_topics(&self, audience: &str) -> Result<Vec<String>, CoreError> {
        let response: TopicsResponse = self
            .post_json(TOPICS_ENDPOINT, &TopicsRequest { audience })
            .await?;
        debug!("Retrieved {} topics for '{}'", response.topics.len(), audience);
        Ok(response.topics)
    }

    async fn filter_posts(
        &self,
        topic: &str,
        audience: &str,
    ) -> Result<Vec<ContentItem>, CoreError> {
        let response: PostsResponse = self
            .post_json(FILTER_POSTS_ENDPOINT, &FilterPostsRequest { topic, audience })
            .await?;
        debug!(
            "Topic '{}' in '{}' matched {} posts",
            topic,
            audience,
            response.posts.len()
        );
        Ok(response.posts)
    }

    async fn save_post(&self, post: &ContentItem) -> Result<Option<String>, CoreError> {
        let response: MessageResponse = self.post_json(SAVE_ENDPOINT, post).await?;
        info!("Saved post {}", post.id);
        Ok(response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BackendApiClient::new(&AppConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = AppConfig {
            backend_url: "http://localhost:5000/api/".to_string(),
            ..Default::default()
        };
        let client = BackendApiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint_url(SEARCH_ENDPOINT),
            "http://localhost:5000/api/search"
        );
    }

    #[test]
    fn test_status_error_classification() {
        let error = BackendApiClient::status_error(
            SEARCH_ENDPOINT,
            StatusCode::BAD_REQUEST,
            Some("No question provided.".to_string()),
        );
        assert!(matches!(
            error,
            CoreError::Backend(BackendError::Rejected { status_code: 400, .. })
        ));

        let error =
            BackendApiClient::status_error(COMMENTS_ENDPOINT, StatusCode::BAD_GATEWAY, None);
        assert!(matches!(
            error,
            CoreError::Backend(BackendError::ServerError {
                status_code: 502,
                message: None
            })
        ));
    }
}
