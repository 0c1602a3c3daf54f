#[cfg(test)]
mod tests {
    use crate::api::*;
    use crate::{Backend, BackendApiClient};
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;
    use threadscope_core::{AppConfig, BackendError, ContentItem, CoreError, ErrorExt};

    fn client_for(server: &ServerGuard) -> BackendApiClient {
        let config = AppConfig {
            backend_url: format!("{}/api", server.url()),
            ..Default::default()
        };
        BackendApiClient::new(&config).unwrap()
    }

    fn post_json(id: &str, subreddit: &str, score: i64) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Post {id}"),
            "subreddit": subreddit,
            "score": score,
            "num_comments": 3,
            "created_utc": 1700000000.0,
            "permalink": format!("/r/{subreddit}/comments/{id}/")
        })
    }

    #[tokio::test]
    async fn test_search_posts_question() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/search")
            .match_body(Matcher::Json(json!({ "question": "best laptops" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "posts": [post_json("a", "laptops", 500), post_json("b", "apple", 5)],
                    "subreddits": ["laptops", "apple"]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let response = client.search("best laptops").await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.posts.len(), 2);
        assert_eq!(response.posts[0].score, 500);
        assert_eq!(response.subreddits, vec!["laptops", "apple"]);
    }

    #[tokio::test]
    async fn test_configured_user_agent_is_sent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/audiences")
            .match_header("user-agent", Matcher::Exact("threadscope-test/1.0".to_string()))
            .with_status(200)
            .with_body(json!({ "audiences": [] }).to_string())
            .create_async()
            .await;

        let config = AppConfig {
            backend_url: format!("{}/api", server.url()),
            user_agent: "threadscope-test/1.0".to_string(),
            ..Default::default()
        };
        let client = BackendApiClient::new(&config).unwrap();
        let audiences = client.list_audiences().await.unwrap();

        mock.assert_async().await;
        assert!(audiences.is_empty());
    }

    #[tokio::test]
    async fn test_error_payload_becomes_server_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/search")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(json!({ "error": "No question provided." }).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let error = client.search(" ").await.unwrap_err();

        assert!(matches!(
            error,
            CoreError::Backend(BackendError::Rejected { status_code: 400, .. })
        ));
        assert_eq!(error.server_message(), Some("No question provided."));
    }

    #[tokio::test]
    async fn test_server_error_without_payload() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/comments")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let client = client_for(&server);
        let error = client.fetch_comments("/r/rust/comments/x/").await.unwrap_err();

        assert!(matches!(
            error,
            CoreError::Backend(BackendError::ServerError {
                status_code: 500,
                message: None
            })
        ));
        assert_eq!(error.server_message(), None);
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_invalid_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/get_topics")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "labels": ["rust"] }).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let error = client.get_topics("Devs").await.unwrap_err();

        match error {
            CoreError::Backend(BackendError::InvalidResponse { endpoint, .. }) => {
                assert_eq!(endpoint, TOPICS_ENDPOINT);
            }
            other => panic!("Expected InvalidResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_comments_may_be_empty() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/comments")
            .match_body(Matcher::Json(json!({ "permalink": "/r/rust/comments/x/" })))
            .with_status(200)
            .with_body(json!({ "comments": [] }).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let comments = client.fetch_comments("/r/rust/comments/x/").await.unwrap();
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn test_create_and_list_audiences() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/api/audiences")
            .match_body(Matcher::Json(json!({
                "name": "Devs",
                "subreddits": ["programming", "golang"]
            })))
            .with_status(201)
            .with_body(json!({ "message": "Audience created." }).to_string())
            .create_async()
            .await;
        let list = server
            .mock("GET", "/api/audiences")
            .with_status(200)
            .with_body(
                json!({
                    "audiences": [{ "name": "Devs", "sources": ["programming", "golang"] }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let sources = vec!["programming".to_string(), "golang".to_string()];
        let message = client.create_audience("Devs", &sources).await.unwrap();
        let audiences = client.list_audiences().await.unwrap();

        create.assert_async().await;
        list.assert_async().await;
        assert_eq!(message.as_deref(), Some("Audience created."));
        assert_eq!(audiences.len(), 1);
        assert_eq!(audiences[0].sources, sources);
    }

    #[tokio::test]
    async fn test_topic_filter_and_audience_search() {
        let mut server = Server::new_async().await;
        let _filter = server
            .mock("POST", "/api/filter_posts")
            .match_body(Matcher::Json(json!({ "topic": "Concurrency", "audience": "Devs" })))
            .with_status(200)
            .with_body(json!({ "posts": [post_json("t", "golang", 80)] }).to_string())
            .create_async()
            .await;
        let _search = server
            .mock("POST", "/api/search_audience")
            .match_body(Matcher::Json(json!({ "question": "channels", "audience": "Devs" })))
            .with_status(200)
            .with_body(json!({ "posts": [] }).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let posts = client.filter_posts("Concurrency", "Devs").await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].subreddit, "golang");

        let posts = client.search_audience("channels", "Devs").await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_save_sends_post_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/save")
            .match_body(Matcher::PartialJson(json!({
                "id": "a",
                "subreddit": "laptops",
                "permalink": "/r/laptops/comments/a/"
            })))
            .with_status(201)
            .with_body(json!({ "message": "Post saved successfully." }).to_string())
            .create_async()
            .await;

        let post: ContentItem = serde_json::from_value(post_json("a", "laptops", 500)).unwrap();
        let client = client_for(&server);
        let message = client.save_post(&post).await.unwrap();

        mock.assert_async().await;
        assert_eq!(message.as_deref(), Some("Post saved successfully."));
    }

    #[tokio::test]
    async fn test_save_without_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/save")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let post: ContentItem = serde_json::from_value(post_json("a", "laptops", 1)).unwrap();
        let client = client_for(&server);
        assert_eq!(client.save_post(&post).await.unwrap(), None);
    }

    #[test]
    fn test_unreachable_backend_is_network_error() {
        let config = AppConfig {
            backend_url: "http://127.0.0.1:9/api".to_string(),
            ..Default::default()
        };
        let client = BackendApiClient::new(&config).unwrap();

        let result = tokio_test::block_on(client.list_audiences());
        assert!(matches!(result, Err(CoreError::Network(_))));
    }
}
