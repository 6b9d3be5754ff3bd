//! HTTP client for the backend posts service.
//!
//! One `POST {base_url}/posts/<operation>` per call, JSON in both directions.
//! Non-2xx responses carry `{"code": ..., "message": ...}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use quill_core::domain::{CreatePost, PageRequest, Post, PostKey, PostsPage, UpdatePost};
use quill_core::error::PostsError;
use quill_core::ports::PostsService;

/// Posts client configuration.
#[derive(Debug, Clone)]
pub struct PostsClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl PostsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct BackendError {
    code: String,
    message: String,
}

#[derive(Deserialize)]
struct CreatedPost {
    post_id: i64,
}

/// reqwest-backed [`PostsService`].
pub struct HttpPostsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostsClient {
    pub fn new(config: PostsClientConfig) -> Result<Self, PostsError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| PostsError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call<B, R>(&self, operation: &str, body: &B) -> Result<R, PostsError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(operation, body).await?;
        response.json::<R>().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Malformed posts service response");
            PostsError::Internal(format!("malformed posts service response: {}", e))
        })
    }

    async fn call_unit<B>(&self, operation: &str, body: &B) -> Result<(), PostsError>
    where
        B: Serialize + ?Sized,
    {
        self.send(operation, body).await.map(|_| ())
    }

    async fn send<B>(&self, operation: &str, body: &B) -> Result<reqwest::Response, PostsError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}/posts/{}", self.base_url, operation);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Posts service unreachable");
            PostsError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let err = match serde_json::from_str::<BackendError>(&text) {
            Ok(body) => PostsError::from_code(&body.code, body.message),
            Err(_) => PostsError::Internal(if text.is_empty() {
                format!("posts service returned {}", status)
            } else {
                text
            }),
        };

        tracing::debug!(operation, %status, error = %err, "Posts service call failed");
        Err(err)
    }
}

#[async_trait]
impl PostsService for HttpPostsClient {
    async fn create_post(&self, req: CreatePost) -> Result<i64, PostsError> {
        let created: CreatedPost = self.call("create", &req).await?;
        Ok(created.post_id)
    }

    async fn update_post(&self, req: UpdatePost) -> Result<(), PostsError> {
        self.call_unit("update", &req).await
    }

    async fn delete_post(&self, key: PostKey) -> Result<(), PostsError> {
        self.call_unit("delete", &key).await
    }

    async fn get_post(&self, key: PostKey) -> Result<Post, PostsError> {
        self.call("get", &key).await
    }

    async fn get_page_of_posts(&self, req: PageRequest) -> Result<PostsPage, PostsError> {
        self.call("page", &req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpPostsClient {
        HttpPostsClient::new(PostsClientConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_create_post_sends_author_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/create"))
            .and(body_json(json!({"author_id": 7, "text": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"post_id": 42})))
            .expect(1)
            .mount(&server)
            .await;

        let id = client_for(&server)
            .create_post(CreatePost {
                author_id: 7,
                text: "hello".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn test_get_post_decodes_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/get"))
            .and(body_json(json!({"author_id": 7, "post_id": 42})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "author_id": 7,
                "text": "hello",
                "time_updated": "2024-05-01T10:00:00Z"
            })))
            .mount(&server)
            .await;

        let post = client_for(&server)
            .get_post(PostKey {
                author_id: 7,
                post_id: 42,
            })
            .await
            .unwrap();

        assert_eq!(post.text, "hello");
        assert_eq!(
            post.time_updated,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/delete"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .delete_post(PostKey {
                author_id: 7,
                post_id: 1,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_backend_error_code_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/update"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "not_found",
                "message": "no post 42 for author 7"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .update_post(UpdatePost {
                author_id: 7,
                post_id: 42,
                text: "x".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            PostsError::NotFound("no post 42 for author 7".to_string())
        );
    }

    #[tokio::test]
    async fn test_unstructured_error_keeps_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/page"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_page_of_posts(PageRequest {
                author_id: 7,
                page_num: 0,
                page_size: 10,
            })
            .await
            .unwrap_err();

        assert_eq!(err, PostsError::Internal("database is down".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let client = HttpPostsClient::new(
            PostsClientConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(1)),
        )
        .unwrap();

        let err = client
            .delete_post(PostKey {
                author_id: 1,
                post_id: 1,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PostsError::Unavailable(_)));
    }
}
