//! Fakes shared by handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use quill_core::domain::{CreatePost, PageRequest, Post, PostKey, PostsPage, UpdatePost};
use quill_core::error::PostsError;
use quill_core::ports::{PostsService, TokenService};
use quill_infra::{Argon2PasswordService, InMemoryAuthStore, JwtConfig, JwtTokenService};

use crate::state::AppState;

const TEST_SECRET: &str = "handler-test-secret";

/// Every call the gateway made to the posts backend, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(CreatePost),
    Update(UpdatePost),
    Delete(PostKey),
    Get(PostKey),
    Page(PageRequest),
}

/// Posts backend that records calls and answers with canned data, or a canned error.
#[derive(Clone, Default)]
pub struct RecordingPosts {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_with: Option<PostsError>,
    page_len: usize,
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
}

impl RecordingPosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, err: PostsError) -> Self {
        self.fail_with = Some(err);
        self
    }

    /// Number of posts returned per page, independent of the requested size.
    pub fn with_page_len(mut self, len: usize) -> Self {
        self.page_len = len;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), PostsError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn canned_post(author_id: i64, post_id: i64) -> Post {
    Post {
        id: post_id,
        author_id,
        text: format!("post {} by {}", post_id, author_id),
        time_updated: fixed_time(),
    }
}

#[async_trait]
impl PostsService for RecordingPosts {
    async fn create_post(&self, req: CreatePost) -> Result<i64, PostsError> {
        self.record(Call::Create(req))?;
        Ok(1000)
    }

    async fn update_post(&self, req: UpdatePost) -> Result<(), PostsError> {
        self.record(Call::Update(req))
    }

    async fn delete_post(&self, key: PostKey) -> Result<(), PostsError> {
        self.record(Call::Delete(key))
    }

    async fn get_post(&self, key: PostKey) -> Result<Post, PostsError> {
        self.record(Call::Get(key))?;
        Ok(canned_post(key.author_id, key.post_id))
    }

    async fn get_page_of_posts(&self, req: PageRequest) -> Result<PostsPage, PostsError> {
        self.record(Call::Page(req))?;
        Ok(PostsPage {
            page_num: req.page_num,
            page_size: req.page_size,
            posts: (0..self.page_len as i64)
                .map(|i| canned_post(req.author_id, i + 1))
                .collect(),
        })
    }
}

pub fn test_tokens() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret: TEST_SECRET.to_string(),
        ..JwtConfig::default()
    })
}

/// State with the given posts backend, an empty in-memory auth store and the test token service.
pub fn test_app_state(posts: RecordingPosts) -> AppState {
    AppState {
        posts: Arc::new(posts),
        auth_store: Arc::new(InMemoryAuthStore::new(Arc::new(
            Argon2PasswordService::new(),
        ))),
        tokens: Arc::new(test_tokens()),
    }
}

/// `Authorization` header for `user_id`.
pub fn bearer(user_id: i64) -> (&'static str, String) {
    let token = test_tokens()
        .generate_token(user_id, "tester")
        .unwrap();
    ("Authorization", format!("Bearer {}", token))
}
