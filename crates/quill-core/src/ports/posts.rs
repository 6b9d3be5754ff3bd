//! Posts backend port - the remote service that owns post data.

use async_trait::async_trait;

use crate::domain::{CreatePost, PageRequest, Post, PostKey, PostsPage, UpdatePost};
use crate::error::PostsError;

/// Remote posts service. Every gateway request maps to exactly one call here.
#[async_trait]
pub trait PostsService: Send + Sync {
    /// Create a post and return its id.
    async fn create_post(&self, req: CreatePost) -> Result<i64, PostsError>;

    async fn update_post(&self, req: UpdatePost) -> Result<(), PostsError>;

    async fn delete_post(&self, key: PostKey) -> Result<(), PostsError>;

    async fn get_post(&self, key: PostKey) -> Result<Post, PostsError>;

    /// Fetch one page of an author's posts. The returned page echoes the requested bounds.
    async fn get_page_of_posts(&self, req: PageRequest) -> Result<PostsPage, PostsError>;
}
