use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity as owned by the backend posts service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub text: String,
    pub time_updated: DateTime<Utc>,
}

/// One page of an author's posts, in backend order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    pub page_num: i32,
    pub page_size: i32,
    pub posts: Vec<Post>,
}

/// Request to create a post on behalf of `author_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePost {
    pub author_id: i64,
    pub text: String,
}

/// Request to replace the text of an existing post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePost {
    pub author_id: i64,
    pub post_id: i64,
    pub text: String,
}

/// Addresses a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostKey {
    pub author_id: i64,
    pub post_id: i64,
}

/// Page bounds are passed through as given; the backend decides what they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub author_id: i64,
    pub page_num: i32,
    pub page_size: i32,
}
