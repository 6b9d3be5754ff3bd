//! In-memory posts backend - used when no posts service URL is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{CreatePost, PageRequest, Post, PostKey, PostsPage, UpdatePost};
use quill_core::error::PostsError;
use quill_core::ports::PostsService;

#[derive(Default)]
struct Store {
    last_id: i64,
    posts: BTreeMap<i64, Post>,
}

/// Posts held in a `BTreeMap` behind an async RwLock.
///
/// Only the author may update or delete a post. Pages are ordered by post id.
/// Note: Data is lost on process restart.
pub struct InMemoryPostsService {
    store: RwLock<Store>,
}

impl InMemoryPostsService {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for InMemoryPostsService {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(post_id: i64) -> PostsError {
    PostsError::NotFound(format!("post {} not found", post_id))
}

fn owned_mut(store: &mut Store, key: PostKey) -> Result<&mut Post, PostsError> {
    let post = store.posts.get_mut(&key.post_id).ok_or_else(|| not_found(key.post_id))?;
    if post.author_id != key.author_id {
        return Err(PostsError::PermissionDenied(format!(
            "post {} does not belong to user {}",
            key.post_id, key.author_id
        )));
    }
    Ok(post)
}

#[async_trait]
impl PostsService for InMemoryPostsService {
    async fn create_post(&self, req: CreatePost) -> Result<i64, PostsError> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let id = store.last_id;

        store.posts.insert(
            id,
            Post {
                id,
                author_id: req.author_id,
                text: req.text,
                time_updated: Utc::now(),
            },
        );

        Ok(id)
    }

    async fn update_post(&self, req: UpdatePost) -> Result<(), PostsError> {
        let mut store = self.store.write().await;
        let post = owned_mut(
            &mut store,
            PostKey {
                author_id: req.author_id,
                post_id: req.post_id,
            },
        )?;

        post.text = req.text;
        post.time_updated = Utc::now();
        Ok(())
    }

    async fn delete_post(&self, key: PostKey) -> Result<(), PostsError> {
        let mut store = self.store.write().await;
        owned_mut(&mut store, key)?;
        store.posts.remove(&key.post_id);
        Ok(())
    }

    async fn get_post(&self, key: PostKey) -> Result<Post, PostsError> {
        let store = self.store.read().await;
        store
            .posts
            .get(&key.post_id)
            .filter(|p| p.author_id == key.author_id)
            .cloned()
            .ok_or_else(|| not_found(key.post_id))
    }

    async fn get_page_of_posts(&self, req: PageRequest) -> Result<PostsPage, PostsError> {
        if req.page_num < 0 || req.page_size < 0 {
            return Err(PostsError::InvalidArgument(
                "page_num and page_size must not be negative".to_string(),
            ));
        }

        let skip = req.page_num as usize * req.page_size as usize;
        let store = self.store.read().await;
        let posts = store
            .posts
            .values()
            .filter(|p| p.author_id == req.author_id)
            .skip(skip)
            .take(req.page_size as usize)
            .cloned()
            .collect();

        Ok(PostsPage {
            page_num: req.page_num,
            page_size: req.page_size,
            posts,
        })
    }
}
