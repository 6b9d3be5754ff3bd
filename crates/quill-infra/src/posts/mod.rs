//! Posts backend implementations - HTTP client and in-memory fallback.

mod memory;

#[cfg(feature = "http-client")]
mod http;

pub use memory::InMemoryPostsService;

#[cfg(feature = "http-client")]
pub use http::{HttpPostsClient, PostsClientConfig};
