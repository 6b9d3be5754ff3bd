//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! the posts backend client, the authentication store, and token/password services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL authentication store via SeaORM
//! - `auth` - JWT + Argon2
//! - `http-client` - reqwest client for the backend posts service

pub mod database;
pub mod posts;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::InMemoryAuthStore;
pub use posts::InMemoryPostsService;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
pub use database::PostgresAuthStore;

#[cfg(feature = "http-client")]
pub use posts::{HttpPostsClient, PostsClientConfig};
