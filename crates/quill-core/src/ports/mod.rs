//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod posts;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use posts::PostsService;
pub use repository::AuthStore;
