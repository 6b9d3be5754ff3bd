//! Authentication store implementations - PostgreSQL and in-memory fallback.

mod credentials;
mod memory;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

pub use memory::InMemoryAuthStore;

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, connect};
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresAuthStore;

#[cfg(all(test, feature = "postgres", feature = "auth"))]
mod tests;
