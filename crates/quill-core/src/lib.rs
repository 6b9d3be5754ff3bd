//! # Quill Core
//!
//! The domain layer of the Quill gateway.
//! Entities and the ports (traits) the gateway talks through; no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{PostsError, RepoError};
