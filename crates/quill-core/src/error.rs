//! Domain-level error types.

use thiserror::Error;

/// Errors reported by the backend posts service.
///
/// The message is the backend's own text and is relayed to clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostsError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    InvalidArgument(String),

    /// The backend could not be reached.
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl PostsError {
    /// Build an error from a backend status code string.
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            "not_found" => Self::NotFound(message),
            "permission_denied" => Self::PermissionDenied(message),
            "invalid_argument" => Self::InvalidArgument(message),
            "unavailable" => Self::Unavailable(message),
            _ => Self::Internal(message),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
