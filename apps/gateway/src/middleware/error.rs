//! Error handling - every failure becomes an RFC 7807 envelope.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::InternalError, http::StatusCode};
use std::fmt;

use quill_core::error::{PostsError, RepoError};
use quill_shared::ErrorResponse;

use crate::observability::request_id_of;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    /// Rendered with its message as the envelope detail.
    Internal(String),
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        AppError::BadRequest(msg.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized().with_detail(detail),
            AppError::Forbidden(detail) => ErrorResponse::forbidden(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error(detail)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

/// Backend text is passed through unchanged; only the status code depends on the kind.
impl From<PostsError> for AppError {
    fn from(err: PostsError) -> Self {
        match err {
            PostsError::NotFound(msg) => AppError::NotFound(msg),
            PostsError::PermissionDenied(msg) => AppError::Forbidden(msg),
            PostsError::InvalidArgument(msg) => AppError::BadRequest(msg),
            PostsError::Unavailable(msg) | PostsError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("user not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("database error".to_string())
            }
        }
    }
}

/// 400 envelope for input rejected by an extractor, before any handler runs.
pub fn rejected_input<E>(cause: E, req: &HttpRequest, detail: &str) -> actix_web::Error
where
    E: fmt::Debug + fmt::Display + 'static,
{
    tracing::debug!(error = %cause, path = %req.path(), "Rejected request input");

    let mut error = ErrorResponse::bad_request(detail);
    if let Some(id) = request_id_of(req) {
        error = error.with_request_id(id);
    }
    InternalError::from_response(cause, HttpResponse::BadRequest().json(error)).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
