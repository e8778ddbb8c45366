//! Error types for the forum cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Failures local to the cache layer.
///
/// These never reach a user: [`CacheService::invalidate`](crate::cache::CacheService::invalidate)
/// logs and swallows them.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A glob pattern could not be compiled into a matcher
    #[error("Invalid invalidation pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// == App Error Enum ==
/// Errors surfaced by the forum host application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested forum resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A template failed to render
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Render(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the forum application.
pub type Result<T> = std::result::Result<T, AppError>;
