//! Error types for the favorites service
//!
//! Provides unified error handling using thiserror. The store and the cache
//! each have their own error enum; the manager and the HTTP layer speak
//! `FavoriteError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failures reported by a favorite store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The `(user_id, content_id)` unique index rejected a save
    #[error("Unique index violated for user '{user_id}' and content '{content_id}'")]
    UniqueViolation { user_id: String, content_id: String },

    /// Any other storage failure
    #[error("Store backend error: {0}")]
    Backend(String),
}

// == Cache Error Enum ==
/// Failures reported by a favorite cache.
///
/// A miss is not an error; cache reads return `Ok(None)` on a miss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key exceeds the cache key limit
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Cache backend is unreachable or misbehaving
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

// == Favorite Error Enum ==
/// Unified error type for the favorites service.
#[derive(Error, Debug)]
pub enum FavoriteError {
    /// Required field missing or blank on a request
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The pair is already a favorite
    #[error("Content '{content_id}' is already a favorite of user '{user_id}'")]
    Duplicate { user_id: String, content_id: String },

    /// Store failure, propagated untouched
    #[error(transparent)]
    Store(#[from] StoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for FavoriteError {
    fn into_response(self) -> Response {
        let status = match &self {
            FavoriteError::Validation(_) => StatusCode::BAD_REQUEST,
            FavoriteError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            FavoriteError::Store(_) => {
                error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the favorites service.
pub type Result<T> = std::result::Result<T, FavoriteError>;
