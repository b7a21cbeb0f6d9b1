//! Error types for the cache engine and its HTTP surface
//!
//! Cache misses are ordinary outcomes, reported through these variants
//! rather than panics.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// No live key exists in the category
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Category exists but the key does not
    #[error("Key not found: {category}/{key}")]
    KeyNotFound { category: String, key: String },

    /// Key existed but its TTL had elapsed; it has been purged
    #[error("Key expired: {category}/{key}")]
    Expired { category: String, key: String },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// True for the three "nothing to return" outcomes of a read.
    pub fn is_miss(&self) -> bool {
        matches!(
            self,
            CacheError::CategoryNotFound(_)
                | CacheError::KeyNotFound { .. }
                | CacheError::Expired { .. }
        )
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = if self.is_miss() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_classification() {
        assert!(CacheError::CategoryNotFound("cars".into()).is_miss());
        assert!(CacheError::Expired {
            category: "cars".into(),
            key: "color".into()
        }
        .is_miss());
        assert!(!CacheError::InvalidRequest("empty".into()).is_miss());
    }

    #[test]
    fn test_error_messages() {
        let err = CacheError::KeyNotFound {
            category: "cars".into(),
            key: "model".into(),
        };
        assert_eq!(err.to_string(), "Key not found: cars/model");
    }

    #[test]
    fn test_status_codes() {
        let miss = CacheError::CategoryNotFound("x".into()).into_response();
        assert_eq!(miss.status(), StatusCode::NOT_FOUND);

        let bad = CacheError::InvalidRequest("x".into()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }
}
