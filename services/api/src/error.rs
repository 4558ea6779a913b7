//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// No authenticated identity on the request
    #[error("Unauthorized")]
    Unauthorized,

    /// Target row absent, or absent for the acting owner
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row exists but belongs to a different user
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request shape or refinement validation failure
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal server error")]
    Internal,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    /// Machine-checkable error kind reported to clients
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Internal | ApiError::Database(_) => "internal",
        }
    }

    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(ref e) = self {
            tracing::error!("Database failure: {}", e);
        }

        let message = match &self {
            ApiError::Unauthorized => "Unauthorized".to_string(),
            ApiError::NotFound(msg) | ApiError::Forbidden(msg) | ApiError::InvalidInput(msg) => {
                msg.clone()
            }
            ApiError::Internal | ApiError::Database(_) => "Internal server error".to_string(),
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "kind": self.kind(),
                "message": message,
            },
        }));

        (self.status(), body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
