//! Error types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use orchestrator::OrchestratorError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unknown `X-User-Id`.
    #[error("Not authenticated")]
    Unauthorized,

    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// A chat turn failed.
    #[error("Chat turn failed: {0}")]
    Turn(#[from] OrchestratorError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => {
                warn!("Unauthorized request");
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Database(DatabaseError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Database(err @ DatabaseError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            ApiError::Database(err @ DatabaseError::AlreadyExists { .. }) => {
                (StatusCode::CONFLICT, err.to_string())
            }
            ApiError::Database(err) => {
                error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Turn(OrchestratorError::Store(DatabaseError::Validation(err))) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Turn(err) => {
                error!("Chat turn failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate AI response".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
