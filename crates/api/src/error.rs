//! Error types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `modelId` names no known model.
    #[error("Model not found")]
    ModelNotFound,

    /// The request could not be understood.
    #[error("{0}")]
    BadRequest(String),

    /// Missing record.
    #[error("{0}")]
    NotFound(String),

    /// Missing or wrong bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Database error.
    #[error("Database error: {0}")]
    Database(DatabaseError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Plain text, matching what chat clients expect for this case.
            ApiError::ModelNotFound => {
                return (StatusCode::NOT_FOUND, "Model not found").into_response();
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Unauthorized => {
                tracing::warn!("Unauthorized request");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_from_database() {
        let err = ApiError::from(DatabaseError::NotFound {
            entity: "Chat",
            id: "abc".to_string(),
        });
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg == "Chat not found: abc"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_model_not_found_is_plain_text() {
        let response = ApiError::ModelNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/plain"));
    }
}
