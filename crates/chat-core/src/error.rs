//! Error types for conversation and generation operations.

use thiserror::Error;

/// Errors that can occur while preparing or running a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A client message could not be turned into a core message.
    #[error("message conversion failed: {0}")]
    MessageConversion(String),

    /// The model provider rejected the request or produced an invalid stream.
    #[error("model error: {0}")]
    Model(String),

    /// Could not reach the model provider.
    #[error("network error: {0}")]
    Network(String),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
