//! Error types for tool operations.

use thiserror::Error;

/// Errors that can occur during tool execution.
///
/// These never reach the model directly: the executor turns them into a
/// [`crate::ToolFailure`].
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Missing required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// General execution error.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl ToolError {
    /// Whether the error comes from the arguments rather than the tool body.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            ToolError::MissingParameter(_) | ToolError::InvalidParameter { .. }
        )
    }
}
