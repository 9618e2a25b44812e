//! Tagged result of a tool invocation.

use serde_json::{json, Value};

/// What a tool produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Upstream data, passed to the model unchanged.
    Success(Value),
    /// A failure the model is told about.
    Failure(ToolFailure),
}

/// Ways a tool can fail, each with a fixed JSON envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolFailure {
    /// The upstream call failed (transport, status or body).
    ApiRequestFailed,
    /// The address parser rejected the shipping address.
    AddressError { details: Value },
    /// The tool body failed unexpectedly.
    Exception { details: String },
    /// Arguments did not match the tool's schema.
    InvalidArguments { details: String },
    /// The tool is not in the active set.
    UnknownTool { name: String },
}

impl ToolOutcome {
    /// Whether this is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success(_))
    }

    /// Render the value sent back to the model.
    pub fn into_json(self) -> Value {
        match self {
            ToolOutcome::Success(value) => value,
            ToolOutcome::Failure(failure) => failure.into_json(),
        }
    }
}

impl ToolFailure {
    /// Render the error envelope.
    pub fn into_json(self) -> Value {
        match self {
            ToolFailure::ApiRequestFailed => json!({"error": "API request failed"}),
            ToolFailure::AddressError { details } => json!({
                "success": false,
                "error": "address_error",
                "details": details,
            }),
            ToolFailure::Exception { details } => json!({
                "error": "exception",
                "details": details,
            }),
            ToolFailure::InvalidArguments { details } => json!({
                "error": "invalid_arguments",
                "details": details,
            }),
            ToolFailure::UnknownTool { name } => json!({
                "error": "unknown_tool",
                "details": name,
            }),
        }
    }
}

impl From<ToolFailure> for ToolOutcome {
    fn from(failure: ToolFailure) -> Self {
        ToolOutcome::Failure(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_passes_value_through() {
        let value = json!([{"index": "#1", "product_id": "B09WH84T1J"}]);
        assert_eq!(ToolOutcome::Success(value.clone()).into_json(), value);
    }

    #[test]
    fn test_failure_envelopes() {
        assert_eq!(
            ToolFailure::ApiRequestFailed.into_json(),
            json!({"error": "API request failed"})
        );

        let address = ToolFailure::AddressError {
            details: json!("Missing zip code"),
        }
        .into_json();
        assert_eq!(address["success"], false);
        assert_eq!(address["error"], "address_error");
        assert_eq!(address["details"], "Missing zip code");

        let unknown = ToolOutcome::from(ToolFailure::UnknownTool {
            name: "productCheckout".to_string(),
        });
        assert!(!unknown.is_success());
        assert_eq!(unknown.into_json()["error"], "unknown_tool");
    }
}
