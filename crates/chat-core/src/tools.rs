//! Tool execution support for the generation loop.
//!
//! The model asks for tools by name with a JSON argument object. A
//! [`ToolExecutor`] owns the dispatch table, validates the arguments and
//! always answers with a [`ToolResult`]: failures are data for the model,
//! never errors for the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::{ToolCallPart, ToolResultPart};

/// Description of a tool offered to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name the model uses to call the tool.
    pub name: String,
    /// What the tool does, shown to the model.
    pub description: String,
    /// JSON Schema of the argument object.
    pub parameters: Value,
}

/// A request to execute a tool.
#[derive(Debug, Clone)]
pub struct ToolRequest {
    /// Unique ID for this tool call.
    pub id: String,
    /// Name of the tool to execute.
    pub name: String,
    /// Arguments as sent by the model.
    pub arguments: Value,
}

impl ToolRequest {
    /// Create a request.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

impl From<&ToolCallPart> for ToolRequest {
    fn from(call: &ToolCallPart) -> Self {
        Self::new(&call.tool_call_id, &call.tool_name, call.args.clone())
    }
}

/// Result of a tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The tool call ID this result corresponds to.
    pub tool_call_id: String,
    /// Name of the tool that ran.
    pub tool_name: String,
    /// JSON payload sent back to the model.
    pub result: Value,
    /// Whether the tool execution succeeded.
    pub success: bool,
}

impl ToolResult {
    /// Create a successful tool result.
    pub fn success(request: &ToolRequest, result: Value) -> Self {
        Self {
            tool_call_id: request.id.clone(),
            tool_name: request.name.clone(),
            result,
            success: true,
        }
    }

    /// Create a failed tool result carrying an error envelope.
    pub fn failure(request: &ToolRequest, envelope: Value) -> Self {
        Self {
            tool_call_id: request.id.clone(),
            tool_name: request.name.clone(),
            result: envelope,
            success: false,
        }
    }
}

impl From<ToolResult> for ToolResultPart {
    fn from(result: ToolResult) -> Self {
        ToolResultPart {
            tool_call_id: result.tool_call_id,
            tool_name: result.tool_name,
            result: result.result,
        }
    }
}

/// Trait for executing tools called by the model.
///
/// # Example
///
/// ```ignore
/// use chat_core::{async_trait, ToolDefinition, ToolExecutor, ToolRequest, ToolResult};
///
/// struct Clock;
///
/// #[async_trait]
/// impl ToolExecutor for Clock {
///     async fn execute(&self, request: ToolRequest) -> ToolResult {
///         ToolResult::success(&request, serde_json::json!({"now": "noon"}))
///     }
///
///     fn definitions(&self) -> Vec<ToolDefinition> {
///         vec![]
///     }
/// }
/// ```
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool and return the result.
    async fn execute(&self, request: ToolRequest) -> ToolResult;

    /// The tools offered to the model, in declaration order.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Names of the tools this executor will run.
    fn supported_tools(&self) -> Vec<String> {
        self.definitions().into_iter().map(|d| d.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_result_success() {
        let request = ToolRequest::new("call-123", "productSearch", json!({}));
        let result = ToolResult::success(&request, json!([1, 2]));
        assert!(result.success);
        assert_eq!(result.tool_call_id, "call-123");
        assert_eq!(result.tool_name, "productSearch");
    }

    #[test]
    fn test_tool_result_into_part() {
        let request = ToolRequest::new("call-456", "productDetails", json!({}));
        let part: ToolResultPart =
            ToolResult::failure(&request, json!({"error": "API request failed"})).into();
        assert_eq!(part.tool_call_id, "call-456");
        assert_eq!(part.result["error"], "API request failed");
    }

    #[test]
    fn test_request_from_call() {
        let call = ToolCallPart {
            tool_call_id: "id-1".to_string(),
            tool_name: "productReviews".to_string(),
            args: json!({"productId": "B09WH84T1J"}),
        };
        let request = ToolRequest::from(&call);
        assert_eq!(request.id, "id-1");
        assert_eq!(request.arguments["productId"], "B09WH84T1J");
    }
}
