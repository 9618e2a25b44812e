//! Data stream protocol for streamed chat responses.
//!
//! Each part is one line: a single-character type code, a colon, a JSON
//! value, and a newline. Clients parse the body line by line as it arrives.

use serde_json::{json, Value};

use crate::model::{FinishReason, Usage};

/// Response header announcing the data stream protocol.
pub const DATA_STREAM_HEADER: &str = "x-vercel-ai-data-stream";

/// Protocol version sent in [`DATA_STREAM_HEADER`].
pub const DATA_STREAM_VERSION: &str = "v1";

/// One part of a streamed chat response.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamPart {
    /// Assistant text delta.
    Text(String),
    /// The model requested a tool.
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        args: Value,
    },
    /// A tool finished.
    ToolResult { tool_call_id: String, result: Value },
    /// A generation step finished.
    FinishStep {
        finish_reason: FinishReason,
        usage: Usage,
        is_continued: bool,
    },
    /// The whole assistant turn finished.
    FinishMessage { finish_reason: FinishReason, usage: Usage },
    /// The turn failed.
    Error(String),
}

impl StreamPart {
    /// Protocol type code.
    pub fn code(&self) -> char {
        match self {
            StreamPart::Text(_) => '0',
            StreamPart::Error(_) => '3',
            StreamPart::ToolCall { .. } => '9',
            StreamPart::ToolResult { .. } => 'a',
            StreamPart::FinishMessage { .. } => 'd',
            StreamPart::FinishStep { .. } => 'e',
        }
    }

    fn payload(&self) -> Value {
        match self {
            StreamPart::Text(text) => Value::String(text.clone()),
            StreamPart::Error(message) => Value::String(message.clone()),
            StreamPart::ToolCall {
                tool_call_id,
                tool_name,
                args,
            } => json!({
                "toolCallId": tool_call_id,
                "toolName": tool_name,
                "args": args,
            }),
            StreamPart::ToolResult {
                tool_call_id,
                result,
            } => json!({
                "toolCallId": tool_call_id,
                "result": result,
            }),
            StreamPart::FinishStep {
                finish_reason,
                usage,
                is_continued,
            } => json!({
                "finishReason": finish_reason,
                "usage": usage,
                "isContinued": is_continued,
            }),
            StreamPart::FinishMessage {
                finish_reason,
                usage,
            } => json!({
                "finishReason": finish_reason,
                "usage": usage,
            }),
        }
    }

    /// Encode as a protocol line, trailing newline included.
    pub fn encode(&self) -> String {
        format!("{}:{}\n", self.code(), self.payload())
    }
}
