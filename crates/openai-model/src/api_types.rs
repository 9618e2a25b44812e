//! Chat completions request and streaming response types.

use chat_core::{AssistantPart, CoreMessage, ToolDefinition, ToolPart};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A chat message on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", "assistant" or "tool"
    pub role: String,
    /// Text content (absent for assistant messages that only call tools)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls made by the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    /// Call this tool message answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::text("system", content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::text("user", content)
    }

    /// Flatten core messages into wire messages.
    ///
    /// A core tool message holds several results; the wire format wants one
    /// message per result.
    pub fn from_core(messages: &[CoreMessage]) -> Vec<Self> {
        let mut wire = Vec::with_capacity(messages.len());

        for message in messages {
            match message {
                CoreMessage::System { content } => wire.push(Self::system(content.clone())),
                CoreMessage::User { content } => wire.push(Self::user(content.clone())),
                CoreMessage::Assistant { content } => {
                    let mut text = String::new();
                    let mut calls = Vec::new();
                    for part in content {
                        match part {
                            AssistantPart::Text { text: t } => text.push_str(t),
                            AssistantPart::ToolCall(call) => calls.push(WireToolCall {
                                id: call.tool_call_id.clone(),
                                call_type: "function".to_string(),
                                function: WireFunctionCall {
                                    name: call.tool_name.clone(),
                                    arguments: call.args.to_string(),
                                },
                            }),
                        }
                    }
                    // The provider rejects an assistant message with neither
                    // content nor tool calls.
                    let has_content = !text.is_empty() || calls.is_empty();
                    wire.push(Self {
                        role: "assistant".to_string(),
                        content: has_content.then_some(text),
                        tool_calls: (!calls.is_empty()).then_some(calls),
                        tool_call_id: None,
                    });
                }
                CoreMessage::Tool { content } => {
                    for part in content {
                        let ToolPart::ToolResult(result) = part;
                        wire.push(Self {
                            role: "tool".to_string(),
                            content: Some(result.result.to_string()),
                            tool_calls: None,
                            tool_call_id: Some(result.tool_call_id.clone()),
                        });
                    }
                }
            }
        }

        wire
    }
}

/// A tool call as sent back to the provider in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: WireFunctionCall,
}

/// Function name and JSON-encoded arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunctionCall {
    pub name: String,
    pub arguments: String,
}

/// A function tool offered to the model.
#[derive(Debug, Clone, Serialize)]
pub struct WireTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: WireFunction,
}

/// Function specification.
#[derive(Debug, Clone, Serialize)]
pub struct WireFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<&ToolDefinition> for WireTool {
    fn from(definition: &ToolDefinition) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: WireFunction {
                name: definition.name.clone(),
                description: definition.description.clone(),
                parameters: definition.parameters.clone(),
            },
        }
    }
}

/// Streaming options.
#[derive(Debug, Clone, Serialize)]
pub struct StreamOptions {
    pub include_usage: bool,
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,
    /// Always true: responses are consumed as server-sent events
    pub stream: bool,
    /// Ask for a final usage chunk
    pub stream_options: StreamOptions,
    /// Tools to make available
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// One streamed chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    #[serde(default)]
    pub usage: Option<ChunkUsage>,
}

/// A choice inside a chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental message content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

/// Incremental tool call; fields arrive spread over several chunks.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallDelta {
    pub index: u32,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub function: Option<FunctionDelta>,
}

/// Incremental function name and arguments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChunkUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{ToolCallPart, ToolResultPart};
    use serde_json::json;

    #[test]
    fn test_from_core_splits_tool_results() {
        let messages = vec![
            CoreMessage::user("buy #1"),
            CoreMessage::Assistant {
                content: vec![AssistantPart::ToolCall(ToolCallPart {
                    tool_call_id: "call_1".to_string(),
                    tool_name: "productDetails".to_string(),
                    args: json!({"productId": "B09WH84T1J"}),
                })],
            },
            CoreMessage::Tool {
                content: vec![ToolPart::ToolResult(ToolResultPart {
                    tool_call_id: "call_1".to_string(),
                    tool_name: "productDetails".to_string(),
                    result: json!({"title": "Sneakers"}),
                })],
            },
        ];

        let wire = ChatMessage::from_core(&messages);
        assert_eq!(wire.len(), 3);
        assert!(wire[1].content.is_none());
        let calls = wire[1].tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.arguments, r#"{"productId":"B09WH84T1J"}"#);
        assert_eq!(wire[2].role, "tool");
        assert_eq!(wire[2].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(wire[2].content.as_deref(), Some(r#"{"title":"Sneakers"}"#));
    }

    #[test]
    fn test_empty_assistant_keeps_empty_content() {
        let wire = ChatMessage::from_core(&[
            CoreMessage::user("hi"),
            CoreMessage::Assistant { content: vec![] },
        ]);

        assert_eq!(
            serde_json::to_value(&wire[1]).unwrap(),
            json!({"role": "assistant", "content": ""})
        );
    }

    #[test]
    fn test_chunk_parsing() {
        let chunk: ChatCompletionChunk = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"id":"call_1","type":"function","function":{"name":"productSearch","arguments":""}}]},"finish_reason":null}]}"#,
        )
        .unwrap();

        let call = &chunk.choices[0].delta.tool_calls.as_ref().unwrap()[0];
        assert_eq!(call.id.as_deref(), Some("call_1"));
        assert_eq!(
            call.function.as_ref().unwrap().name.as_deref(),
            Some("productSearch")
        );
    }
}
