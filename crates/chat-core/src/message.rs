//! Conversation message types.
//!
//! Clients post [`UiMessage`]s: plain text plus the tool invocations the UI
//! has seen. Everything downstream (model providers, persistence) works on
//! [`CoreMessage`]s, where tool calls and tool results are explicit parts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ChatError;

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    /// Client-side annotations; never sent to the model.
    Data,
    /// Legacy function result; never sent to the model.
    Function,
}

/// Lifecycle state of a tool invocation as tracked by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvocationState {
    PartialCall,
    Call,
    Result,
}

/// A tool invocation attached to a UI message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    pub state: InvocationState,
    pub tool_call_id: String,
    pub tool_name: String,
    #[serde(default)]
    pub args: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// A message as sent by the chat client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_invocations: Vec<ToolInvocation>,
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallPart {
    pub tool_call_id: String,
    pub tool_name: String,
    pub args: Value,
}

/// The result of a tool call, fed back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultPart {
    pub tool_call_id: String,
    pub tool_name: String,
    pub result: Value,
}

/// Content part of an assistant message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AssistantPart {
    Text { text: String },
    ToolCall(ToolCallPart),
}

/// Content part of a tool message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ToolPart {
    ToolResult(ToolResultPart),
}

impl ToolPart {
    /// The id of the tool call this part answers.
    pub fn tool_call_id(&self) -> &str {
        match self {
            ToolPart::ToolResult(part) => &part.tool_call_id,
        }
    }
}

/// A normalized conversation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum CoreMessage {
    System { content: String },
    User { content: String },
    Assistant { content: Vec<AssistantPart> },
    Tool { content: Vec<ToolPart> },
}

impl CoreMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        CoreMessage::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        CoreMessage::User {
            content: content.into(),
        }
    }

    /// Create an assistant message holding only text.
    pub fn assistant_text(text: impl Into<String>) -> Self {
        CoreMessage::Assistant {
            content: vec![AssistantPart::Text { text: text.into() }],
        }
    }

    /// The author role.
    pub fn role(&self) -> Role {
        match self {
            CoreMessage::System { .. } => Role::System,
            CoreMessage::User { .. } => Role::User,
            CoreMessage::Assistant { .. } => Role::Assistant,
            CoreMessage::Tool { .. } => Role::Tool,
        }
    }

    /// Whether the message carries no content at all.
    pub fn is_empty(&self) -> bool {
        match self {
            CoreMessage::System { content } | CoreMessage::User { content } => content.is_empty(),
            CoreMessage::Assistant { content } => content.is_empty(),
            CoreMessage::Tool { content } => content.is_empty(),
        }
    }
}

/// Convert client messages into core messages.
///
/// Assistant messages with tool invocations expand into an assistant message
/// carrying the tool calls followed by a tool message carrying their results.
/// Every invocation must already be resolved.
pub fn convert_to_core_messages(messages: &[UiMessage]) -> Result<Vec<CoreMessage>, ChatError> {
    let mut core = Vec::with_capacity(messages.len());

    for message in messages {
        match message.role {
            Role::System => core.push(CoreMessage::system(message.content.clone())),
            Role::User => core.push(CoreMessage::user(message.content.clone())),
            Role::Assistant => {
                let mut parts = Vec::new();
                if !message.content.is_empty() {
                    parts.push(AssistantPart::Text {
                        text: message.content.clone(),
                    });
                }

                if message.tool_invocations.is_empty() {
                    core.push(CoreMessage::Assistant { content: parts });
                    continue;
                }

                let mut results = Vec::with_capacity(message.tool_invocations.len());
                for invocation in &message.tool_invocations {
                    parts.push(AssistantPart::ToolCall(ToolCallPart {
                        tool_call_id: invocation.tool_call_id.clone(),
                        tool_name: invocation.tool_name.clone(),
                        args: invocation.args.clone(),
                    }));

                    let result = match (&invocation.state, &invocation.result) {
                        (InvocationState::Result, Some(result)) => result.clone(),
                        _ => {
                            return Err(ChatError::MessageConversion(format!(
                                "tool invocation {} ({}) has no result",
                                invocation.tool_call_id, invocation.tool_name
                            )))
                        }
                    };

                    results.push(ToolPart::ToolResult(ToolResultPart {
                        tool_call_id: invocation.tool_call_id.clone(),
                        tool_name: invocation.tool_name.clone(),
                        result,
                    }));
                }

                core.push(CoreMessage::Assistant { content: parts });
                core.push(CoreMessage::Tool { content: results });
            }
            Role::Data | Role::Function => {
                debug!("Skipping {:?} message", message.role);
            }
            Role::Tool => {
                return Err(ChatError::MessageConversion(
                    "tool messages cannot be sent by the client".to_string(),
                ))
            }
        }
    }

    Ok(core)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ui(value: Value) -> Vec<UiMessage> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_convert_plain_text() {
        let messages = ui(json!([
            {"id": "1", "role": "user", "content": "hello"},
            {"id": "2", "role": "assistant", "content": "hi, what are you looking for?"}
        ]));

        let core = convert_to_core_messages(&messages).unwrap();
        assert_eq!(
            core,
            vec![
                CoreMessage::user("hello"),
                CoreMessage::assistant_text("hi, what are you looking for?"),
            ]
        );
    }

    #[test]
    fn test_convert_resolved_invocations() {
        let messages = ui(json!([
            {"role": "user", "content": "canvas sneakers"},
            {
                "role": "assistant",
                "content": "",
                "toolInvocations": [{
                    "state": "result",
                    "toolCallId": "call_1",
                    "toolName": "productSearch",
                    "args": {"searchTerm": "canvas sneakers"},
                    "result": [{"index": "#1"}]
                }]
            }
        ]));

        let core = convert_to_core_messages(&messages).unwrap();
        assert_eq!(core.len(), 3);
        assert_eq!(core[1].role(), Role::Assistant);
        match &core[1] {
            CoreMessage::Assistant { content } => {
                assert_eq!(content.len(), 1);
                assert!(matches!(&content[0], AssistantPart::ToolCall(call) if call.tool_name == "productSearch"));
            }
            other => panic!("unexpected message: {:?}", other),
        }
        match &core[2] {
            CoreMessage::Tool { content } => {
                assert_eq!(content[0].tool_call_id(), "call_1");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_convert_skips_data_messages() {
        let messages = ui(json!([
            {"role": "user", "content": "find a mug"},
            {"role": "data", "content": "{\"cart\":[]}"},
            {"role": "function", "content": "legacy"},
            {"role": "assistant", "content": "Which color?"}
        ]));

        let core = convert_to_core_messages(&messages).unwrap();
        assert_eq!(
            core,
            vec![
                CoreMessage::user("find a mug"),
                CoreMessage::assistant_text("Which color?"),
            ]
        );
    }

    #[test]
    fn test_convert_rejects_unresolved_invocation() {
        let messages = ui(json!([{
            "role": "assistant",
            "content": "",
            "toolInvocations": [{
                "state": "call",
                "toolCallId": "call_9",
                "toolName": "productDetails",
                "args": {"productId": "B09WH84T1J"}
            }]
        }]));

        let result = convert_to_core_messages(&messages);
        assert!(matches!(result, Err(ChatError::MessageConversion(_))));
    }

    #[test]
    fn test_core_message_wire_format() {
        let message = CoreMessage::Assistant {
            content: vec![AssistantPart::ToolCall(ToolCallPart {
                tool_call_id: "call_1".to_string(),
                tool_name: "productSearch".to_string(),
                args: json!({"searchTerm": "tea"}),
            })],
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "role": "assistant",
                "content": [{
                    "type": "tool-call",
                    "toolCallId": "call_1",
                    "toolName": "productSearch",
                    "args": {"searchTerm": "tea"}
                }]
            })
        );

        let back: CoreMessage = serde_json::from_value(value).unwrap();
        assert_eq!(back, message);
    }
}
