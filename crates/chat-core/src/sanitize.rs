//! Response message sanitization before persistence.

use std::collections::HashSet;

use crate::message::{AssistantPart, CoreMessage};

/// Remove tool calls that never received a result.
///
/// A tool-call part survives only if some tool message in `messages` carries
/// a result with the same call id. Empty text parts are dropped, and so is
/// any message left without content.
pub fn sanitize_response_messages(messages: Vec<CoreMessage>) -> Vec<CoreMessage> {
    let answered: HashSet<String> = messages
        .iter()
        .filter_map(|message| match message {
            CoreMessage::Tool { content } => Some(content),
            _ => None,
        })
        .flatten()
        .map(|part| part.tool_call_id().to_string())
        .collect();

    messages
        .into_iter()
        .map(|message| match message {
            CoreMessage::Assistant { content } => CoreMessage::Assistant {
                content: content
                    .into_iter()
                    .filter(|part| match part {
                        AssistantPart::Text { text } => !text.is_empty(),
                        AssistantPart::ToolCall(call) => answered.contains(&call.tool_call_id),
                    })
                    .collect(),
            },
            other => other,
        })
        .filter(|message| !message.is_empty())
        .collect()
}
