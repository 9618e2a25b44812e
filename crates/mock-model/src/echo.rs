//! Echo model implementation - streams the last user message back.

use async_trait::async_trait;
use chat_core::{
    ChatError, CoreMessage, FinishReason, LanguageModel, ModelEvent, ModelRequest, ModelStream,
    Usage,
};
use futures::stream;

/// A model that answers every turn with the last user message.
///
/// Useful for running the server end to end without provider credentials.
/// It never calls tools.
#[derive(Debug, Clone, Default)]
pub struct EchoModel {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoModel {
    /// Create a new EchoModel with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoModel with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_model::EchoModel;
    ///
    /// let model = EchoModel::with_prefix("Echo: ");
    /// // Will respond with "Echo: <last user message>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn reply(&self, messages: &[CoreMessage]) -> String {
        let last = messages
            .iter()
            .rev()
            .find_map(|m| match m {
                CoreMessage::User { content } => Some(content.as_str()),
                _ => None,
            })
            .unwrap_or_default();

        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, last),
            None => last.to_string(),
        }
    }
}

#[async_trait]
impl LanguageModel for EchoModel {
    fn model_id(&self) -> &str {
        "echo"
    }

    async fn stream(&self, request: ModelRequest) -> Result<ModelStream, ChatError> {
        let text = self.reply(&request.messages);
        let completion_tokens = text.split_whitespace().count() as u32;

        let mut events = Vec::new();
        if !text.is_empty() {
            events.push(Ok(ModelEvent::TextDelta(text)));
        }
        events.push(Ok(ModelEvent::Finish {
            reason: FinishReason::Stop,
            usage: Usage {
                prompt_tokens: 0,
                completion_tokens,
            },
        }));

        Ok(Box::pin(stream::iter(events)))
    }
}
