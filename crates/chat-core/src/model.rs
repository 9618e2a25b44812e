//! Language model seam.
//!
//! A [`LanguageModel`] runs one generation step: it receives the system
//! prompt, the conversation and the tool definitions, and streams back text
//! deltas, complete tool calls and a final finish event.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::message::{CoreMessage, ToolCallPart};
use crate::tools::ToolDefinition;

/// Why a generation step stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Error,
    #[default]
    Other,
    Unknown,
}

/// Token usage for a step or a whole turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl Usage {
    /// Add another usage record to this one.
    pub fn add(&mut self, other: Usage) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.completion_tokens = self.completion_tokens.saturating_add(other.completion_tokens);
    }
}

/// One event of a streamed generation step.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// A chunk of assistant text.
    TextDelta(String),
    /// A fully assembled tool call.
    ToolCall(ToolCallPart),
    /// The step is over.
    Finish { reason: FinishReason, usage: Usage },
}

/// Input for one generation step.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// System instructions.
    pub system: Option<String>,
    /// Conversation so far.
    pub messages: Vec<CoreMessage>,
    /// Tools the model may call.
    pub tools: Vec<ToolDefinition>,
}

/// Stream of events for one generation step.
pub type ModelStream = BoxStream<'static, Result<ModelEvent, ChatError>>;

/// A streaming chat model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Provider-side model identifier.
    fn model_id(&self) -> &str;

    /// Start one generation step.
    async fn stream(&self, request: ModelRequest) -> Result<ModelStream, ChatError>;
}

/// Resolves a provider model identifier into a usable model.
pub trait ModelProvider: Send + Sync {
    /// Build the model for `api_identifier`.
    fn language_model(&self, api_identifier: &str) -> Result<Arc<dyn LanguageModel>, ChatError>;
}
