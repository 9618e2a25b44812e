//! Mock language models for the shopping assistant.
//!
//! This crate provides implementations of [`chat_core::LanguageModel`] that
//! never leave the process:
//! - `EchoModel` - Streams the last user message back
//! - `ScriptedModel` - Plays back a fixed list of steps and records requests
//! - `DelayedModel` - Wraps another model with artificial delay
//!
//! `FixedProvider` serves one of them under every model identifier.
//!
//! # Example
//!
//! ```rust
//! use futures::StreamExt;
//! use mock_model::{CoreMessage, EchoModel, LanguageModel, ModelEvent, ModelRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_model::ChatError> {
//!     let model = EchoModel::new();
//!     let request = ModelRequest {
//!         system: None,
//!         messages: vec![CoreMessage::user("Hello!")],
//!         tools: vec![],
//!     };
//!
//!     let mut stream = model.stream(request).await?;
//!     if let Some(Ok(ModelEvent::TextDelta(text))) = stream.next().await {
//!         println!("Response: {}", text);
//!     }
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod provider;
mod scripted;

// Re-export chat-core types for convenience
pub use chat_core::{
    async_trait, ChatError, CoreMessage, FinishReason, LanguageModel, ModelEvent, ModelProvider,
    ModelRequest, ModelStream, ToolCallPart, Usage,
};

pub use delayed::DelayedModel;
pub use echo::EchoModel;
pub use provider::FixedProvider;
pub use scripted::{ScriptedModel, ScriptedStep};
