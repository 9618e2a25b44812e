//! Core types for the Zinc shopping assistant.
//!
//! This crate holds everything the request handler, the model providers and
//! the tool crate need to agree on:
//!
//! - [`UiMessage`] / [`CoreMessage`] - Conversation messages as posted by a
//!   client and in their normalized, persisted form
//! - [`sanitize_response_messages`] - Strips unanswered tool calls before storage
//! - [`ToolExecutor`] - Seam for running model-requested tools
//! - [`LanguageModel`] / [`ModelProvider`] - Seam for streaming model backends
//! - [`stream_text`] - The multi-step generation loop
//! - [`StreamPart`] - Line encoding of the streamed response body
//!
//! # Example
//!
//! ```rust
//! use chat_core::{convert_to_core_messages, CoreMessage, UiMessage};
//!
//! let ui: Vec<UiMessage> = serde_json::from_str(
//!     r#"[{"id": "m1", "role": "user", "content": "find me canvas sneakers"}]"#,
//! )
//! .unwrap();
//!
//! let core = convert_to_core_messages(&ui).unwrap();
//! assert_eq!(core, vec![CoreMessage::user("find me canvas sneakers")]);
//! ```

mod error;
mod generation;
mod message;
mod model;
pub mod models;
pub mod prompt;
mod sanitize;
mod stream_part;
mod tools;

pub use error::ChatError;
pub use generation::{stream_text, GenerationConfig, GenerationOutcome, DEFAULT_MAX_STEPS};
pub use message::{
    convert_to_core_messages, AssistantPart, CoreMessage, InvocationState, Role, ToolCallPart,
    ToolInvocation, ToolPart, ToolResultPart, UiMessage,
};
pub use model::{FinishReason, LanguageModel, ModelEvent, ModelProvider, ModelRequest, ModelStream, Usage};
pub use models::{find_model, ModelInfo, DEFAULT_MODEL_NAME, MODELS};
pub use prompt::{hash_prompt, shopping_prompt, PromptMode, CANVAS_PROMPT, REGULAR_PROMPT};
pub use sanitize::sanitize_response_messages;
pub use stream_part::{StreamPart, DATA_STREAM_HEADER, DATA_STREAM_VERSION};
pub use tools::{ToolDefinition, ToolExecutor, ToolRequest, ToolResult};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
