//! OpenAI-compatible chat model.
//!
//! This crate implements [`chat_core::LanguageModel`] on top of the
//! `/v1/chat/completions` endpoint with `stream: true`. Server-sent events
//! are assembled into text deltas, complete tool calls and a finish event.
//!
//! # Usage
//!
//! ```rust,no_run
//! use chat_core::ModelProvider;
//! use openai_model::OpenAiProvider;
//!
//! # fn main() -> Result<(), chat_core::ChatError> {
//! let provider = OpenAiProvider::from_env()?;
//! let model = provider.language_model("gpt-4o-mini")?;
//! assert_eq!(model.model_id(), "gpt-4o-mini");
//! # Ok(())
//! # }
//! ```

mod api_types;
mod config;
mod model;
mod stream;

pub use config::{OpenAiConfig, OpenAiConfigBuilder};
pub use model::{OpenAiModel, OpenAiProvider};
