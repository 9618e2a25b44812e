//! HTTP API for the Zinc shopping assistant.
//!
//! Serves the streaming chat endpoint (`POST /api/chat`) plus a small
//! history API over the stored chats. Chat responses use the line-based
//! data stream protocol from [`chat_core::StreamPart`].

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ChatLimits, Config, ConfigError, ProviderKind};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
