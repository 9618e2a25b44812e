//! Application state shared across handlers.

use std::sync::Arc;

use chat_core::{ModelProvider, PromptMode, ToolExecutor};
use database::Database;

use crate::config::ChatLimits;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Resolves model identifiers to models.
    pub models: Arc<dyn ModelProvider>,
    /// Runs tool calls.
    pub tools: Arc<dyn ToolExecutor>,
    /// Per-turn limits.
    pub limits: ChatLimits,
    /// Bearer token for `/api/*`, if required.
    pub api_token: Option<String>,
    /// System prompt selection.
    pub prompt_mode: PromptMode,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        db: Database,
        models: Arc<dyn ModelProvider>,
        tools: Arc<dyn ToolExecutor>,
        limits: ChatLimits,
    ) -> Self {
        Self {
            db,
            models,
            tools,
            limits,
            api_token: None,
            prompt_mode: PromptMode::default(),
        }
    }

    /// Require `token` on every `/api/*` request.
    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token;
        self
    }

    /// Select the system prompt used for chat turns.
    pub fn with_prompt_mode(mut self, mode: PromptMode) -> Self {
        self.prompt_mode = mode;
        self
    }
}
