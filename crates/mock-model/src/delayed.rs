//! Delayed model implementation - wraps another model with artificial delay.

use std::time::Duration;

use async_trait::async_trait;
use chat_core::{ChatError, LanguageModel, ModelRequest, ModelStream};
use tokio::time::sleep;

/// A model that wraps another model and waits before each step.
///
/// Useful for testing turn time limits and simulating provider latency.
pub struct DelayedModel<M: LanguageModel> {
    inner: M,
    delay: Duration,
}

impl<M: LanguageModel> DelayedModel<M> {
    /// Create a new DelayedModel wrapping the given model with the specified delay.
    pub fn new(inner: M, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a model with a delay in milliseconds.
    pub fn with_millis(inner: M, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<M: LanguageModel> LanguageModel for DelayedModel<M> {
    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    async fn stream(&self, request: ModelRequest) -> Result<ModelStream, ChatError> {
        sleep(self.delay).await;
        self.inner.stream(request).await
    }
}
