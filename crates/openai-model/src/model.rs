//! Model and provider implementations.

use std::sync::Arc;

use async_trait::async_trait;
use chat_core::{ChatError, LanguageModel, ModelProvider, ModelRequest, ModelStream};
use reqwest::Client;
use reqwest_eventsource::RequestBuilderExt;
use tracing::{debug, info};

use crate::api_types::{ChatCompletionRequest, ChatMessage, StreamOptions, WireTool};
use crate::config::OpenAiConfig;
use crate::stream::ChunkStream;

/// A single chat model served by an OpenAI-compatible endpoint.
pub struct OpenAiModel {
    client: Client,
    config: OpenAiConfig,
    model_id: String,
}

impl OpenAiModel {
    /// Create a model bound to `model_id`.
    pub fn new(config: OpenAiConfig, model_id: impl Into<String>) -> Result<Self, ChatError> {
        // No request timeout: completions are streamed for as long as the
        // model keeps writing.
        let client = Client::builder()
            .build()
            .map_err(|e| ChatError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            model_id: model_id.into(),
        })
    }

    fn build_request(&self, request: ModelRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = request.system {
            messages.push(ChatMessage::system(system));
        }
        messages.extend(ChatMessage::from_core(&request.messages));

        ChatCompletionRequest {
            model: self.model_id.clone(),
            messages,
            stream: true,
            stream_options: StreamOptions {
                include_usage: true,
            },
            tools: request.tools.iter().map(WireTool::from).collect(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn stream(&self, request: ModelRequest) -> Result<ModelStream, ChatError> {
        let body = self.build_request(request);
        debug!(
            "Starting completion: model={}, messages={}, tools={}",
            body.model,
            body.messages.len(),
            body.tools.len()
        );

        let event_source = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .eventsource()
            .map_err(|e| ChatError::Network(format!("Failed to open completion stream: {}", e)))?;

        Ok(Box::pin(ChunkStream::new(event_source)))
    }
}

/// Hands out [`OpenAiModel`]s that share one configuration.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create a provider from explicit configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        Self { config }
    }

    /// Create a provider from environment variables.
    pub fn from_env() -> Result<Self, ChatError> {
        let config = OpenAiConfig::from_env()?;
        info!("OpenAI provider configured for {}", config.api_url);
        Ok(Self::new(config))
    }
}

impl ModelProvider for OpenAiProvider {
    fn language_model(&self, api_identifier: &str) -> Result<Arc<dyn LanguageModel>, ChatError> {
        Ok(Arc::new(OpenAiModel::new(self.config.clone(), api_identifier)?))
    }
}
