//! Configuration for the OpenAI-compatible provider.

use chat_core::ChatError;
use std::env;

/// Configuration for [`crate::OpenAiModel`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Provider base URL (without `/v1`).
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Maximum tokens per step.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            max_tokens: None,
            temperature: None,
        }
    }
}

impl OpenAiConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `OPENAI_MAX_TOKENS` - Max tokens per step (default: provider default)
    /// - `OPENAI_TEMPERATURE` - Temperature (default: provider default)
    pub fn from_env() -> Result<Self, ChatError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ChatError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let api_url =
            env::var("OPENAI_API_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok());

        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok());

        Ok(Self {
            api_url,
            api_key,
            max_tokens,
            temperature,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> OpenAiConfigBuilder {
        OpenAiConfigBuilder::default()
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Builder for OpenAiConfig.
#[derive(Debug, Default)]
pub struct OpenAiConfigBuilder {
    config: OpenAiConfig,
}

impl OpenAiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenAiConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.is_none());
    }

    #[test]
    fn test_builder_all_options() {
        let config = OpenAiConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com/")
            .max_tokens(512)
            .temperature(0.5)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(
            config.completions_url(),
            "https://custom.api.com/v1/chat/completions"
        );
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        fn clear_all_openai_vars() {
            std::env::remove_var("OPENAI_API_KEY");
            std::env::remove_var("OPENAI_API_URL");
            std::env::remove_var("OPENAI_MAX_TOKENS");
            std::env::remove_var("OPENAI_TEMPERATURE");
        }

        clear_all_openai_vars();
        match OpenAiConfig::from_env() {
            Err(ChatError::Configuration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        std::env::set_var("OPENAI_API_KEY", "test-env-key");
        std::env::set_var("OPENAI_API_URL", "http://localhost:9999");
        std::env::set_var("OPENAI_MAX_TOKENS", "2048");
        std::env::set_var("OPENAI_TEMPERATURE", "0.2");

        let config = OpenAiConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, "http://localhost:9999");
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.2));

        clear_all_openai_vars();
    }
}
