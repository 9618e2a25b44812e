//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use chat_core::{PromptMode, DEFAULT_MAX_STEPS};

/// Default cap on one chat turn, in seconds.
pub const DEFAULT_MAX_DURATION_SECS: u64 = 60;

/// Which language model backend serves chat turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions.
    OpenAi,
    /// Offline echo model.
    Echo,
}

/// Limits applied to every chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLimits {
    /// Model steps per turn.
    pub max_steps: usize,
    /// Wall-clock cap per turn.
    pub max_duration: Duration,
}

impl Default for ChatLimits {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_duration: Duration::from_secs(DEFAULT_MAX_DURATION_SECS),
        }
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Bearer token required on `/api/*` when set.
    pub api_token: Option<String>,
    /// SQLite database URL.
    pub database_url: String,
    /// Model backend.
    pub provider: ProviderKind,
    /// Per-turn limits.
    pub limits: ChatLimits,
    /// System prompt selection.
    pub prompt_mode: PromptMode,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SHOP_API_ADDR` | Server bind address | `127.0.0.1:3000` |
    /// | `SHOP_API_TOKEN` | Bearer token for `/api/*` | (none) |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:shopper.db?mode=rwc` |
    /// | `LLM_PROVIDER` | `openai` or `echo` | `openai` |
    /// | `CHAT_MAX_STEPS` | Model steps per turn | `5` |
    /// | `CHAT_MAX_DURATION_SECS` | Turn time limit | `60` |
    /// | `CHAT_PROMPT_MODE` | `shopping`, `regular` or `canvas` | `shopping` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SHOP_API_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let api_token = env::var("SHOP_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:shopper.db?mode=rwc".to_string());

        let provider = match env::var("LLM_PROVIDER") {
            Ok(value) => parse_provider(&value)?,
            Err(_) => ProviderKind::OpenAi,
        };

        let max_steps = parse_number("CHAT_MAX_STEPS", DEFAULT_MAX_STEPS as u64)? as usize;
        if max_steps == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "CHAT_MAX_STEPS",
                value: "0".to_string(),
            });
        }
        let max_duration = Duration::from_secs(parse_number(
            "CHAT_MAX_DURATION_SECS",
            DEFAULT_MAX_DURATION_SECS,
        )?);

        let prompt_mode = match env::var("CHAT_PROMPT_MODE") {
            Ok(value) => {
                PromptMode::parse(&value).ok_or(ConfigError::UnknownPromptMode(value))?
            }
            Err(_) => PromptMode::default(),
        };

        Ok(Self {
            addr,
            api_token,
            database_url,
            provider,
            limits: ChatLimits {
                max_steps,
                max_duration,
            },
            prompt_mode,
        })
    }
}

fn parse_provider(value: &str) -> Result<ProviderKind, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "openai" => Ok(ProviderKind::OpenAi),
        "echo" => Ok(ProviderKind::Echo),
        _ => Err(ConfigError::UnknownProvider(value.to_string())),
    }
}

fn parse_number(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            name,
            value,
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SHOP_API_ADDR format")]
    InvalidAddr,

    #[error("Invalid value for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Unknown LLM_PROVIDER '{0}' (expected openai or echo)")]
    UnknownProvider(String),

    #[error("Unknown CHAT_PROMPT_MODE '{0}' (expected shopping, regular or canvas)")]
    UnknownPromptMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        fn clear_all_vars() {
            for var in [
                "SHOP_API_ADDR",
                "SHOP_API_TOKEN",
                "DATABASE_URL",
                "LLM_PROVIDER",
                "CHAT_MAX_STEPS",
                "CHAT_MAX_DURATION_SECS",
                "CHAT_PROMPT_MODE",
            ] {
                env::remove_var(var);
            }
        }

        clear_all_vars();
        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:3000");
        assert!(config.api_token.is_none());
        assert_eq!(config.database_url, "sqlite:shopper.db?mode=rwc");
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.limits, ChatLimits::default());
        assert_eq!(config.prompt_mode, PromptMode::Shopping);

        env::set_var("SHOP_API_TOKEN", "  ");
        env::set_var("LLM_PROVIDER", "Echo");
        env::set_var("CHAT_MAX_STEPS", "3");
        env::set_var("CHAT_MAX_DURATION_SECS", "15");
        env::set_var("CHAT_PROMPT_MODE", "canvas");
        let config = Config::from_env().unwrap();
        assert_eq!(config.prompt_mode, PromptMode::Canvas);
        assert!(config.api_token.is_none());
        assert_eq!(config.provider, ProviderKind::Echo);
        assert_eq!(config.limits.max_steps, 3);
        assert_eq!(config.limits.max_duration, Duration::from_secs(15));

        env::set_var("CHAT_MAX_STEPS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidNumber { name: "CHAT_MAX_STEPS", .. })
        ));

        env::set_var("CHAT_MAX_STEPS", "5");
        env::set_var("CHAT_PROMPT_MODE", "poetry");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::UnknownPromptMode(_))
        ));

        env::remove_var("CHAT_PROMPT_MODE");
        env::set_var("LLM_PROVIDER", "llama");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::UnknownProvider(_))
        ));

        env::remove_var("LLM_PROVIDER");
        env::set_var("SHOP_API_ADDR", "not-an-addr");
        assert!(matches!(Config::from_env(), Err(ConfigError::InvalidAddr)));

        clear_all_vars();
    }
}
