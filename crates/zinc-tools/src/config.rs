//! Configuration for the Zinc and address parser clients.

use std::env;
use std::time::Duration;

use crate::error::ToolError;

/// Default Zinc API base URL.
pub const DEFAULT_ZINC_API_URL: &str = "https://api.zinc.io";

/// Default address parser base URL.
pub const DEFAULT_LIBPOSTAL_URL: &str = "https://libpostal.znsrv.com";

/// Default outbound request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Endpoints and credentials for the shopping tools.
#[derive(Debug, Clone)]
pub struct ZincConfig {
    /// Zinc API base URL.
    pub api_url: String,
    /// Zinc credential string, sent as Basic auth.
    pub api_creds: String,
    /// Address parser base URL.
    pub libpostal_url: String,
    /// Address parser credential string.
    pub libpostal_creds: String,
    /// Timeout for each outbound request.
    pub timeout: Duration,
}

impl Default for ZincConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_ZINC_API_URL.to_string(),
            api_creds: String::new(),
            libpostal_url: DEFAULT_LIBPOSTAL_URL.to_string(),
            libpostal_creds: String::new(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ZincConfig {
    /// Create configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `ZINCAPI_CREDS` - Zinc credentials (default: empty)
    /// - `LIBPOSTAL_CREDS` - address parser credentials (default: empty)
    /// - `ZINC_API_URL` - Zinc base URL
    /// - `LIBPOSTAL_URL` - address parser base URL
    /// - `ZINC_HTTP_TIMEOUT_SECS` - request timeout (default: 30)
    ///
    /// Missing credentials are not an error; upstream rejects the calls and
    /// the tools report that to the model.
    pub fn from_env() -> Result<Self, ToolError> {
        let timeout_secs = match env::var("ZINC_HTTP_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|_| {
                ToolError::Configuration(format!("Invalid ZINC_HTTP_TIMEOUT_SECS: {}", value))
            })?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url: env::var("ZINC_API_URL").unwrap_or_else(|_| DEFAULT_ZINC_API_URL.to_string()),
            api_creds: env::var("ZINCAPI_CREDS").unwrap_or_default(),
            libpostal_url: env::var("LIBPOSTAL_URL")
                .unwrap_or_else(|_| DEFAULT_LIBPOSTAL_URL.to_string()),
            libpostal_creds: env::var("LIBPOSTAL_CREDS").unwrap_or_default(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Point both clients at one base URL. Used with local mock servers.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_url = url.clone();
        self.libpostal_url = url;
        self
    }

    /// Set both credential strings.
    pub fn with_credentials(mut self, api: impl Into<String>, libpostal: impl Into<String>) -> Self {
        self.api_creds = api.into();
        self.libpostal_creds = libpostal.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        fn clear_all_zinc_vars() {
            for var in [
                "ZINCAPI_CREDS",
                "LIBPOSTAL_CREDS",
                "ZINC_API_URL",
                "LIBPOSTAL_URL",
                "ZINC_HTTP_TIMEOUT_SECS",
            ] {
                env::remove_var(var);
            }
        }

        clear_all_zinc_vars();
        let config = ZincConfig::from_env().unwrap();
        assert_eq!(config.api_url, DEFAULT_ZINC_API_URL);
        assert_eq!(config.libpostal_url, DEFAULT_LIBPOSTAL_URL);
        assert!(config.api_creds.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(30));

        env::set_var("ZINCAPI_CREDS", "key:");
        env::set_var("ZINC_HTTP_TIMEOUT_SECS", "5");
        let config = ZincConfig::from_env().unwrap();
        assert_eq!(config.api_creds, "key:");
        assert_eq!(config.timeout, Duration::from_secs(5));

        env::set_var("ZINC_HTTP_TIMEOUT_SECS", "soon");
        assert!(matches!(
            ZincConfig::from_env(),
            Err(ToolError::Configuration(_))
        ));

        clear_all_zinc_vars();
    }

    #[test]
    fn test_with_base_url() {
        let config = ZincConfig::default().with_base_url("http://127.0.0.1:9");
        assert_eq!(config.api_url, "http://127.0.0.1:9");
        assert_eq!(config.libpostal_url, "http://127.0.0.1:9");
    }
}
