//! Client for the shipping address parser.

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::{basic_auth, http_client};
use crate::config::ZincConfig;
use crate::error::ToolError;

/// Structured address as returned by the parser.
///
/// Used for logging; the tool forwards the parser's JSON untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ZincAddress {
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Result of checking a free-form address.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressCheck {
    /// The parser accepted the address; holds its response verbatim.
    Parsed(Value),
    /// The parser reported a problem; holds its `error` field.
    Rejected(Value),
}

/// Client for the address parser service.
#[derive(Debug, Clone)]
pub struct AddressParser {
    http: Client,
    url: String,
    authorization: String,
}

impl AddressParser {
    /// Create a parser client from configuration.
    pub fn new(config: &ZincConfig) -> Result<Self, ToolError> {
        Ok(Self {
            http: http_client(config)?,
            url: format!(
                "{}/zinc_parse_address",
                config.libpostal_url.trim_end_matches('/')
            ),
            authorization: basic_auth(&config.libpostal_creds),
        })
    }

    /// Parse and validate `address`.
    ///
    /// The response body is read whatever the status: rejections arrive as
    /// JSON with an `error` field.
    pub async fn parse(&self, address: &str) -> Result<AddressCheck, ToolError> {
        let response = self
            .http
            .post(&self.url)
            .header(AUTHORIZATION, &self.authorization)
            .json(&json!({ "address": address }))
            .send()
            .await?;

        debug!("Address parser responded with {}", response.status());
        let body: Value = response.json().await?;

        if !body.is_object() {
            return Err(ToolError::ExecutionFailed(
                "address parser returned a non-object response".to_string(),
            ));
        }

        match body.get("error") {
            Some(error) if is_truthy(error) => Ok(AddressCheck::Rejected(error.clone())),
            _ => Ok(AddressCheck::Parsed(body)),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
