//! HTTP client for the Zinc product API.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::ZincConfig;
use crate::error::ToolError;

/// Only retailer the tools query.
pub const RETAILER: &str = "amazon";

/// Product information endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductMethod {
    Details,
    Variants,
    Offers,
    Reviews,
}

impl ProductMethod {
    /// Path segment for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductMethod::Details => "details",
            ProductMethod::Variants => "variants",
            ProductMethod::Offers => "offers",
            ProductMethod::Reviews => "reviews",
        }
    }
}

/// `Basic` header value for a raw credential string.
///
/// The whole string is encoded as is; it usually already has the
/// `user:password` shape. Characters are encoded as latin1, one byte per
/// UTF-16 unit, which only differs from UTF-8 for non-ASCII credentials.
pub(crate) fn basic_auth(credentials: &str) -> String {
    let bytes: Vec<u8> = credentials.encode_utf16().map(|unit| unit as u8).collect();
    format!("Basic {}", STANDARD.encode(bytes))
}

pub(crate) fn http_client(config: &ZincConfig) -> Result<Client, ToolError> {
    Ok(Client::builder().timeout(config.timeout).build()?)
}

/// Client for the AI-oriented Zinc endpoints.
#[derive(Debug, Clone)]
pub struct ZincClient {
    http: Client,
    base_url: String,
    authorization: String,
}

impl ZincClient {
    /// Create a client from configuration.
    pub fn new(config: &ZincConfig) -> Result<Self, ToolError> {
        Ok(Self {
            http: http_client(config)?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            authorization: basic_auth(&config.api_creds),
        })
    }

    /// Search the retailer catalogue.
    pub async fn search(&self, query: &str, limit: u32, page: u32) -> Result<Value, ToolError> {
        let url = format!("{}/v1/ai/search", self.base_url);
        debug!("Searching {} for '{}'", RETAILER, query);

        let limit = limit.to_string();
        let page = page.to_string();
        let request = self.http.get(&url).query(&[
            ("retailer", RETAILER),
            ("query", query),
            ("limit", limit.as_str()),
            ("page", page.as_str()),
        ]);

        self.send(request).await
    }

    /// Fetch one kind of product information.
    pub async fn product_info(
        &self,
        method: ProductMethod,
        product_id: &str,
    ) -> Result<Value, ToolError> {
        let url = format!(
            "{}/v1/ai/products/{}/{}",
            self.base_url,
            urlencoding::encode(product_id),
            method.as_str()
        );
        debug!("Fetching product {} for {}", method.as_str(), product_id);

        let request = self.http.get(&url).query(&[("retailer", RETAILER)]);
        self.send(request).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ToolError> {
        let response = request
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Zinc response: {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}
