//! Product details, variants and reviews tools.
//!
//! All three take a single product id and forward the matching Zinc
//! endpoint's response.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::PRODUCT_ID_LEN;
use crate::client::{ProductMethod, ZincClient};
use crate::error::ToolError;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::tool::{require_exact_len, Tool, ToolArgs};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductIdArgs {
    product_id: String,
}

fn product_id_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "productId": {
                "type": "string",
                "minLength": PRODUCT_ID_LEN,
                "maxLength": PRODUCT_ID_LEN,
            },
        },
        "required": ["productId"],
        "additionalProperties": false,
    })
}

/// Shared body of the product information tools.
struct ProductLookup {
    client: ZincClient,
    method: ProductMethod,
}

impl ProductLookup {
    async fn run(&self, args: ToolArgs) -> Result<ToolOutcome, ToolError> {
        let args: ProductIdArgs = args.parse()?;
        require_exact_len("productId", &args.product_id, PRODUCT_ID_LEN)?;

        info!("Fetching {} for {}", self.method.as_str(), args.product_id);
        match self.client.product_info(self.method, &args.product_id).await {
            Ok(value) => Ok(ToolOutcome::Success(value)),
            Err(e) => {
                warn!(
                    "Product {} lookup for {} failed: {}",
                    self.method.as_str(),
                    args.product_id,
                    e
                );
                Ok(ToolFailure::ApiRequestFailed.into())
            }
        }
    }
}

/// Extra information about one product.
pub struct ProductDetails(ProductLookup);

impl ProductDetails {
    pub fn new(client: ZincClient) -> Self {
        Self(ProductLookup {
            client,
            method: ProductMethod::Details,
        })
    }
}

#[async_trait]
impl Tool for ProductDetails {
    fn name(&self) -> &str {
        "productDetails"
    }

    fn description(&self) -> &str {
        "Return extra information about a product on Amazon"
    }

    fn parameters(&self) -> Value {
        product_id_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutcome, ToolError> {
        self.0.run(args).await
    }
}

/// Variants (size, colour, ...) of a parent product.
pub struct ProductVariants(ProductLookup);

impl ProductVariants {
    pub fn new(client: ZincClient) -> Self {
        Self(ProductLookup {
            client,
            method: ProductMethod::Variants,
        })
    }
}

#[async_trait]
impl Tool for ProductVariants {
    fn name(&self) -> &str {
        "productVariants"
    }

    fn description(&self) -> &str {
        "Return a list of all available variants on Amazon for a given parent product ID"
    }

    fn parameters(&self) -> Value {
        product_id_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutcome, ToolError> {
        self.0.run(args).await
    }
}

/// A selection of reviews for a product.
pub struct ProductReviews(ProductLookup);

impl ProductReviews {
    pub fn new(client: ZincClient) -> Self {
        Self(ProductLookup {
            client,
            method: ProductMethod::Reviews,
        })
    }
}

#[async_trait]
impl Tool for ProductReviews {
    fn name(&self) -> &str {
        "productReviews"
    }

    fn description(&self) -> &str {
        "Return a list of some interesting reviews for the given product"
    }

    fn parameters(&self) -> Value {
        product_id_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutcome, ToolError> {
        self.0.run(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZincConfig;
    use crate::test_support::{closed_port_url, serve};
    use axum::extract::Path;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn client_for(url: String) -> ZincClient {
        ZincClient::new(&ZincConfig::default().with_base_url(url)).unwrap()
    }

    fn counting_router(hits: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/v1/ai/products/:id/:method",
            get(move |Path((id, method)): Path<(String, String)>| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"product_id": id, "method": method}))
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_each_tool_hits_its_method() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = serve(counting_router(hits.clone())).await;
        let args = || ToolArgs::from_value(json!({"productId": "B09WH84T1J"})).unwrap();

        let details = ProductDetails::new(client_for(url.clone()));
        let variants = ProductVariants::new(client_for(url.clone()));
        let reviews = ProductReviews::new(client_for(url));

        for (tool, method) in [
            (&details as &dyn Tool, "details"),
            (&variants as &dyn Tool, "variants"),
            (&reviews as &dyn Tool, "reviews"),
        ] {
            let outcome = tool.execute(args()).await.unwrap();
            assert_eq!(
                outcome,
                ToolOutcome::Success(json!({"product_id": "B09WH84T1J", "method": method}))
            );
        }
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_wrong_length_id_never_calls_upstream() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = serve(counting_router(hits.clone())).await;
        let tool = ProductDetails::new(client_for(url));

        for id in ["B09WH84T1", "B09WH84T1JX", ""] {
            let args = ToolArgs::from_value(json!({"productId": id})).unwrap();
            let err = tool.execute(args).await.unwrap_err();
            assert!(err.is_argument_error());
        }
        let err = tool.execute(ToolArgs::default()).await.unwrap_err();
        assert!(err.is_argument_error());

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_network_failure_reports_error() {
        let tool = ProductReviews::new(client_for(closed_port_url().await));
        let args = ToolArgs::from_value(json!({"productId": "B09WH84T1J"})).unwrap();

        let outcome = tool.execute(args).await.unwrap();
        assert_eq!(outcome.into_json(), json!({"error": "API request failed"}));
    }

    #[test]
    fn test_schema_bounds_product_id() {
        let schema = product_id_schema();
        assert_eq!(schema["properties"]["productId"]["minLength"], 10);
        assert_eq!(schema["properties"]["productId"]["maxLength"], 10);
    }
}
