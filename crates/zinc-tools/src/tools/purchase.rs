//! Product purchase tool (demo mode).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::PRODUCT_ID_LEN;
use crate::address::{AddressCheck, AddressParser, ZincAddress};
use crate::error::ToolError;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::tool::{require_exact_count, require_exact_len, Tool, ToolArgs};

/// Note attached to every accepted purchase.
pub const DEMO_NOTE: &str = "Purchase in progress (demo mode, not live)";

#[derive(Debug, Deserialize)]
struct PurchaseArgs {
    products: Vec<String>,
    shipping_address: String,
}

/// Validates a shipping address and reports a pending purchase.
///
/// No order is placed: the tool only checks the address with the parser
/// and echoes the structured result back.
///
/// # Parameters
///
/// - `products` (required): exactly one product id.
/// - `shipping_address` (required): free-form address.
pub struct ProductPurchase {
    parser: AddressParser,
}

impl ProductPurchase {
    pub fn new(parser: AddressParser) -> Self {
        Self { parser }
    }
}

#[async_trait]
impl Tool for ProductPurchase {
    fn name(&self) -> &str {
        "productPurchase"
    }

    fn description(&self) -> &str {
        "Buy a product from Amazon only after searching"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "products": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "minLength": PRODUCT_ID_LEN,
                        "maxLength": PRODUCT_ID_LEN,
                    },
                    "minItems": 1,
                    "maxItems": 1,
                },
                "shipping_address": {"type": "string"},
            },
            "required": ["products", "shipping_address"],
            "additionalProperties": false,
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutcome, ToolError> {
        let args: PurchaseArgs = args.parse()?;
        require_exact_count("products", &args.products, 1)?;
        for product in &args.products {
            require_exact_len("products", product, PRODUCT_ID_LEN)?;
        }

        match self.parser.parse(&args.shipping_address).await {
            Ok(AddressCheck::Rejected(details)) => {
                warn!("Shipping address rejected: {}", details);
                Ok(ToolFailure::AddressError { details }.into())
            }
            Ok(AddressCheck::Parsed(address)) => {
                let typed: ZincAddress = serde_json::from_value(address.clone()).unwrap_or_default();
                info!(
                    "Would buy {:?} to {}, {} {}",
                    args.products, typed.city, typed.state, typed.zip_code
                );
                Ok(ToolOutcome::Success(json!({
                    "shipping_address": address,
                    "success": "pending",
                    "note": DEMO_NOTE,
                })))
            }
            Err(e) => {
                warn!("Purchase failed: {}", e);
                Ok(ToolFailure::Exception {
                    details: e.to_string(),
                }
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZincConfig;
    use crate::test_support::{closed_port_url, serve};
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn tool_for(url: String) -> ProductPurchase {
        let config = ZincConfig::default().with_base_url(url);
        ProductPurchase::new(AddressParser::new(&config).unwrap())
    }

    fn parser_router(hits: Arc<AtomicUsize>, reply: Value) -> Router {
        Router::new().route(
            "/zinc_parse_address",
            post(move || {
                let hits = hits.clone();
                let reply = reply.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(reply)
                }
            }),
        )
    }

    fn args(products: Value) -> ToolArgs {
        ToolArgs::from_value(json!({
            "products": products,
            "shipping_address": "Tim Beaver, 77 Massachusetts Ave, Cambridge MA 02139",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_valid_address_is_pending_and_echoed() {
        let address = json!({
            "first_name": "Tim",
            "last_name": "Beaver",
            "address_line1": "77 Massachusetts Avenue",
            "address_line2": null,
            "city": "Cambridge",
            "state": "MA",
            "zip_code": "02139",
            "country": "US",
        });
        let hits = Arc::new(AtomicUsize::new(0));
        let tool = tool_for(serve(parser_router(hits.clone(), address.clone())).await);

        let result = tool.execute(args(json!(["B09WH84T1J"]))).await.unwrap().into_json();

        assert_eq!(result["success"], "pending");
        assert_eq!(result["note"], DEMO_NOTE);
        assert_eq!(result["shipping_address"], address);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_address_error_is_never_pending() {
        let hits = Arc::new(AtomicUsize::new(0));
        let reply = json!({"error": "Could not find street", "address": "Cambridge"});
        let tool = tool_for(serve(parser_router(hits, reply)).await);

        let result = tool.execute(args(json!(["B09WH84T1J"]))).await.unwrap().into_json();

        assert_eq!(
            result,
            json!({"success": false, "error": "address_error", "details": "Could not find street"})
        );
        assert_ne!(result["success"], "pending");
    }

    #[tokio::test]
    async fn test_product_count_and_length_are_checked() {
        let hits = Arc::new(AtomicUsize::new(0));
        let tool = tool_for(serve(parser_router(hits.clone(), json!({}))).await);

        for products in [
            json!([]),
            json!(["B09WH84T1J", "B07ZPKN6YR"]),
            json!(["B09WH84"]),
            json!("B09WH84T1J"),
        ] {
            let err = tool.execute(args(products)).await.unwrap_err();
            assert!(err.is_argument_error());
        }

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_exception() {
        let tool = tool_for(closed_port_url().await);

        let result = tool.execute(args(json!(["B09WH84T1J"]))).await.unwrap().into_json();

        assert_eq!(result["error"], "exception");
        assert!(result["details"].as_str().unwrap().contains("HTTP error"));
    }
}
