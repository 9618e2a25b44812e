//! Shopping tools for the Zinc shopping assistant.
//!
//! This crate provides the five tools the assistant can call, a
//! `ToolRegistry` holding them, and a [`RegistryToolExecutor`] that exposes
//! the registry as a [`chat_core::ToolExecutor`] for the generation loop.
//!
//! # Built-in Tools
//!
//! - [`ProductSearch`] - Search the retailer catalogue.
//! - [`ProductDetails`] - Extra information about one product.
//! - [`ProductVariants`] - Variants of a parent product.
//! - [`ProductReviews`] - A selection of reviews.
//! - [`ProductPurchase`] - Address check and a pending (demo) purchase.
//!
//! Every call answers with JSON: upstream data on success, or one of the
//! fixed [`ToolFailure`] envelopes.
//!
//! # Example
//!
//! ```rust,no_run
//! use chat_core::{ToolExecutor, ToolRequest};
//! use serde_json::json;
//! use zinc_tools::{shopping_executor, ZincConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zinc_tools::ToolError> {
//!     let executor = shopping_executor(&ZincConfig::from_env()?)?;
//!
//!     let request = ToolRequest::new("call-1", "productSearch", json!({"searchTerm": "mug"}));
//!     let result = executor.execute(request).await;
//!     println!("{}", result.result);
//!     Ok(())
//! }
//! ```

mod address;
mod client;
mod config;
mod error;
mod executor;
mod outcome;
mod products;
mod registry;
mod tool;
pub mod tools;

pub use address::{AddressCheck, AddressParser, ZincAddress};
pub use client::{ProductMethod, ZincClient, RETAILER};
pub use config::ZincConfig;
pub use error::ToolError;
pub use executor::{RegistryToolExecutor, ToolPolicy};
pub use outcome::{ToolFailure, ToolOutcome};
pub use products::ProductSummary;
pub use registry::ToolRegistry;
pub use tool::{require_exact_count, require_exact_len, Tool, ToolArgs};
pub use tools::{ProductDetails, ProductPurchase, ProductReviews, ProductSearch, ProductVariants};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

/// Tools the assistant may call in a chat turn.
pub const ACTIVE_TOOLS: [&str; 5] = [
    "productSearch",
    "productPurchase",
    "productVariants",
    "productDetails",
    "productReviews",
];

/// Create a registry with all shopping tools registered.
pub fn shopping_registry(config: &ZincConfig) -> Result<ToolRegistry, ToolError> {
    let client = ZincClient::new(config)?;
    let parser = AddressParser::new(config)?;

    let mut registry = ToolRegistry::new();
    registry.register(ProductSearch::new(client.clone()));
    registry.register(ProductDetails::new(client.clone()));
    registry.register(ProductVariants::new(client.clone()));
    registry.register(ProductReviews::new(client));
    registry.register(ProductPurchase::new(parser));

    Ok(registry)
}

/// Create the executor used for chat turns: all shopping tools, limited to
/// [`ACTIVE_TOOLS`], each bounded by the configured request timeout.
pub fn shopping_executor(config: &ZincConfig) -> Result<RegistryToolExecutor, ToolError> {
    let policy = ToolPolicy::default()
        .allow_tools(ACTIVE_TOOLS)
        .with_timeout(config.timeout);
    Ok(RegistryToolExecutor::with_policy(
        shopping_registry(config)?,
        policy,
    ))
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral port and return its base URL.
    pub async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// URL of a port nothing listens on.
    pub async fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }
}
