//! Product search tool.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::client::ZincClient;
use crate::error::ToolError;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::products::ProductSummary;
use crate::tool::{Tool, ToolArgs};

/// Results per search.
const SEARCH_LIMIT: u32 = 6;

/// Searches the retailer catalogue.
///
/// # Parameters
///
/// - `searchTerm` (required): free-text query.
///
/// Returns the first page of results as the API sends them.
pub struct ProductSearch {
    client: ZincClient,
}

impl ProductSearch {
    pub fn new(client: ZincClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ProductSearch {
    fn name(&self) -> &str {
        "productSearch"
    }

    fn description(&self) -> &str {
        "Search Amazon for a list of products"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "searchTerm": {"type": "string"},
            },
            "required": ["searchTerm"],
            "additionalProperties": false,
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutcome, ToolError> {
        let search_term = args.get_string("searchTerm")?;
        info!("Searching Amazon for {}", search_term);

        match self.client.search(&search_term, SEARCH_LIMIT, 1).await {
            Ok(results) => {
                for product in ProductSummary::from_results(&results) {
                    debug!("Search hit: {}", product);
                }
                Ok(ToolOutcome::Success(results))
            }
            Err(e) => {
                warn!("Search for '{}' failed: {}", search_term, e);
                Ok(ToolFailure::ApiRequestFailed.into())
            }
        }
    }
}
