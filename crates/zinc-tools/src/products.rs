//! Lenient view of search results.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// One search hit, as far as the fields can be read.
///
/// Search results are forwarded to the model unchanged; this view only
/// feeds log lines.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductSummary {
    pub index: Option<String>,
    pub product_id: Option<String>,
    pub title: Option<String>,
    pub brand: Option<String>,
    /// Price in cents.
    pub price: Option<i64>,
    pub stars: Option<f64>,
    pub num_reviews: Option<i64>,
    pub prime: Option<bool>,
}

impl ProductSummary {
    /// Read every entry of a search response that looks like a product.
    pub fn from_results(results: &Value) -> Vec<Self> {
        results
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for ProductSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.index.as_deref().unwrap_or("-"),
            self.title.as_deref().unwrap_or("untitled"),
            self.product_id.as_deref().unwrap_or("?")
        )?;
        if let Some(cents) = self.price {
            write!(f, " ${}.{:02}", cents / 100, (cents % 100).abs())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_results_skips_odd_entries() {
        let results = json!([
            {"index": "#1", "product_id": "B09WH84T1J", "title": "Canvas Sneaker", "price": 4599, "stars": 4.5},
            "not a product",
            {"index": "#2", "product_id": "B07XYZ1234", "price": "free"},
        ]);

        let summaries = ProductSummary::from_results(&results);
        assert_eq!(summaries.len(), 1);
        assert_eq!(
            summaries[0].to_string(),
            "#1 Canvas Sneaker (B09WH84T1J) $45.99"
        );
    }

    #[test]
    fn test_from_results_non_array() {
        assert!(ProductSummary::from_results(&json!({"error": "nope"})).is_empty());
    }
}
