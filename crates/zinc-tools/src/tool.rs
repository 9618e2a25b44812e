//! Tool trait definition and argument handling.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::outcome::ToolOutcome;

/// Arguments passed to a tool for execution.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Parameters as sent by the model.
    pub params: Map<String, Value>,
}

impl ToolArgs {
    /// Create tool arguments from a raw JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, ToolError> {
        match value {
            Value::Object(params) => Ok(Self { params }),
            other => Err(ToolError::InvalidParameter {
                name: "arguments".to_string(),
                reason: format!("expected object, got {}", json_type(&other)),
            }),
        }
    }

    /// Get a string parameter, returning an error if missing or not a string.
    pub fn get_string(&self, key: &str) -> Result<String, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected string".to_string(),
            })
    }

    /// Deserialize the parameters into a typed argument struct.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ToolError> {
        serde_json::from_value(Value::Object(self.params.clone())).map_err(|e| {
            ToolError::InvalidParameter {
                name: "arguments".to_string(),
                reason: e.to_string(),
            }
        })
    }
}

/// Check that `value` is exactly `len` characters long.
pub fn require_exact_len(name: &str, value: &str, len: usize) -> Result<(), ToolError> {
    let actual = value.chars().count();
    if actual != len {
        return Err(ToolError::InvalidParameter {
            name: name.to_string(),
            reason: format!("must be exactly {} characters, got {}", len, actual),
        });
    }
    Ok(())
}

/// Check that a list holds exactly `count` items.
pub fn require_exact_count<T>(name: &str, items: &[T], count: usize) -> Result<(), ToolError> {
    if items.len() != count {
        return Err(ToolError::InvalidParameter {
            name: name.to_string(),
            reason: format!("must contain exactly {} item(s), got {}", count, items.len()),
        });
    }
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Trait for tools the model can call.
///
/// `execute` returns `Err` only for argument problems or unexpected
/// failures; expected upstream failures are reported as a
/// [`ToolOutcome::Failure`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema of the argument object.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: ToolArgs) -> Result<ToolOutcome, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ProductIdArgs {
        product_id: String,
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = ToolArgs::from_value(json!("B09WH84T1J")).unwrap_err();
        assert!(err.is_argument_error());
        assert!(err.to_string().contains("expected object, got string"));
    }

    #[test]
    fn test_get_string() {
        let args = ToolArgs::from_value(json!({"searchTerm": "mug", "limit": 3})).unwrap();
        assert_eq!(args.get_string("searchTerm").unwrap(), "mug");
        assert!(matches!(
            args.get_string("missing"),
            Err(ToolError::MissingParameter(_))
        ));
        assert!(matches!(
            args.get_string("limit"),
            Err(ToolError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_parse_typed_args() {
        let args = ToolArgs::from_value(json!({"productId": "B09WH84T1J"})).unwrap();
        let parsed: ProductIdArgs = args.parse().unwrap();
        assert_eq!(parsed.product_id, "B09WH84T1J");

        let args = ToolArgs::from_value(json!({"productId": 42})).unwrap();
        assert!(args.parse::<ProductIdArgs>().unwrap_err().is_argument_error());
    }

    #[test]
    fn test_length_checks() {
        assert!(require_exact_len("productId", "B09WH84T1J", 10).is_ok());
        assert!(require_exact_len("productId", "B09WH84T1", 10).is_err());
        assert!(require_exact_count("products", &["a"], 1).is_ok());
        assert!(require_exact_count::<&str>("products", &[], 1).is_err());
    }
}
