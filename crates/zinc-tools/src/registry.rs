//! Tool registry for managing and executing tools.

use std::sync::Arc;

use chat_core::ToolDefinition;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ToolError;
use crate::outcome::ToolOutcome;
use crate::tool::{Tool, ToolArgs};

/// Registry for managing tools.
///
/// The registry holds a collection of tools in registration order and
/// dispatches execution requests to the appropriate tool by name.
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Register a tool.
    ///
    /// If a tool with the same name already exists, it will be replaced.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_boxed(Arc::new(tool));
    }

    /// Register a shared tool.
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        info!("Registering tool: {}", name);
        self.tools.insert(name, tool);
    }

    /// Get a list of registered tool names.
    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Definitions of every registered tool, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters(),
            })
            .collect()
    }

    /// Execute a tool by name with the given JSON arguments.
    pub async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutcome, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        let args = ToolArgs::from_value(arguments)?;
        debug!("Executing tool '{}' with {} params", name, args.params.len());

        let outcome = tool.execute(args).await?;

        debug!("Tool '{}' completed: success={}", name, outcome.is_success());

        Ok(outcome)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes back the input"
        }

        fn parameters(&self) -> Value {
            json!({
                "type": "object",
                "properties": {"message": {"type": "string"}},
                "required": ["message"],
            })
        }

        async fn execute(&self, args: ToolArgs) -> Result<ToolOutcome, ToolError> {
            let message = args.get_string("message")?;
            Ok(ToolOutcome::Success(Value::String(message)))
        }
    }

    #[tokio::test]
    async fn test_registry_basic() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        assert!(registry.has_tool("echo"));
        assert!(!registry.has_tool("nonexistent"));
        assert_eq!(registry.list_tools(), vec!["echo"]);
        assert_eq!(registry.definitions()[0].description, "Echoes back the input");
    }

    #[tokio::test]
    async fn test_registry_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let result = registry.execute("echo", json!({"message": "hello"})).await.unwrap();
        assert_eq!(result, ToolOutcome::Success(json!("hello")));
    }

    #[tokio::test]
    async fn test_registry_rejects_missing_parameter() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let result = registry.execute("echo", json!({})).await;
        assert!(matches!(result, Err(ToolError::MissingParameter(_))));
    }

    #[tokio::test]
    async fn test_registry_not_found() {
        let registry = ToolRegistry::new();
        let result = registry.execute("nonexistent", json!({})).await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }
}
