//! ToolExecutor implementation backed by ToolRegistry.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chat_core::{ToolDefinition, ToolExecutor, ToolRequest, ToolResult};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::error::ToolError;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::ToolRegistry;

/// Which tools may run and for how long.
#[derive(Debug, Clone, Default)]
pub struct ToolPolicy {
    /// Active tool set. `None` allows every registered tool.
    pub allowlist: Option<HashSet<String>>,
    /// Upper bound on a single tool execution.
    pub timeout: Option<Duration>,
}

impl ToolPolicy {
    pub fn allow_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowlist = self.allowlist.get_or_insert_with(HashSet::new);
        for tool in tools {
            allowlist.insert(tool.into());
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

pub struct RegistryToolExecutor {
    registry: Arc<ToolRegistry>,
    policy: ToolPolicy,
}

impl RegistryToolExecutor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self::with_policy(registry, ToolPolicy::default())
    }

    pub fn with_policy(registry: ToolRegistry, policy: ToolPolicy) -> Self {
        Self {
            registry: Arc::new(registry),
            policy,
        }
    }

    fn is_allowed(&self, tool: &str) -> bool {
        if !self.registry.has_tool(tool) {
            return false;
        }
        match self.policy.allowlist {
            Some(ref allowlist) => allowlist.contains(tool),
            None => true,
        }
    }

    async fn run(&self, request: &ToolRequest) -> ToolOutcome {
        if !self.is_allowed(&request.name) {
            return ToolFailure::UnknownTool {
                name: request.name.clone(),
            }
            .into();
        }

        let execute_future = self
            .registry
            .execute(&request.name, request.arguments.clone());

        let result = match self.policy.timeout {
            Some(timeout_duration) => match timeout(timeout_duration, execute_future).await {
                Ok(result) => result,
                Err(_) => {
                    return ToolFailure::Exception {
                        details: "Tool execution timed out".to_string(),
                    }
                    .into()
                }
            },
            None => execute_future.await,
        };

        match result {
            Ok(outcome) => outcome,
            Err(error) => failure_for(error).into(),
        }
    }
}

fn failure_for(error: ToolError) -> ToolFailure {
    match error {
        ToolError::NotFound(name) => ToolFailure::UnknownTool { name },
        e if e.is_argument_error() => ToolFailure::InvalidArguments {
            details: e.to_string(),
        },
        e => ToolFailure::Exception {
            details: e.to_string(),
        },
    }
}

#[async_trait::async_trait]
impl ToolExecutor for RegistryToolExecutor {
    async fn execute(&self, request: ToolRequest) -> ToolResult {
        info!("Tool call {}: {}", request.id, request.name);

        let outcome = self.run(&request).await;
        if let ToolOutcome::Failure(ref failure) = outcome {
            warn!("Tool '{}' failed: {:?}", request.name, failure);
        }

        if outcome.is_success() {
            ToolResult::success(&request, outcome.into_json())
        } else {
            ToolResult::failure(&request, outcome.into_json())
        }
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry
            .definitions()
            .into_iter()
            .filter(|d| self.is_allowed(&d.name))
            .collect()
    }
}
