// ABOUTME: Defines the Tool trait - the core abstraction for agent capabilities.
// ABOUTME: Tools have a name, description, schema, and async execute method.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ToolResult;
use crate::context::ToolContext;

/// What a runtime hands to a model so it can choose and call a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub long_running: bool,
}

/// A tool that can be executed by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for the LLM.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// Whether the tool answers with a pending acknowledgement and finishes later.
    fn is_long_running(&self) -> bool {
        false
    }

    /// Check if this invocation requires user approval.
    fn requires_approval(&self, _params: &serde_json::Value) -> bool {
        false
    }

    /// Execute the tool with the given parameters.
    ///
    /// `Ok` results, including those with `status = "error"`, go back to the
    /// model. `Err` is a transport-level failure the runtime must handle.
    async fn execute(
        &self,
        ctx: &ToolContext,
        params: serde_json::Value,
    ) -> Result<ToolResult, anyhow::Error>;

    /// The definition advertised to a model.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.schema(),
            long_running: self.is_long_running(),
        }
    }
}
