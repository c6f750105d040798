// ABOUTME: McpProxyTool wraps a server-side tool so it can sit in a Registry
// ABOUTME: next to in-process tools. Calls are forwarded to the server.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{McpClient, McpToolInfo, McpToolResult};
use crate::context::ToolContext;
use crate::tool::{Tool, ToolResult, prefixed_name};

/// A tool that forwards calls to an MCP server.
pub struct McpProxyTool {
    client: Arc<McpClient>,
    info: McpToolInfo,
    exposed_name: String,
}

impl McpProxyTool {
    pub fn new(client: Arc<McpClient>, info: McpToolInfo, prefix: Option<&str>) -> Self {
        let exposed_name = prefixed_name(prefix, &info.name);
        Self {
            client,
            info,
            exposed_name,
        }
    }

    /// The tool's name on the server.
    pub fn remote_name(&self) -> &str {
        &self.info.name
    }
}

/// Shape a server's reply like any other tool result.
///
/// Structured content is normalized as a returned value; otherwise the text
/// blocks become `result`, or `error_message` when the server flagged an error.
pub fn to_tool_result(result: McpToolResult) -> ToolResult {
    if result.is_error {
        return ToolResult::error(result.text());
    }
    match result.structured_content {
        Some(structured) => ToolResult::from_value(structured),
        None => ToolResult::text(result.text()),
    }
}

#[async_trait]
impl Tool for McpProxyTool {
    fn name(&self) -> &str {
        &self.exposed_name
    }

    fn description(&self) -> &str {
        &self.info.description
    }

    fn schema(&self) -> Value {
        self.info.input_schema.clone()
    }

    async fn execute(&self, _ctx: &ToolContext, params: Value) -> Result<ToolResult, anyhow::Error> {
        let result = self.client.call_tool(&self.info.name, params).await?;
        Ok(to_tool_result(result))
    }
}
