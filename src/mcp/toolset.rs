// ABOUTME: McpToolset - a Toolset backed by a stdio MCP server. Connects on
// ABOUTME: first use, exposes filtered and prefixed proxies, and shuts down on close.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{McpClient, McpProxyTool, McpServerConfig};
use crate::error::{McpError, ToolError};
use crate::tool::{Tool, ToolFilter, Toolset};

/// Tools served by a child process.
pub struct McpToolset {
    config: McpServerConfig,
    prefix: Option<String>,
    filter: ToolFilter,
    /// Live connection. Cleared by `close`; the next `tools` call reconnects.
    client: Mutex<Option<Arc<McpClient>>>,
}

impl McpToolset {
    pub fn new(config: McpServerConfig) -> Self {
        Self {
            config,
            prefix: None,
            filter: ToolFilter::default(),
            client: Mutex::new(None),
        }
    }

    /// Expose every tool as `<prefix>_<name>`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Only expose tools passing the filter. Applies to server-side names.
    pub fn filter(mut self, filter: ToolFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn config(&self) -> &McpServerConfig {
        &self.config
    }

    pub fn tool_filter(&self) -> &ToolFilter {
        &self.filter
    }

    /// Whether a server process is running for this set.
    pub async fn is_connected(&self) -> bool {
        self.client.lock().await.is_some()
    }

    async fn client(&self) -> Result<Arc<McpClient>, McpError> {
        let mut slot = self.client.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = Arc::new(McpClient::connect(&self.config).await?);
        *slot = Some(client.clone());
        Ok(client)
    }

    fn toolset_error(&self, e: McpError) -> ToolError {
        ToolError::Toolset {
            toolset: self.config.name.clone(),
            source: e.into(),
        }
    }
}

#[async_trait]
impl Toolset for McpToolset {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn tools(&self) -> Result<Vec<Arc<dyn Tool>>, ToolError> {
        let client = self.client().await.map_err(|e| self.toolset_error(e))?;
        let infos = client
            .list_tools()
            .await
            .map_err(|e| self.toolset_error(e))?;

        let tools: Vec<Arc<dyn Tool>> = infos
            .into_iter()
            .filter(|info| self.filter.is_allowed(&info.name))
            .map(|info| {
                Arc::new(McpProxyTool::new(client.clone(), info, self.prefix.as_deref()))
                    as Arc<dyn Tool>
            })
            .collect();
        debug!(toolset = %self.config.name, count = tools.len(), "exposing server tools");
        Ok(tools)
    }

    /// Stop the server. Proxies handed out earlier fail from now on.
    async fn close(&self) -> Result<(), ToolError> {
        let client = self.client.lock().await.take();
        if let Some(client) = client {
            client.shutdown().await.map_err(|e| self.toolset_error(e))?;
        }
        Ok(())
    }
}
