// ABOUTME: MCP client - runs the initialize handshake, lists tools across
// ABOUTME: pages, and calls tools over a Transport.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info};

use super::{
    McpClientInfo, McpInitializeParams, McpInitializeResult, McpNotification, McpRequest,
    McpServerCapabilities, McpServerConfig, McpToolInfo, McpToolResult, McpToolsListResult,
    PROTOCOL_VERSION, StdioTransport, Transport,
};
use crate::error::McpError;

/// Client for one MCP server.
pub struct McpClient {
    name: String,
    transport: Arc<dyn Transport>,
    capabilities: McpServerCapabilities,
}

impl McpClient {
    /// Spawn the server and complete the handshake.
    pub async fn connect(config: &McpServerConfig) -> Result<Self, McpError> {
        let transport = Arc::new(StdioTransport::spawn(config)?);
        let mut client = Self::with_transport(&config.name, transport);
        if let Err(e) = client.initialize().await {
            let _ = client.shutdown().await;
            return Err(e);
        }
        Ok(client)
    }

    /// Wrap an existing transport. The handshake has not run yet.
    pub fn with_transport(name: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            name: name.into(),
            transport,
            capabilities: McpServerCapabilities::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Server capabilities (populated by `initialize`).
    pub fn capabilities(&self) -> &McpServerCapabilities {
        &self.capabilities
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        let request = McpRequest::new(method, params);
        let response = self.transport.send(request).await?;

        if let Some(error) = response.error {
            return Err(McpError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| McpError::Protocol(format!("no result in '{}' response", method)))
    }

    /// Run the `initialize` handshake and send `notifications/initialized`.
    pub async fn initialize(&mut self) -> Result<McpInitializeResult, McpError> {
        let params = McpInitializeParams {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: json!({}),
            client_info: McpClientInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        let result = self
            .request("initialize", Some(serde_json::to_value(params)?))
            .await?;
        let init: McpInitializeResult = serde_json::from_value(result)?;
        self.capabilities = init.capabilities.clone();

        self.transport
            .notify(McpNotification::new("notifications/initialized", None))
            .await?;

        info!(
            server = %self.name,
            protocol = %init.protocol_version,
            "connected to MCP server"
        );
        Ok(init)
    }

    /// List every tool, following `nextCursor` until the last page.
    pub async fn list_tools(&self) -> Result<Vec<McpToolInfo>, McpError> {
        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let params = cursor.as_ref().map(|c| json!({ "cursor": c }));
            let page: McpToolsListResult =
                serde_json::from_value(self.request("tools/list", params).await?)?;
            tools.extend(page.tools);
            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => break,
            }
        }
        debug!(server = %self.name, count = tools.len(), "listed tools");
        Ok(tools)
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResult, McpError> {
        let params = json!({
            "name": name,
            "arguments": arguments,
        });
        let result = self.request("tools/call", Some(params)).await?;
        Ok(serde_json::from_value(result)?)
    }

    pub async fn shutdown(&self) -> Result<(), McpError> {
        self.transport.shutdown().await
    }
}
