// ABOUTME: MCP module - a narrow Model Context Protocol client over stdio
// ABOUTME: that exposes a server's tools as a Toolset.

mod client;
mod proxy;
mod toolset;
mod transport;
mod types;

pub use client::McpClient;
pub use proxy::{McpProxyTool, to_tool_result};
pub use toolset::McpToolset;
pub use transport::{StdioTransport, Transport};
pub use types::*;

#[cfg(test)]
mod types_test;
