// ABOUTME: Integration tests for subprocess-backed toolsets against a scripted
// ABOUTME: stdio MCP server written in POSIX sh.
#![cfg(unix)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use toolwire::prelude::*;

/// Answers initialize, tools/list and tools/call; every other request gets
/// "method not found". Lines without an id (notifications) are ignored.
const FAKE_SERVER: &str = r##"
while IFS= read -r line; do
  id=$(printf '%s\n' "$line" | sed -n 's/^{"jsonrpc":"2.0","id":\([0-9]*\),.*/\1/p')
  [ -z "$id" ] && continue
  case "$line" in
    *'"method":"initialize"'*)
      printf '{"jsonrpc":"2.0","id":%s,"result":{"protocolVersion":"2024-11-05","capabilities":{"tools":{}},"serverInfo":{"name":"fake","version":"0.0.1"}}}\n' "$id" ;;
    *'"method":"tools/list"'*)
      printf '{"jsonrpc":"2.0","id":%s,"result":{"tools":[{"name":"read_token","description":"Reads the injected token.","inputSchema":{"type":"object","properties":{"label":{"type":"string"}},"required":["label"]}},{"name":"fail","description":"Always fails.","inputSchema":{"type":"object"}},{"name":"write_file","description":"Writes a file.","inputSchema":{"type":"object"}}]}}\n' "$id" ;;
    *'"method":"tools/call"'*'"name":"fail"'*)
      printf '{"jsonrpc":"2.0","id":%s,"result":{"content":[{"type":"text","text":"boom"}],"isError":true}}\n' "$id" ;;
    *'"method":"tools/call"'*)
      printf '{"jsonrpc":"2.0","id":%s,"result":{"content":[{"type":"text","text":"token=%s"}]}}\n' "$id" "$FAKE_TOKEN" ;;
    *)
      printf '{"jsonrpc":"2.0","id":%s,"error":{"code":-32601,"message":"Method not found"}}\n' "$id" ;;
  esac
done
"##;

fn fake_server() -> McpServerConfig {
    McpServerConfig::new("fake", "sh")
        .args(["-c", FAKE_SERVER])
        .env("FAKE_TOKEN", "s3cret")
        .timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_client_handshake_and_listing() {
    let client = McpClient::connect(&fake_server()).await.unwrap();
    assert!(client.capabilities().tools.is_some());

    let tools = client.list_tools().await.unwrap();
    let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["read_token", "fail", "write_file"]);

    let result = client
        .call_tool("read_token", json!({"label": "a"}))
        .await
        .unwrap();
    assert_eq!(result.text(), "token=s3cret");

    client.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_method_is_rpc_error() {
    let config = fake_server();
    let transport = StdioTransport::spawn(&config).unwrap();
    let response = transport
        .send(toolwire::mcp::McpRequest::new("resources/list", None))
        .await
        .unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, -32601);
    transport.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_toolset_through_registry() {
    let toolset = McpToolset::new(fake_server())
        .prefix("fake")
        .filter(ToolFilter::new().deny(["write_file"]));
    let registry = Registry::new();

    let count = registry.register_toolset(Arc::new(toolset)).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(registry.list().await, vec!["fake_fail", "fake_read_token"]);

    let ctx = ToolContext::in_memory("fs_agent");
    let result = registry
        .invoke(&ctx, "fake_read_token", json!({"label": "x"}))
        .await
        .unwrap();
    assert_eq!(result.status, ToolStatus::Success);
    assert_eq!(result.get_str("result"), Some("token=s3cret"));

    let err = registry
        .invoke(&ctx, "fake_read_token", json!({}))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let result = registry
        .invoke(&ctx, "fake_fail", json!({}))
        .await
        .unwrap();
    assert!(result.is_error());
    assert_eq!(result.error_message(), Some("boom"));

    registry.close().await;
    let err = registry
        .invoke(&ctx, "fake_read_token", json!({"label": "x"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Execution { .. }));
}

#[tokio::test]
async fn test_toolset_reconnects_after_close() {
    let toolset = McpToolset::new(fake_server()).filter(ToolFilter::new().allow(["read_token"]));
    let ctx = ToolContext::in_memory("fs_agent");

    let stale = toolset.tools().await.unwrap().remove(0);
    assert!(toolset.is_connected().await);
    toolset.close().await.unwrap();
    assert!(!toolset.is_connected().await);
    assert!(stale.execute(&ctx, json!({"label": "x"})).await.is_err());

    let fresh = toolset.tools().await.unwrap().remove(0);
    assert_eq!(fresh.name(), "read_token");
    let result = fresh.execute(&ctx, json!({"label": "x"})).await.unwrap();
    assert_eq!(result.get_str("result"), Some("token=s3cret"));
    toolset.close().await.unwrap();
}

#[tokio::test]
async fn test_missing_server_binary_fails_registration() {
    let toolset = McpToolset::new(McpServerConfig::new("ghost", "/nonexistent/mcp-server"));
    let registry = Registry::new();

    let err = registry
        .register_toolset(Arc::new(toolset))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Toolset { ref toolset, .. } if toolset == "ghost"));
    assert_eq!(registry.count().await, 0);
}
