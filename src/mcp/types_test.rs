// ABOUTME: Tests for MCP types - wire shapes of requests, responses, tool
// ABOUTME: listings and call results, plus server configuration.

use std::time::Duration;

use serde_json::json;

use super::*;
use crate::tool::ToolStatus;

#[test]
fn test_request_serialization() {
    let req = McpRequest::new("tools/list", None);
    let json = serde_json::to_value(&req).unwrap();

    assert_eq!(json["jsonrpc"], "2.0");
    assert_eq!(json["method"], "tools/list");
    assert!(json["id"].as_u64().is_some());
    assert!(json.get("params").is_none());
}

#[test]
fn test_request_ids_increment() {
    let req1 = McpRequest::new("a", None);
    let req2 = McpRequest::new("b", None);

    assert!(req2.id > req1.id);
}

#[test]
fn test_notification_has_no_id() {
    let note = McpNotification::new("notifications/initialized", None);
    let json = serde_json::to_value(&note).unwrap();

    assert_eq!(json, json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
}

#[test]
fn test_response_error() {
    let resp: McpResponse = serde_json::from_str(
        r#"{"jsonrpc": "2.0", "id": 4, "error": {"code": -32600, "message": "Invalid Request"}}"#,
    )
    .unwrap();

    assert!(resp.result.is_none());
    assert_eq!(resp.error.unwrap().code, -32600);
}

#[test]
fn test_tools_list_page() {
    let page: McpToolsListResult = serde_json::from_value(json!({
        "tools": [
            {"name": "read_file", "description": "Read a file", "inputSchema": {"type": "object"}},
            {"name": "maps_geocode"}
        ],
        "nextCursor": "abc"
    }))
    .unwrap();

    assert_eq!(page.tools.len(), 2);
    assert_eq!(page.tools[1].description, "");
    assert_eq!(page.tools[1].input_schema, json!({"type": "object"}));
    assert_eq!(page.next_cursor.as_deref(), Some("abc"));
}

#[test]
fn test_tool_result_text_joins_blocks() {
    let result: McpToolResult = serde_json::from_value(json!({
        "content": [
            {"type": "text", "text": "line one"},
            {"type": "image", "data": "AAAA", "mimeType": "image/png"},
            {"type": "resource", "resource": {"uri": "file:///x"}},
            {"type": "text", "text": "line two"}
        ]
    }))
    .unwrap();

    assert!(!result.is_error);
    assert_eq!(result.text(), "line one\n[Image: image/png]\nline two");
}

#[test]
fn test_tool_result_mapping() {
    let error: McpToolResult = serde_json::from_value(json!({
        "content": [{"type": "text", "text": "Access denied - path outside allowed directories"}],
        "isError": true
    }))
    .unwrap();
    let shaped = to_tool_result(error);
    assert_eq!(shaped.status, ToolStatus::Error);
    assert_eq!(
        shaped.error_message(),
        Some("Access denied - path outside allowed directories")
    );

    let structured: McpToolResult = serde_json::from_value(json!({
        "content": [],
        "structuredContent": {"distance": "5 km"}
    }))
    .unwrap();
    let shaped = to_tool_result(structured);
    assert_eq!(shaped.status, ToolStatus::Success);
    assert_eq!(shaped.get_str("distance"), Some("5 km"));

    let text: McpToolResult =
        serde_json::from_value(json!({"content": [{"type": "text", "text": "ok"}]})).unwrap();
    assert_eq!(to_tool_result(text).get_str("result"), Some("ok"));
}

#[test]
fn test_server_config_builder() {
    let config = McpServerConfig::new("maps", "npx")
        .args(["-y", "@modelcontextprotocol/server-google-maps"])
        .env("GOOGLE_MAPS_API_KEY", "key")
        .timeout(Duration::from_secs(5));

    assert_eq!(config.args, vec!["-y", "@modelcontextprotocol/server-google-maps"]);
    assert_eq!(config.env.get("GOOGLE_MAPS_API_KEY").map(String::as_str), Some("key"));
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert!(config.cwd.is_none());
    assert_eq!(McpServerConfig::new("x", "y").timeout, DEFAULT_TIMEOUT);
}

#[test]
fn test_initialize_result_tolerates_missing_fields() {
    let init: McpInitializeResult =
        serde_json::from_value(json!({"protocolVersion": "2024-11-05"})).unwrap();

    assert!(init.capabilities.tools.is_none());
    assert!(init.server_info.is_none());
}
