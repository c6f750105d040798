// ABOUTME: Integration tests verifying modules work together.
// ABOUTME: Drives the example agents end to end without external processes.

use std::io::Cursor;
use std::sync::Arc;

use serde_json::json;
use toolwire::agent::presets;
use toolwire::prelude::*;
use toolwire::tools::{LAST_MATH_OPERATION_KEY, USER_PREFERENCES_KEY};

#[tokio::test]
async fn test_weather_time_agent() {
    let preset = presets::weather_time().await;
    let ctx = preset.context.for_invocation();

    let result = preset
        .registry
        .invoke(&ctx, "get_weather", json!({"city": "New York"}))
        .await
        .unwrap();
    assert_eq!(result.status, ToolStatus::Success);
    assert!(result.get_str("report").unwrap().contains("25 degrees Celsius"));

    let result = preset
        .registry
        .invoke(&ctx, "get_weather", json!({"city": "London"}))
        .await
        .unwrap();
    assert!(result.is_error());
    assert_eq!(
        result.error_message(),
        Some("Weather information for 'London' is not available.")
    );

    let result = preset
        .registry
        .invoke(&ctx, "get_current_time", json!({"city": "Atlantis"}))
        .await
        .unwrap();
    assert_eq!(
        result.error_message(),
        Some("Sorry, I don't have timezone information for Atlantis.")
    );

    let result = preset
        .registry
        .invoke(&ctx, "get_current_time", json!({"city": "new york"}))
        .await
        .unwrap();
    assert_eq!(result.get_str("timezone"), Some("America/New_York"));
}

#[tokio::test]
async fn test_missing_argument_is_rejected_before_execution() {
    let preset = presets::order_status().await;
    let ctx = preset.context.for_invocation();

    let err = preset
        .registry
        .invoke(&ctx, "lookup_order_status", json!({}))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = preset
        .registry
        .invoke(&ctx, "lookup_order_status", json!({"order_id": 12345}))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_order_status() {
    let preset = presets::order_status().await;
    let ctx = preset.context.for_invocation();

    let result = preset
        .registry
        .invoke(&ctx, "lookup_order_status", json!({"order_id": "12345"}))
        .await
        .unwrap();
    assert_eq!(
        result.to_value(),
        json!({
            "status": "success",
            "order": {"state": "shipped", "tracking_number": "1Z9..."}
        })
    );

    let result = preset
        .registry
        .invoke(&ctx, "lookup_order_status", json!({"order_id": "999"}))
        .await
        .unwrap();
    assert_eq!(result.error_message(), Some("Order ID 999 not found."));
}

#[tokio::test]
async fn test_preferences_last_write_wins_and_keep_other_keys() {
    let preset = presets::user_preferences().await;

    for (preference, value) in [("theme", "dark"), ("language", "en"), ("theme", "light")] {
        let result = preset
            .registry
            .invoke(
                &preset.context.for_invocation(),
                "update_user_preference",
                json!({"preference": preference, "value": value}),
            )
            .await
            .unwrap();
        assert_eq!(result.get_str("updated_preference"), Some(preference));
    }

    let stored = preset
        .context
        .state()
        .get(USER_PREFERENCES_KEY)
        .await
        .unwrap();
    assert_eq!(stored, Some(json!({"theme": "light", "language": "en"})));
}

#[tokio::test]
async fn test_document_analysis_saves_versioned_artifact() {
    let preset = presets::document_analysis(vec![(
        "report.txt".to_string(),
        Artifact::text("Agent frameworks and tool calling."),
    )])
    .await
    .unwrap();
    preset
        .context
        .memory()
        .add(MemoryEntry::new("user", "Notes about tool calling"))
        .await
        .unwrap();

    let args = json!({"document_name": "report.txt", "analysis_query": "tool calling"});
    let first = preset
        .registry
        .invoke(&preset.context.for_invocation(), "process_document", args.clone())
        .await
        .unwrap();
    assert_eq!(first.get_str("analysis_artifact"), Some("analysis_report.txt"));
    assert_eq!(first.get("version"), Some(&json!(0)));
    assert_eq!(first.get("memory_hits"), Some(&json!(1)));

    let second = preset
        .registry
        .invoke(&preset.context.for_invocation(), "process_document", args)
        .await
        .unwrap();
    assert_eq!(second.get("version"), Some(&json!(1)));

    let artifacts = preset.context.artifacts();
    assert_eq!(
        artifacts.list().await.unwrap(),
        vec!["analysis_report.txt", "report.txt"]
    );
    let saved = artifacts
        .load_version("analysis_report.txt", 0)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        saved.artifact.as_text(),
        Some(
            "Analysis of 'report.txt' regarding 'tool calling' using memory context: \
             [Placeholder Analysis Result]"
        )
    );

    let missing = preset
        .registry
        .invoke(
            &preset.context.for_invocation(),
            "process_document",
            json!({"document_name": "nope.txt", "analysis_query": "x"}),
        )
        .await
        .unwrap();
    assert_eq!(missing.error_message(), Some("Document 'nope.txt' not found."));
}

#[tokio::test]
async fn test_calculator_toolset_records_operation() {
    let preset = presets::calculator().await.unwrap();
    let ctx = preset.context.for_invocation();

    let result = preset
        .registry
        .invoke(&ctx, "calculator_add_numbers", json!({"a": 2, "b": 3}))
        .await
        .unwrap();
    assert_eq!(result.get("result"), Some(&json!(5)));
    assert_eq!(
        ctx.state().get(LAST_MATH_OPERATION_KEY).await.unwrap(),
        Some(json!("addition"))
    );

    let result = preset
        .registry
        .invoke(&ctx, "calculator_subtract_numbers", json!({"a": 2, "b": 3}))
        .await
        .unwrap();
    assert_eq!(result.get("result"), Some(&json!(-1)));

    let result = preset
        .registry
        .invoke(&ctx, "greet_user", json!({}))
        .await
        .unwrap();
    assert_eq!(result.get_str("greeting"), Some("Hello, User!"));
}

async fn capital_of(preset: &AgentPreset, country: &str) -> ToolResult {
    preset
        .registry
        .invoke(
            &preset.context.for_invocation(),
            "get_capital_city",
            json!({ "country": country }),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_capital_callbacks_steer_lookups() {
    let preset = presets::capital_lookup().await;

    let result = capital_of(&preset, "Canada").await;
    assert_eq!(result.get_str("result"), Some("Paris"));

    let result = capital_of(&preset, "BLOCK").await;
    assert_eq!(
        result.get_str("result"),
        Some("Tool execution was blocked by before_tool_callback.")
    );

    let result = capital_of(&preset, "United States").await;
    assert_eq!(
        result.get_str("result"),
        Some("Washington, D.C. (Note: This is the capital of the USA).")
    );
    assert_eq!(result.get("note_added_by_callback"), Some(&json!(true)));

    let result = capital_of(&preset, "Germany").await;
    assert_eq!(result.to_value(), json!({"status": "success", "result": "Berlin"}));
}

#[tokio::test]
async fn test_reimbursement_flow_under_gate() {
    let preset = presets::reimbursement().await;
    let defs = preset.registry.to_definitions().await;
    let approval = defs.iter().find(|d| d.name == "ask_for_approval").unwrap();
    assert!(approval.long_running);

    let mut agent = preset.into_direct(Arc::new(AlwaysReject));

    let reply = agent
        .send(r#"reimburse purpose="taxi" amount=20"#)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value["status"], "success");

    let err = agent
        .send(r#"reimburse purpose="laptop" amount=1500"#)
        .await
        .unwrap_err();
    let permission = err.downcast_ref::<PermissionError>().unwrap();
    assert!(matches!(permission, PermissionError::Rejected(_)));

    let reply = agent
        .send(r#"ask_for_approval purpose="laptop" amount=1500"#)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value["status"], "pending");
    assert_eq!(value["ticket-id"], "approval-ticket-1");
    assert_eq!(value["approver"], "Sean Zhou");
}

#[tokio::test]
async fn test_repl_drives_support_agent() {
    let preset = presets::customer_support().await;
    let mut agent = preset.into_direct(Arc::new(AlwaysApprove));

    let input = "\ncheck_and_transfer query=\"URGENT: locked out\"\nunknown_tool\nquit\ncheck_and_transfer query=late\n";
    let mut repl = Repl::new(Lines::new(Cursor::new(input)), Vec::new());
    repl.run(&mut agent).await.unwrap();

    let out = String::from_utf8(repl.into_output()).unwrap();
    assert!(out.starts_with(toolwire::agent::BANNER));
    assert!(out.contains("Transferring to support agent."));
    assert!(out.contains("[transferring to support_agent]"));
    assert!(out.contains("Error: Tool not found: unknown_tool"));
    assert!(!out.contains("handled by the main agent"));
}
