// ABOUTME: Tests for FunctionTool - argument decoding, result normalization,
// ABOUTME: error policies, and context-aware functions.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::*;
use crate::context::ToolContext;
use crate::error::ToolError;

#[derive(Deserialize)]
struct CityArgs {
    city: String,
}

impl ToolArgs for CityArgs {
    fn schema() -> serde_json::Value {
        Schema::object()
            .string("city", "The name of the city.", true)
            .build()
    }
}

#[derive(Serialize)]
struct Report {
    report: String,
}

fn lookup(args: CityArgs) -> Outcome<Report> {
    if args.city.eq_ignore_ascii_case("paris") {
        Outcome::Success(Report {
            report: "Sunny".into(),
        })
    } else {
        Outcome::error(format!("No data for '{}'.", args.city))
    }
}

#[tokio::test]
async fn test_schema_comes_from_args_record() {
    let tool = FunctionTool::new("lookup", "Looks up a city", lookup);

    let def = tool.definition();
    assert_eq!(def.name, "lookup");
    assert_eq!(def.input_schema["required"], json!(["city"]));
    assert!(!def.long_running);
}

#[tokio::test]
async fn test_typed_outcome_success() {
    let tool = FunctionTool::new("lookup", "Looks up a city", lookup);
    let ctx = ToolContext::in_memory("test_agent");

    let result = tool.execute(&ctx, json!({"city": "Paris"})).await.unwrap();
    assert_eq!(result.status, ToolStatus::Success);
    assert_eq!(result.get_str("report"), Some("Sunny"));
}

#[tokio::test]
async fn test_typed_outcome_error_stays_a_result() {
    let tool = FunctionTool::new("lookup", "Looks up a city", lookup);
    let ctx = ToolContext::in_memory("test_agent");

    let result = tool.execute(&ctx, json!({"city": "Oslo"})).await.unwrap();
    assert!(result.is_error());
    assert_eq!(result.error_message(), Some("No data for 'Oslo'."));
}

#[tokio::test]
async fn test_scalar_return_is_wrapped() {
    let tool = FunctionTool::new("answer", "Returns a number", |_: NoArgs| 42);
    let ctx = ToolContext::in_memory("test_agent");

    let result = tool.execute(&ctx, json!({})).await.unwrap();
    assert_eq!(result.status, ToolStatus::Success);
    assert_eq!(result.fields["result"], 42);
}

#[tokio::test]
async fn test_object_without_status_is_success() {
    let tool = FunctionTool::new("plain", "Returns an object", |_: NoArgs| {
        json!({"value": "x"})
    });
    let ctx = ToolContext::in_memory("test_agent");

    let result = tool.execute(&ctx, json!({})).await.unwrap();
    assert_eq!(result.to_value(), json!({"status": "success", "value": "x"}));
}

#[tokio::test]
async fn test_undecodable_args_are_validation_errors() {
    let tool = FunctionTool::new("lookup", "Looks up a city", lookup);
    let ctx = ToolContext::in_memory("test_agent");

    let err = tool.execute(&ctx, json!({"town": "Paris"})).await.unwrap_err();
    let tool_err = err.downcast::<ToolError>().unwrap();
    assert!(tool_err.is_validation());
}

#[tokio::test]
async fn test_payload_policy_reports_error_in_result() {
    let tool = FunctionTool::with_context("fails", "Always fails", |_ctx, _: NoArgs| async {
        Err::<serde_json::Value, _>(anyhow::anyhow!("disk full"))
    });
    assert_eq!(tool.error_policy(), ErrorPolicy::Payload);
    let ctx = ToolContext::in_memory("test_agent");

    let result = tool.execute(&ctx, json!({})).await.unwrap();
    assert!(result.is_error());
    assert_eq!(result.error_message(), Some("disk full"));
}

#[tokio::test]
async fn test_propagate_policy_returns_err() {
    let tool = FunctionTool::with_context("fails", "Always fails", |_ctx, _: NoArgs| async {
        Err::<serde_json::Value, _>(anyhow::anyhow!("disk full"))
    })
    .propagate_errors();
    let ctx = ToolContext::in_memory("test_agent");

    let err = tool.execute(&ctx, json!({})).await.unwrap_err();
    assert_eq!(err.to_string(), "disk full");
}

#[tokio::test]
async fn test_context_function_reads_and_writes_state() {
    let tool = FunctionTool::with_context("bump", "Bumps a counter", |ctx: ToolContext, _: NoArgs| async move {
        let current = ctx
            .state()
            .get("counter")
            .await?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        ctx.state().set("counter", json!(current + 1)).await?;
        Ok(json!({"counter": current + 1}))
    });
    let ctx = ToolContext::in_memory("test_agent");

    tool.execute(&ctx, json!({})).await.unwrap();
    let result = tool.execute(&ctx, json!({})).await.unwrap();
    assert_eq!(result.fields["counter"], 2);
    assert_eq!(ctx.state().get("counter").await.unwrap(), Some(json!(2)));
}

#[tokio::test]
async fn test_long_running_flag() {
    let tool = FunctionTool::new("slow", "Takes a while", |_: NoArgs| {
        json!({"status": "pending"})
    })
    .long_running();
    let ctx = ToolContext::in_memory("test_agent");

    assert!(tool.is_long_running());
    assert!(tool.definition().long_running);
    let result = tool.execute(&ctx, json!({})).await.unwrap();
    assert!(result.is_pending());
}
