// ABOUTME: Capital-city lookup plus the callbacks that steer it: one redirects
// ABOUTME: or blocks countries before the call, one annotates a result after it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::context::ToolContext;
use crate::tool::{
    BeforeToolAction, FunctionTool, Schema, Tool, ToolArgs, ToolCallback, ToolResult,
};

pub const CAPITAL_TOOL: &str = "get_capital_city";

/// Message returned instead of running the lookup for a blocked country.
pub const BLOCKED_MESSAGE: &str = "Tool execution was blocked by before_tool_callback.";

#[derive(Debug, Clone, Deserialize)]
pub struct CountryArgs {
    pub country: String,
}

impl ToolArgs for CountryArgs {
    fn schema() -> Value {
        Schema::object()
            .string("country", "The country to get the capital for.", true)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capital {
    pub result: String,
}

pub fn get_capital_city(args: CountryArgs) -> Capital {
    info!(country = %args.country, "get_capital_city called");
    let capital = match args.country.to_lowercase().as_str() {
        "united states" => Some("Washington, D.C."),
        "canada" => Some("Ottawa"),
        "france" => Some("Paris"),
        "germany" => Some("Berlin"),
        _ => None,
    };
    Capital {
        result: capital
            .map(str::to_string)
            .unwrap_or_else(|| format!("Capital not found for {}", args.country)),
    }
}

pub fn get_capital_city_tool() -> FunctionTool<CountryArgs> {
    FunctionTool::new(
        CAPITAL_TOOL,
        "Retrieves the capital city for a given country.",
        get_capital_city,
    )
}

/// Sends Canada lookups to France and answers "BLOCK" without a lookup.
pub struct CountryRedirect;

#[async_trait]
impl ToolCallback for CountryRedirect {
    async fn before_tool(
        &self,
        tool: &dyn Tool,
        args: &Value,
        ctx: &ToolContext,
    ) -> anyhow::Result<BeforeToolAction> {
        if tool.name() != CAPITAL_TOOL {
            return Ok(BeforeToolAction::Continue);
        }
        let country = args.get("country").and_then(Value::as_str).unwrap_or("");
        if country.eq_ignore_ascii_case("canada") {
            info!(agent = ctx.agent_name(), "redirecting Canada to France");
            let mut args = args.clone();
            args["country"] = json!("France");
            return Ok(BeforeToolAction::ReplaceArgs(args));
        }
        if country.eq_ignore_ascii_case("block") {
            info!(agent = ctx.agent_name(), "blocking capital lookup");
            return Ok(BeforeToolAction::Respond(ToolResult::text(BLOCKED_MESSAGE)));
        }
        Ok(BeforeToolAction::Continue)
    }
}

/// Notes which country Washington, D.C. belongs to.
pub struct CapitalNote;

#[async_trait]
impl ToolCallback for CapitalNote {
    async fn after_tool(
        &self,
        tool: &dyn Tool,
        _args: &Value,
        _ctx: &ToolContext,
        result: &ToolResult,
    ) -> anyhow::Result<Option<ToolResult>> {
        if tool.name() != CAPITAL_TOOL || result.get_str("result") != Some("Washington, D.C.") {
            return Ok(None);
        }
        Ok(Some(
            result
                .clone()
                .with_field("result", "Washington, D.C. (Note: This is the capital of the USA).")
                .with_field("note_added_by_callback", true),
        ))
    }
}
