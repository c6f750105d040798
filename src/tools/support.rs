// ABOUTME: Customer support routing tool - hands urgent queries to the
// ABOUTME: support agent through the context's transfer action.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::context::ToolContext;
use crate::tool::{FunctionTool, Outcome, Schema, ToolArgs};

/// Agent that receives urgent queries.
pub const SUPPORT_AGENT: &str = "support_agent";

#[derive(Debug, Clone, Deserialize)]
pub struct QueryArgs {
    pub query: String,
}

impl ToolArgs for QueryArgs {
    fn schema() -> Value {
        Schema::object()
            .string("query", "The user query to analyze.", true)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Routing {
    pub message: String,
}

pub async fn check_and_transfer(
    ctx: ToolContext,
    args: QueryArgs,
) -> anyhow::Result<Outcome<Routing>> {
    let message = if args.query.to_lowercase().contains("urgent") {
        info!("urgent query detected, transferring to {}", SUPPORT_AGENT);
        ctx.transfer_to_agent(SUPPORT_AGENT).await;
        "Transferring to support agent."
    } else {
        info!("query is not urgent, handling normally");
        "Query will be handled by the main agent."
    };
    Ok(Outcome::Success(Routing {
        message: message.to_string(),
    }))
}

pub fn check_and_transfer_tool() -> FunctionTool<QueryArgs> {
    FunctionTool::with_context(
        "check_and_transfer",
        "Checks the user's query and transfers to a support agent if urgent.",
        check_and_transfer,
    )
}
