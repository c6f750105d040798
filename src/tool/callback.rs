// ABOUTME: Tool callbacks - hooks a Registry runs around every invocation to
// ABOUTME: rewrite arguments, answer in place of the tool, or rewrite the result.

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolResult};
use crate::context::ToolContext;

/// What a before-callback wants done with a call.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BeforeToolAction {
    /// Run the tool with the arguments as they are.
    #[default]
    Continue,

    /// Run the tool with these arguments instead.
    ReplaceArgs(Value),

    /// Skip the tool and use this result.
    Respond(ToolResult),
}

/// Observes or changes tool calls made through a `Registry`.
///
/// Callbacks run in registration order. Each before-callback sees the
/// arguments left by the previous one; a `Respond` ends the chain and the tool
/// is not run. After-callbacks run for every result, including one produced
/// by `Respond`, and each sees the result left by the previous one.
///
/// An `Err` from either hook fails the invocation with `ToolError::Callback`.
#[async_trait]
pub trait ToolCallback: Send + Sync {
    async fn before_tool(
        &self,
        tool: &dyn Tool,
        args: &Value,
        ctx: &ToolContext,
    ) -> anyhow::Result<BeforeToolAction> {
        let _ = (tool, args, ctx);
        Ok(BeforeToolAction::Continue)
    }

    /// Return `Some` to replace the result.
    async fn after_tool(
        &self,
        tool: &dyn Tool,
        args: &Value,
        ctx: &ToolContext,
        result: &ToolResult,
    ) -> anyhow::Result<Option<ToolResult>> {
        let _ = (tool, args, ctx, result);
        Ok(None)
    }
}
