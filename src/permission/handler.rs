// ABOUTME: Approval requests - what an approver is shown about a gated call -
// ABOUTME: and the ApprovalHandler trait that answers them.

use std::fmt::Write as _;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::context::ToolContext;
use crate::tool::Tool;

/// A gated tool call waiting for a yes or no.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalRequest {
    pub tool: String,
    pub description: String,
    pub arguments: Value,

    /// The tool answers later with a pending ticket.
    pub long_running: bool,

    /// Agent whose session the call belongs to.
    pub agent: String,
    pub invocation_id: String,
}

impl ApprovalRequest {
    pub fn new(tool: &dyn Tool, arguments: &Value, ctx: &ToolContext) -> Self {
        Self {
            tool: tool.name().to_string(),
            description: tool.description().to_string(),
            arguments: arguments.clone(),
            long_running: tool.is_long_running(),
            agent: ctx.agent_name().to_string(),
            invocation_id: ctx.invocation_id().to_string(),
        }
    }

    /// Text for a human approver.
    pub fn prompt(&self) -> String {
        let mut out = format!("{} wants to call '{}'", self.agent, self.tool);
        if self.long_running {
            out.push_str(" (long-running)");
        }
        if !self.description.is_empty() {
            let _ = write!(out, "\n  {}", self.description);
        }
        let _ = write!(out, "\n  arguments: {}", self.arguments);
        out
    }
}

/// Answers approval requests, typically by asking a person.
#[async_trait]
pub trait ApprovalHandler: Send + Sync {
    /// `Ok(true)` lets the call run, `Ok(false)` refuses it.
    async fn approve(&self, request: &ApprovalRequest) -> anyhow::Result<bool>;
}
