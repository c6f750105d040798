// ABOUTME: Gate - combines a Policy with an ApprovalHandler and is consulted
// ABOUTME: before a tool call runs. Also the fixed-answer handlers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use super::{ApprovalHandler, ApprovalRequest, Decision, Policy};
use crate::context::ToolContext;
use crate::error::PermissionError;
use crate::tool::Tool;

/// Permission check run before each call.
pub struct Gate {
    policy: Policy,
    handler: Arc<dyn ApprovalHandler>,
}

impl Gate {
    pub fn new(policy: Policy, handler: Arc<dyn ApprovalHandler>) -> Self {
        Self { policy, handler }
    }

    /// A gate that allows everything unless a tool asks for approval itself.
    pub fn permissive() -> Self {
        Self::new(Policy::allow_all(), Arc::new(AlwaysApprove))
    }

    /// The decision for a call before the handler is consulted.
    ///
    /// A tool that requires approval for these arguments turns `Allow` into `Ask`.
    pub fn decide(&self, tool: &dyn Tool, params: &Value) -> Decision {
        match self.policy.evaluate(tool.name(), params) {
            Decision::Allow if tool.requires_approval(params) => Decision::Ask,
            decision => decision,
        }
    }

    pub async fn check(
        &self,
        tool: &dyn Tool,
        params: &Value,
        ctx: &ToolContext,
    ) -> Result<(), PermissionError> {
        let decision = self.decide(tool, params);
        debug!(tool = tool.name(), ?decision, "permission decision");
        match decision {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(PermissionError::Denied(tool.name().to_string())),
            Decision::Ask => {
                let request = ApprovalRequest::new(tool, params, ctx);
                let approved = self
                    .handler
                    .approve(&request)
                    .await
                    .map_err(PermissionError::Handler)?;
                info!(
                    tool = tool.name(),
                    invocation_id = %request.invocation_id,
                    approved,
                    "approval answered"
                );
                if approved {
                    Ok(())
                } else {
                    Err(PermissionError::Rejected(tool.name().to_string()))
                }
            }
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Approves every request. Useful for tests and trusted sessions.
pub struct AlwaysApprove;

#[async_trait]
impl ApprovalHandler for AlwaysApprove {
    async fn approve(&self, _request: &ApprovalRequest) -> anyhow::Result<bool> {
        Ok(true)
    }
}

/// Refuses every request, so anything the policy asks about never runs.
pub struct AlwaysReject;

#[async_trait]
impl ApprovalHandler for AlwaysReject {
    async fn approve(&self, _request: &ApprovalRequest) -> anyhow::Result<bool> {
        Ok(false)
    }
}
