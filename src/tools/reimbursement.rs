// ABOUTME: Reimbursement tools - a long-running approval request that answers
// ABOUTME: with a pending ticket, and the payout itself.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::tool::{FunctionTool, Schema, ToolArgs, ToolResult};

/// Who approval requests are routed to.
pub const APPROVER: &str = "Sean Zhou";

/// Amounts at or above this need a manager's approval.
pub const APPROVAL_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Deserialize)]
pub struct ReimbursementArgs {
    pub purpose: String,
    pub amount: f64,
}

impl ToolArgs for ReimbursementArgs {
    fn schema() -> Value {
        Schema::object()
            .string("purpose", "The purpose of the reimbursement.", true)
            .number("amount", "The amount to reimburse.", true)
            .build()
    }
}

/// Open an approval ticket. The decision arrives later in the conversation.
pub fn ask_for_approval(args: ReimbursementArgs) -> ToolResult {
    ToolResult::pending()
        .with_field("approver", APPROVER)
        .with_field("purpose", args.purpose)
        .with_field("amount", args.amount)
        .with_field("ticket-id", "approval-ticket-1")
}

/// Send the payout to the payment vendor.
pub fn reimburse(_args: ReimbursementArgs) -> Value {
    json!({"status": "ok"})
}

pub fn ask_for_approval_tool() -> FunctionTool<ReimbursementArgs> {
    FunctionTool::new(
        "ask_for_approval",
        "Ask for approval for the reimbursement.",
        ask_for_approval,
    )
    .long_running()
}

pub fn reimburse_tool() -> FunctionTool<ReimbursementArgs> {
    FunctionTool::new(
        "reimburse",
        "Reimburse the amount of money to the employee.",
        reimburse,
    )
}
