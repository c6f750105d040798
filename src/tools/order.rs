// ABOUTME: Order status lookup against a fixed backend table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tool::{FunctionTool, Outcome, Schema, ToolArgs};

#[derive(Debug, Clone, Deserialize)]
pub struct OrderArgs {
    pub order_id: String,
}

impl ToolArgs for OrderArgs {
    fn schema() -> Value {
        Schema::object()
            .string("order_id", "The ID of the order to look up.", true)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub state: String,
    pub tracking_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStatus {
    pub order: Order,
}

fn fetch_status_from_backend(order_id: &str) -> Option<Order> {
    (order_id == "12345").then(|| Order {
        state: "shipped".into(),
        tracking_number: "1Z9...".into(),
    })
}

pub fn lookup_order_status(args: OrderArgs) -> Outcome<OrderStatus> {
    match fetch_status_from_backend(&args.order_id) {
        Some(order) => Outcome::Success(OrderStatus { order }),
        None => Outcome::error(format!("Order ID {} not found.", args.order_id)),
    }
}

pub fn lookup_order_status_tool() -> FunctionTool<OrderArgs> {
    FunctionTool::new(
        "lookup_order_status",
        "Fetches the current status of a customer's order using its ID.",
        lookup_order_status,
    )
}
