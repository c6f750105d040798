// ABOUTME: Calculator toolset (add and subtract under a name prefix) and a
// ABOUTME: standalone greeting tool.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::context::ToolContext;
use crate::tool::{FunctionTool, Outcome, Schema, StaticToolset, ToolArgs};

/// Prefix the calculator toolset puts in front of its tool names.
pub const CALCULATOR_PREFIX: &str = "calculator";

/// State key recording the last arithmetic operation.
pub const LAST_MATH_OPERATION_KEY: &str = "last_math_operation";

#[derive(Debug, Clone, Deserialize)]
pub struct MathArgs {
    pub a: i64,
    pub b: i64,
}

impl ToolArgs for MathArgs {
    fn schema() -> Value {
        Schema::object()
            .integer("a", "The first number.", true)
            .integer("b", "The second number.", true)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MathResult {
    pub result: i64,
}

pub async fn add_numbers(ctx: ToolContext, args: MathArgs) -> anyhow::Result<Outcome<MathResult>> {
    info!(a = args.a, b = args.b, "add_numbers called");
    let Some(result) = args.a.checked_add(args.b) else {
        return Ok(Outcome::error("Result is out of range."));
    };
    ctx.state()
        .set(LAST_MATH_OPERATION_KEY, json!("addition"))
        .await?;
    Ok(Outcome::Success(MathResult { result }))
}

pub fn subtract_numbers(args: MathArgs) -> Outcome<MathResult> {
    info!(a = args.a, b = args.b, "subtract_numbers called");
    match args.a.checked_sub(args.b) {
        Some(result) => Outcome::Success(MathResult { result }),
        None => Outcome::error("Result is out of range."),
    }
}

/// The arithmetic tools, exposed as `<prefix>_add_numbers` and
/// `<prefix>_subtract_numbers`.
pub fn calculator_toolset(prefix: &str) -> StaticToolset {
    StaticToolset::new("calculator")
        .prefix(prefix)
        .with_tool(FunctionTool::with_context(
            "add_numbers",
            "Adds two integer numbers.",
            add_numbers,
        ))
        .with_tool(FunctionTool::new(
            "subtract_numbers",
            "Subtracts the second number from the first.",
            subtract_numbers,
        ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct GreetArgs {
    #[serde(default = "default_greet_name")]
    pub name: String,
}

fn default_greet_name() -> String {
    "User".to_string()
}

impl ToolArgs for GreetArgs {
    fn schema() -> Value {
        Schema::object()
            .string("name", "Who to greet. Defaults to \"User\".", false)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Greeting {
    pub greeting: String,
}

pub fn greet_user(args: GreetArgs) -> Greeting {
    Greeting {
        greeting: format!("Hello, {}!", args.name),
    }
}

pub fn greet_user_tool() -> FunctionTool<GreetArgs> {
    FunctionTool::new("greet_user", "Greets the user.", greet_user)
}
