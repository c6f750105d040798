// ABOUTME: Ready-made agents - each preset pairs a definition with a populated
// ABOUTME: registry, a suggested permission policy, and its session context.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::{AgentDefinition, DirectAgent};
use crate::context::{Artifact, ToolContext};
use crate::error::{ToolError, ToolwireError};
use crate::permission::{ApprovalHandler, Decision, Gate, Policy};
use crate::tool::{Registry, ToolFilter};
use crate::tools::{
    APPROVAL_THRESHOLD, CALCULATOR_PREFIX, CapitalNote, CountryRedirect, analyze_sentiment_tool,
    ask_for_approval_tool, calculator_toolset, check_and_transfer_tool, filesystem_toolset,
    get_capital_city_tool, get_current_time_tool, get_weather_report_tool, get_weather_tool,
    greet_user_tool, lookup_order_status_tool, maps_toolset, process_document_tool,
    reimburse_tool, update_user_preference_tool,
};

/// An assembled agent, ready to hand to a runtime or a `DirectAgent`.
pub struct AgentPreset {
    pub definition: AgentDefinition,
    pub registry: Registry,
    /// Policy the agent is meant to run under.
    pub policy: Policy,
    pub context: ToolContext,
}

impl AgentPreset {
    fn new(definition: AgentDefinition, registry: Registry) -> Self {
        let context = ToolContext::in_memory(definition.name.clone());
        Self {
            definition,
            registry,
            policy: Policy::allow_all(),
            context,
        }
    }

    fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Run on `model` instead of the preset's own choice.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.definition.model = model.into();
        self
    }

    /// A direct-dispatch agent gated by this preset's policy.
    pub fn into_direct(self, handler: Arc<dyn ApprovalHandler>) -> DirectAgent {
        DirectAgent::new(self.definition, self.registry)
            .gate(Gate::new(self.policy, handler))
            .context(self.context)
    }
}

const WEATHER_TIME_INSTRUCTION: &str =
    "You are a helpful agent who can answer user questions about the time and weather in a city.";

pub async fn weather_time() -> AgentPreset {
    let registry = Registry::new();
    registry.register(get_weather_tool()).await;
    registry.register(get_current_time_tool()).await;

    AgentPreset::new(
        AgentDefinition::new("weather_time_agent", WEATHER_TIME_INSTRUCTION)
            .description("Agent to answer questions about the time and weather in a city."),
        registry,
    )
}

const WEATHER_SENTIMENT_INSTRUCTION: &str = "\
You are a helpful assistant that first checks the weather and then analyzes its sentiment.

Follow these steps:
1. Use the 'get_weather_report' tool to get the weather for the requested city.
2. If the 'get_weather_report' tool returns an error, inform the user about the error and stop.
3. If the weather report is available, use the 'analyze_sentiment' tool to determine the sentiment of the weather report.
4. Finally, provide a summary to the user, including the weather report and its sentiment.";

pub async fn weather_sentiment() -> AgentPreset {
    let registry = Registry::new();
    registry.register(get_weather_report_tool()).await;
    registry.register(analyze_sentiment_tool()).await;

    AgentPreset::new(
        AgentDefinition::new("weather_sentiment_agent", WEATHER_SENTIMENT_INSTRUCTION)
            .description("Checks the weather and judges how it feels."),
        registry,
    )
}

pub async fn order_status() -> AgentPreset {
    let registry = Registry::new();
    registry.register(lookup_order_status_tool()).await;

    AgentPreset::new(
        AgentDefinition::new(
            "order_status_agent",
            "Look up order status with the lookup_order_status tool. \
             If the order is not found, tell the user.",
        )
        .description("Answers questions about the status of an order."),
        registry,
    )
}

pub async fn user_preferences() -> AgentPreset {
    let registry = Registry::new();
    registry.register(update_user_preference_tool()).await;

    AgentPreset::new(
        AgentDefinition::new(
            "preference_agent",
            "When the user states a preference, save it with update_user_preference.",
        )
        .description("Remembers user preferences for the session."),
        registry,
    )
}

/// Document analysis over the given documents, stored as artifacts under
/// their names before the agent starts.
pub async fn document_analysis(
    documents: Vec<(String, Artifact)>,
) -> Result<AgentPreset, ToolwireError> {
    let registry = Registry::new();
    registry.register(process_document_tool()).await;

    let preset = AgentPreset::new(
        AgentDefinition::new(
            "document_analyzes_agent",
            "Use process_document to analyze the document the user names, \
             focusing on the topic they ask about.",
        )
        .model("gemini-2.0-flash")
        .description("An agent that analyzes documents using context from memory"),
        registry,
    );
    for (name, artifact) in documents {
        preset.context.artifacts().save(&name, artifact).await?;
    }
    Ok(preset)
}

const CALCULATOR_INSTRUCTION: &str = "\
You are a calculator and a greeter.
If the user asks for a math operation, use the calculator tools.
If the user asks for a greeting, use the greet_user tool.
The last math operation is stored in the 'last_math_operation' state variable.";

pub async fn calculator() -> Result<AgentPreset, ToolwireError> {
    let registry = Registry::new();
    registry.register(greet_user_tool()).await;
    registry
        .register_toolset(Arc::new(calculator_toolset(CALCULATOR_PREFIX)))
        .await?;

    Ok(AgentPreset::new(
        AgentDefinition::new("calculator_agent", CALCULATOR_INSTRUCTION)
            .description("Adds, subtracts and greets."),
        registry,
    ))
}

/// Capital lookups steered by callbacks: Canada is redirected to France,
/// "BLOCK" is answered without a lookup, and Washington gets a note.
pub async fn capital_lookup() -> AgentPreset {
    let registry = Registry::new();
    registry.register(get_capital_city_tool()).await;
    registry.add_callback(CountryRedirect).await;
    registry.add_callback(CapitalNote).await;

    AgentPreset::new(
        AgentDefinition::new(
            "capital_agent",
            "You are an agent that can find capital cities. Use the get_capital_city tool.",
        )
        .description("Finds capital cities, with callbacks around each lookup."),
        registry,
    )
}

pub async fn customer_support() -> AgentPreset {
    let registry = Registry::new();
    registry.register(check_and_transfer_tool()).await;

    AgentPreset::new(
        AgentDefinition::new(
            "main_agent",
            "You are the main agent. Use the check_and_transfer tool to analyze the user query. \
             If the query is not urgent, handle it yourself.",
        )
        .description("The main agent that routes non-urgent queries."),
        registry,
    )
}

fn reimbursement_decision(params: &Value) -> Decision {
    match params.get("amount").and_then(Value::as_f64) {
        Some(amount) if amount < APPROVAL_THRESHOLD => Decision::Allow,
        _ => Decision::Ask,
    }
}

const REIMBURSEMENT_INSTRUCTION: &str = "\
You are an agent whose job is to handle the reimbursement process for the employees. \
If the amount is less than $100, you will automatically approve the reimbursement.

If the amount is greater than $100, you will ask for approval from the manager. \
If the manager approves, you will call reimburse() to reimburse the amount to the employee. \
If the manager rejects, you will inform the employee of the rejection.";

/// Payouts at or above the approval threshold are confirmed by a human.
pub async fn reimbursement() -> AgentPreset {
    let registry = Registry::new();
    registry.register(reimburse_tool()).await;
    registry.register(ask_for_approval_tool()).await;

    AgentPreset::new(
        AgentDefinition::new("reimbursement_agent", REIMBURSEMENT_INSTRUCTION)
            .description("Handles employee reimbursements."),
        registry,
    )
    .policy(
        Policy::builder()
            .conditional("reimburse", reimbursement_decision)
            .default(Decision::Allow)
            .build(),
    )
}

const FILESYSTEM_INSTRUCTION: &str =
    "Help the user manage their files. You can list files, read files, etc.";

/// Files under `root`, served by the filesystem MCP server. Tools that change
/// files need confirmation. `allowed` limits which server tools are exposed.
pub async fn filesystem(
    root: &Path,
    timeout: Duration,
    allowed: Option<ToolFilter>,
) -> Result<AgentPreset, ToolwireError> {
    let toolset = filesystem_toolset(root, timeout, allowed).map_err(|e| ToolError::Toolset {
        toolset: "filesystem".to_string(),
        source: e.into(),
    })?;
    let registry = Registry::new();
    registry.register_toolset(Arc::new(toolset)).await?;

    Ok(AgentPreset::new(
        AgentDefinition::new("filesystem_assistant_agent", FILESYSTEM_INSTRUCTION)
            .description(FILESYSTEM_INSTRUCTION),
        registry,
    )
    .policy(
        Policy::builder()
            .ask_pattern("write_*")
            .ask_pattern("edit_*")
            .ask_pattern("move_*")
            .ask("create_directory")
            .default(Decision::Allow)
            .build(),
    ))
}

const MAPS_INSTRUCTION: &str =
    "Help the user with mapping, directions, and finding places using Google Maps tools.";

pub async fn maps(api_key: &str, timeout: Duration) -> Result<AgentPreset, ToolwireError> {
    let registry = Registry::new();
    registry
        .register_toolset(Arc::new(maps_toolset(api_key, timeout)))
        .await?;

    Ok(AgentPreset::new(
        AgentDefinition::new("maps_assistant_agent", MAPS_INSTRUCTION).description(MAPS_INSTRUCTION),
        registry,
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn presets_register_their_tools() {
        assert_eq!(
            weather_time().await.registry.list().await,
            vec!["get_current_time", "get_weather"]
        );
        assert_eq!(
            weather_sentiment().await.registry.list().await,
            vec!["analyze_sentiment", "get_weather_report"]
        );
        assert_eq!(
            calculator().await.unwrap().registry.list().await,
            vec![
                "calculator_add_numbers",
                "calculator_subtract_numbers",
                "greet_user"
            ]
        );
        assert_eq!(
            reimbursement().await.registry.list().await,
            vec!["ask_for_approval", "reimburse"]
        );
    }

    #[tokio::test]
    async fn reimbursement_policy_asks_at_threshold() {
        let preset = reimbursement().await;
        let policy = &preset.policy;
        assert_eq!(
            policy.evaluate("reimburse", &json!({"purpose": "taxi", "amount": 42.0})),
            Decision::Allow
        );
        assert_eq!(
            policy.evaluate("reimburse", &json!({"purpose": "laptop", "amount": 100})),
            Decision::Ask
        );
        assert_eq!(
            policy.evaluate("ask_for_approval", &json!({"purpose": "laptop", "amount": 900})),
            Decision::Allow
        );
    }

    #[tokio::test]
    async fn model_override_replaces_preset_choice() {
        let preset = document_analysis(Vec::new()).await.unwrap();
        assert_eq!(preset.definition.model, "gemini-2.0-flash");

        let preset = preset.model("gemini-2.5-pro");
        assert_eq!(preset.definition.model, "gemini-2.5-pro");
        assert_eq!(preset.context.agent_name(), "document_analyzes_agent");
    }

    #[tokio::test]
    async fn document_analysis_seeds_artifacts() {
        let preset = document_analysis(vec![(
            "report.txt".to_string(),
            Artifact::text("Quarterly numbers"),
        )])
        .await
        .unwrap();
        assert_eq!(
            preset.context.artifacts().list().await.unwrap(),
            vec!["report.txt"]
        );
    }
}
