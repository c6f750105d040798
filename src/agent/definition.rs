// ABOUTME: Agent definition - the name, model, description and instruction
// ABOUTME: an agent is assembled with.

use crate::config::DEFAULT_MODEL;

/// Describes one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDefinition {
    /// Unique name, also the target of agent transfers.
    pub name: String,

    /// Model the agent would run on (e.g., "gemini-2.5-flash").
    pub model: String,

    /// One-line summary shown to users and to other agents.
    pub description: String,

    /// System instruction for a model-backed agent.
    pub instruction: String,
}

impl AgentDefinition {
    /// Create a definition with the default model.
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: DEFAULT_MODEL.to_string(),
            description: String::new(),
            instruction: instruction.into(),
        }
    }

    /// Set the model for this agent.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let def = AgentDefinition::new("weather_agent", "Answer weather questions.")
            .model("gemini-2.0-flash")
            .description("Weather lookups");

        assert_eq!(def.name, "weather_agent");
        assert_eq!(def.model, "gemini-2.0-flash");
        assert_eq!(def.description, "Weather lookups");
        assert_eq!(def.instruction, "Answer weather questions.");
    }

    #[test]
    fn model_defaults() {
        let def = AgentDefinition::new("a", "b");
        assert_eq!(def.model, DEFAULT_MODEL);
        assert!(def.description.is_empty());
    }
}
