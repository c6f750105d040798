// ABOUTME: DirectAgent - an Agent that reads each input line as a tool call
// ABOUTME: and runs it through the permission gate and the registry.

use std::fmt::Write as _;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::{Agent, AgentDefinition};
use crate::context::ToolContext;
use crate::permission::Gate;
use crate::tool::Registry;

/// `key=value` or `key="quoted value"`.
const PAIR_PATTERN: &str = r#"([A-Za-z_][A-Za-z0-9_\-]*)=("(?:[^"\\]|\\.)*"|\S+)"#;

/// Split an input line into a tool name and its argument object.
///
/// Accepted forms:
/// - `tool`
/// - `tool {"key": "value"}`
/// - `tool key=value other="quoted value"`
///
/// Unquoted values that parse as JSON keep their type (`amount=12.5` is a
/// number); anything else is a string.
pub fn parse_command(line: &str) -> anyhow::Result<(String, Value)> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    if name.is_empty() {
        anyhow::bail!("expected a tool name");
    }

    let args = if rest.is_empty() {
        Value::Object(Map::new())
    } else if rest.starts_with('{') {
        let value: Value = serde_json::from_str(rest)
            .map_err(|e| anyhow::anyhow!("invalid JSON arguments: {e}"))?;
        if !value.is_object() {
            anyhow::bail!("arguments must be a JSON object");
        }
        value
    } else {
        Value::Object(parse_pairs(rest)?)
    };

    Ok((name.to_string(), args))
}

fn parse_pairs(input: &str) -> anyhow::Result<Map<String, Value>> {
    let pattern = Regex::new(PAIR_PATTERN)?;
    let mut args = Map::new();
    let mut end = 0;

    for caps in pattern.captures_iter(input) {
        let (Some(whole), Some(key), Some(raw)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let skipped = input[end..whole.start()].trim();
        if !skipped.is_empty() {
            anyhow::bail!("could not parse arguments near '{skipped}'");
        }
        end = whole.end();

        let raw = raw.as_str();
        let value = if raw.starts_with('"') && raw.len() > 1 && raw.ends_with('"') {
            serde_json::from_str::<Value>(raw)
                .map_err(|e| anyhow::anyhow!("bad quoted value for '{}': {e}", key.as_str()))?
        } else {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        };
        args.insert(key.as_str().to_string(), value);
    }

    let trailing = input[end..].trim();
    if !trailing.is_empty() {
        anyhow::bail!("could not parse arguments near '{trailing}'");
    }
    Ok(args)
}

/// An agent without a model: the user picks the tool.
///
/// Every call goes through the same path a model-driven runtime would use,
/// so validation, the gate, callbacks and result shaping behave identically.
pub struct DirectAgent {
    definition: AgentDefinition,
    registry: Registry,
    gate: Gate,
    ctx: ToolContext,
}

impl DirectAgent {
    /// An agent with a permissive gate and in-memory services.
    pub fn new(definition: AgentDefinition, registry: Registry) -> Self {
        let ctx = ToolContext::in_memory(definition.name.clone());
        Self {
            definition,
            registry,
            gate: Gate::permissive(),
            ctx,
        }
    }

    pub fn gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// Use these services instead of the in-memory defaults.
    pub fn context(mut self, ctx: ToolContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn definition(&self) -> &AgentDefinition {
        &self.definition
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The session-wide context; each call runs in a fresh invocation of it.
    pub fn session(&self) -> &ToolContext {
        &self.ctx
    }

    async fn help(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.definition.name);
        if !self.definition.description.is_empty() {
            let _ = writeln!(out, "{}", self.definition.description);
        }
        let _ = writeln!(out, "\nTools:");
        for def in self.registry.to_definitions().await {
            let marker = if def.long_running { " (long-running)" } else { "" };
            let _ = writeln!(out, "  {}{} - {}", def.name, marker, def.description);
        }
        let _ = write!(out, "\nUsage: <tool> key=value ... or <tool> {{json}}");
        out
    }
}

#[async_trait]
impl Agent for DirectAgent {
    fn name(&self) -> &str {
        &self.definition.name
    }

    async fn send(&mut self, input: &str) -> anyhow::Result<String> {
        if input.trim().eq_ignore_ascii_case("help") {
            return Ok(self.help().await);
        }

        let (name, args) = parse_command(input)?;
        // Reject bad arguments before anyone is asked to approve the call.
        let tool = self.registry.validate(&name, &args).await?;

        let ctx = self.ctx.for_invocation();
        self.gate.check(tool.as_ref(), &args, &ctx).await?;

        let result = self.registry.invoke(&ctx, &name, args).await?;
        let actions = ctx.actions().await;
        debug!(tool = %name, ?actions, "direct call finished");

        let mut reply = serde_json::to_string_pretty(&result)?;
        if let Some(target) = actions.transfer_to_agent {
            let _ = write!(reply, "\n[transferring to {target}]");
        }
        Ok(reply)
    }
}
