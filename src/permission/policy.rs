// ABOUTME: Policy engine deciding whether a tool call may run, must be
// ABOUTME: confirmed by a human first, or is refused outright.

use std::sync::Arc;

use serde_json::Value;

/// Outcome of evaluating a policy for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
    /// Run only after an approval handler confirms.
    Ask,
}

/// Decides based on the call's arguments.
pub type ConditionFn = Arc<dyn Fn(&Value) -> Decision + Send + Sync>;

enum Matcher {
    Exact(String),
    Pattern(glob::Pattern),
}

impl Matcher {
    fn matches(&self, tool: &str) -> bool {
        match self {
            Self::Exact(name) => name == tool,
            Self::Pattern(pattern) => pattern.matches(tool),
        }
    }
}

enum Rule {
    Fixed(Matcher, Decision),
    Conditional { tool: String, condition: ConditionFn },
}

/// Ordered rules evaluated first-match-wins, with a fallback decision.
pub struct Policy {
    rules: Vec<Rule>,
    default: Decision,
}

impl Policy {
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::new()
    }

    /// A policy that lets every call through.
    pub fn allow_all() -> Self {
        Self::builder().default(Decision::Allow).build()
    }

    /// A policy that asks before every call.
    pub fn ask_all() -> Self {
        Self::builder().default(Decision::Ask).build()
    }

    pub fn evaluate(&self, tool: &str, params: &Value) -> Decision {
        for rule in &self.rules {
            match rule {
                Rule::Fixed(matcher, decision) if matcher.matches(tool) => return *decision,
                Rule::Conditional { tool: t, condition } if t == tool => return condition(params),
                _ => continue,
            }
        }
        self.default
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Policy")
            .field("rules", &self.rules.len())
            .field("default", &self.default)
            .finish()
    }
}

/// Builder for policies. Unmatched tools are denied unless `default` says otherwise.
pub struct PolicyBuilder {
    rules: Vec<Rule>,
    default: Decision,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default: Decision::Deny,
        }
    }

    fn exact(mut self, tool: impl Into<String>, decision: Decision) -> Self {
        self.rules
            .push(Rule::Fixed(Matcher::Exact(tool.into()), decision));
        self
    }

    /// Invalid patterns are ignored.
    fn pattern(mut self, pattern: &str, decision: Decision) -> Self {
        if let Ok(p) = glob::Pattern::new(pattern) {
            self.rules.push(Rule::Fixed(Matcher::Pattern(p), decision));
        }
        self
    }

    pub fn allow(self, tool: impl Into<String>) -> Self {
        self.exact(tool, Decision::Allow)
    }

    pub fn deny(self, tool: impl Into<String>) -> Self {
        self.exact(tool, Decision::Deny)
    }

    pub fn ask(self, tool: impl Into<String>) -> Self {
        self.exact(tool, Decision::Ask)
    }

    pub fn allow_pattern(self, pattern: &str) -> Self {
        self.pattern(pattern, Decision::Allow)
    }

    pub fn deny_pattern(self, pattern: &str) -> Self {
        self.pattern(pattern, Decision::Deny)
    }

    pub fn ask_pattern(self, pattern: &str) -> Self {
        self.pattern(pattern, Decision::Ask)
    }

    /// Decide a tool's calls from their arguments.
    pub fn conditional<F>(mut self, tool: impl Into<String>, condition: F) -> Self
    where
        F: Fn(&Value) -> Decision + Send + Sync + 'static,
    {
        self.rules.push(Rule::Conditional {
            tool: tool.into(),
            condition: Arc::new(condition),
        });
        self
    }

    pub fn default(mut self, decision: Decision) -> Self {
        self.default = decision;
        self
    }

    pub fn build(self) -> Policy {
        Policy {
            rules: self.rules,
            default: self.default,
        }
    }
}
