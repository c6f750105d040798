// ABOUTME: Toolset - a named collection of tools, possibly backed by an
// ABOUTME: external process. Includes ToolFilter, prefixing, and StaticToolset.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Tool, ToolResult};
use crate::context::ToolContext;
use crate::error::ToolError;

/// A named collection of tools.
#[async_trait]
pub trait Toolset: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// The tools this set currently exposes.
    async fn tools(&self) -> Result<Vec<Arc<dyn Tool>>, ToolError>;

    /// Release any resources held by the set.
    async fn close(&self) -> Result<(), ToolError> {
        Ok(())
    }
}

/// Allowlist/denylist filter over tool names. The denylist wins.
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    allowed: Option<Vec<String>>,
    denied: Vec<String>,
}

impl ToolFilter {
    /// A filter that lets everything through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only let these names through.
    pub fn allow<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Never let these names through.
    pub fn deny<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.denied = names.into_iter().map(Into::into).collect();
        self
    }

    /// Check if a tool name passes the filter.
    pub fn is_allowed(&self, name: &str) -> bool {
        if self.denied.iter().any(|d| d == name) {
            return false;
        }
        match &self.allowed {
            None => true,
            Some(allowed) => allowed.iter().any(|a| a == name),
        }
    }
}

/// Build the exposed name for a tool inside a prefixed set.
pub fn prefixed_name(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{}_{}", p, name),
        _ => name.to_string(),
    }
}

/// A tool re-exposed under a different name.
pub struct PrefixedTool {
    inner: Arc<dyn Tool>,
    name: String,
}

impl PrefixedTool {
    pub fn new(inner: Arc<dyn Tool>, prefix: &str) -> Self {
        let name = prefixed_name(Some(prefix), inner.name());
        Self { inner, name }
    }
}

#[async_trait]
impl Tool for PrefixedTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn schema(&self) -> serde_json::Value {
        self.inner.schema()
    }

    fn is_long_running(&self) -> bool {
        self.inner.is_long_running()
    }

    fn requires_approval(&self, params: &serde_json::Value) -> bool {
        self.inner.requires_approval(params)
    }

    async fn execute(
        &self,
        ctx: &ToolContext,
        params: serde_json::Value,
    ) -> Result<ToolResult, anyhow::Error> {
        self.inner.execute(ctx, params).await
    }
}

/// An in-process toolset with an optional name prefix and filter.
///
/// The filter applies to the unprefixed tool names.
pub struct StaticToolset {
    name: String,
    prefix: Option<String>,
    filter: ToolFilter,
    tools: Vec<Arc<dyn Tool>>,
}

impl StaticToolset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            filter: ToolFilter::default(),
            tools: Vec::new(),
        }
    }

    /// Expose every tool as `<prefix>_<name>`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn filter(mut self, filter: ToolFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Add a tool to the set.
    pub fn with_tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }
}

#[async_trait]
impl Toolset for StaticToolset {
    fn name(&self) -> &str {
        &self.name
    }

    async fn tools(&self) -> Result<Vec<Arc<dyn Tool>>, ToolError> {
        Ok(self
            .tools
            .iter()
            .filter(|t| self.filter.is_allowed(t.name()))
            .map(|t| match self.prefix.as_deref() {
                Some(p) if !p.is_empty() => Arc::new(PrefixedTool::new(t.clone(), p)) as Arc<dyn Tool>,
                _ => t.clone(),
            })
            .collect())
    }
}
