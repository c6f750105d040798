// ABOUTME: Implements the Registry - a thread-safe container of tools and the
// ABOUTME: invocation path that runs callbacks, validates, and executes each call.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::validation::validate_arguments;
use super::{BeforeToolAction, Tool, ToolCallback, ToolDefinition, ToolResult, Toolset};
use crate::context::ToolContext;
use crate::error::ToolError;

/// A thread-safe registry of tools.
#[derive(Default, Clone)]
pub struct Registry {
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
    toolsets: Arc<RwLock<Vec<Arc<dyn Toolset>>>>,
    callbacks: Arc<RwLock<Vec<Arc<dyn ToolCallback>>>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    pub async fn register<T: Tool + 'static>(&self, tool: T) {
        self.register_arc(Arc::new(tool)).await;
    }

    /// Register a tool from an Arc. A tool with the same name is replaced.
    pub async fn register_arc(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().await;
        if tools.insert(tool.name().to_string(), tool.clone()).is_some() {
            warn!(tool = tool.name(), "replacing previously registered tool");
        }
    }

    /// Unregister a tool by name.
    pub async fn unregister(&self, name: &str) {
        let mut tools = self.tools.write().await;
        tools.remove(name);
    }

    /// Get a tool by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.get(name).cloned()
    }

    /// List all tool names, sorted alphabetically.
    pub async fn list(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        let mut names: Vec<_> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all registered tools.
    pub async fn all(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.values().cloned().collect()
    }

    /// Get the number of registered tools.
    pub async fn count(&self) -> usize {
        let tools = self.tools.read().await;
        tools.len()
    }

    /// Definitions for every tool, sorted by name.
    pub async fn to_definitions(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.read().await;
        let mut defs: Vec<_> = tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Add a callback run around every invocation, after those already added.
    pub async fn add_callback<C: ToolCallback + 'static>(&self, callback: C) {
        self.callbacks.write().await.push(Arc::new(callback));
    }

    /// Look up a tool and check `args` against its schema without running it.
    pub async fn validate(&self, name: &str, args: &Value) -> Result<Arc<dyn Tool>, ToolError> {
        let tool = self
            .get(name)
            .await
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        check_args(tool.as_ref(), name, args)?;
        Ok(tool)
    }

    /// Register every tool from a toolset and keep the set for `close`.
    ///
    /// Returns the number of tools added.
    pub async fn register_toolset(&self, toolset: Arc<dyn Toolset>) -> Result<usize, ToolError> {
        let tools = toolset.tools().await?;
        let count = tools.len();
        for tool in tools {
            self.register_arc(tool).await;
        }
        debug!(toolset = toolset.name(), count, "registered toolset");
        self.toolsets.write().await.push(toolset);
        Ok(count)
    }

    /// Invoke a tool by name.
    ///
    /// Before-callbacks run first and may rewrite the arguments or answer
    /// in place of the tool. The final arguments are validated against the
    /// tool's schema; a validation failure returns
    /// `ToolError::SchemaValidation` without running the tool. After-callbacks
    /// may then replace the result. Domain misses come back as `Ok` results
    /// with `status = "error"`.
    pub async fn invoke(
        &self,
        ctx: &ToolContext,
        name: &str,
        args: Value,
    ) -> Result<ToolResult, ToolError> {
        let tool = self
            .get(name)
            .await
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        let callbacks: Vec<_> = self.callbacks.read().await.clone();
        let callback_error = |source| ToolError::Callback {
            tool: name.to_string(),
            source,
        };

        let mut args = args;
        let mut answered = None;
        for callback in &callbacks {
            match callback
                .before_tool(tool.as_ref(), &args, ctx)
                .await
                .map_err(callback_error)?
            {
                BeforeToolAction::Continue => {}
                BeforeToolAction::ReplaceArgs(replaced) => {
                    debug!(tool = name, "callback replaced arguments");
                    args = replaced;
                }
                BeforeToolAction::Respond(result) => {
                    debug!(tool = name, "callback answered in place of the tool");
                    answered = Some(result);
                    break;
                }
            }
        }

        let mut result = match answered {
            Some(result) => result,
            None => run_tool(tool.as_ref(), ctx, name, &args).await?,
        };

        for callback in &callbacks {
            if let Some(replaced) = callback
                .after_tool(tool.as_ref(), &args, ctx, &result)
                .await
                .map_err(callback_error)?
            {
                debug!(tool = name, "callback replaced result");
                result = replaced;
            }
        }
        Ok(result)
    }

    /// Close every registered toolset. Failures are logged and skipped.
    pub async fn close(&self) {
        let toolsets: Vec<_> = self.toolsets.write().await.drain(..).collect();
        for toolset in toolsets {
            if let Err(e) = toolset.close().await {
                warn!(toolset = toolset.name(), error = %e, "failed to close toolset");
            }
        }
    }
}

async fn run_tool(
    tool: &dyn Tool,
    ctx: &ToolContext,
    name: &str,
    args: &Value,
) -> Result<ToolResult, ToolError> {
    check_args(tool, name, args)?;

    debug!(tool = name, invocation_id = ctx.invocation_id(), "invoking tool");
    match tool.execute(ctx, args.clone()).await {
        Ok(result) => {
            debug!(tool = name, status = result.status.as_str(), "tool finished");
            Ok(result)
        }
        Err(e) => match e.downcast::<ToolError>() {
            Ok(tool_error) => Err(tool_error),
            Err(source) => {
                warn!(tool = name, error = %source, "tool failed");
                Err(ToolError::Execution {
                    tool: name.to_string(),
                    source,
                })
            }
        },
    }
}

fn check_args(tool: &dyn Tool, name: &str, args: &Value) -> Result<(), ToolError> {
    validate_arguments(args, &tool.schema()).map_err(|message| ToolError::SchemaValidation {
        tool: name.to_string(),
        message,
    })
}
