// ABOUTME: FunctionTool - adapts a plain typed function into a Tool.
// ABOUTME: Decodes arguments, calls the function, and normalizes its return value.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use super::{Tool, ToolArgs, ToolResult};
use crate::context::ToolContext;
use crate::error::ToolError;

type Handler<A> = dyn Fn(ToolContext, A) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync;

/// How a FunctionTool reports errors returned by its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Return `status = "error"` with the error text as `error_message`.
    #[default]
    Payload,
    /// Return the error to the caller as a transport-level failure.
    Propagate,
}

/// A tool backed by a function over a typed argument record.
pub struct FunctionTool<A> {
    name: String,
    description: String,
    schema: Value,
    long_running: bool,
    error_policy: ErrorPolicy,
    handler: Arc<Handler<A>>,
    _args: PhantomData<fn() -> A>,
}

impl<A: ToolArgs> FunctionTool<A> {
    /// Wrap a synchronous function that needs no execution context.
    pub fn new<F, R>(name: impl Into<String>, description: impl Into<String>, f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
        R: Serialize,
    {
        let handler: Arc<Handler<A>> = Arc::new(
            move |_ctx: ToolContext, args: A| -> BoxFuture<'static, anyhow::Result<Value>> {
                let value = serde_json::to_value(f(args)).map_err(anyhow::Error::from);
                Box::pin(async move { value })
            },
        );
        Self::from_handler(name.into(), description.into(), handler)
    }

    /// Wrap an async function that receives the execution context.
    pub fn with_context<F, Fut, R>(
        name: impl Into<String>,
        description: impl Into<String>,
        f: F,
    ) -> Self
    where
        F: Fn(ToolContext, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Serialize + Send + 'static,
    {
        let handler: Arc<Handler<A>> = Arc::new(
            move |ctx: ToolContext, args: A| -> BoxFuture<'static, anyhow::Result<Value>> {
                let fut = f(ctx, args);
                Box::pin(async move {
                    let out = fut.await?;
                    Ok(serde_json::to_value(out)?)
                })
            },
        );
        Self::from_handler(name.into(), description.into(), handler)
    }

    fn from_handler(name: String, description: String, handler: Arc<Handler<A>>) -> Self {
        Self {
            name,
            description,
            schema: A::schema(),
            long_running: false,
            error_policy: ErrorPolicy::default(),
            handler,
            _args: PhantomData,
        }
    }

    /// Mark the tool as long-running.
    pub fn long_running(mut self) -> Self {
        self.long_running = true;
        self
    }

    /// Surface function errors as transport-level failures.
    pub fn propagate_errors(mut self) -> Self {
        self.error_policy = ErrorPolicy::Propagate;
        self
    }

    /// The configured error policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }
}

#[async_trait]
impl<A: ToolArgs> Tool for FunctionTool<A> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> Value {
        self.schema.clone()
    }

    fn is_long_running(&self) -> bool {
        self.long_running
    }

    async fn execute(&self, ctx: &ToolContext, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: A = serde_json::from_value(params).map_err(|e| ToolError::SchemaValidation {
            tool: self.name.clone(),
            message: e.to_string(),
        })?;

        match (self.handler)(ctx.clone(), args).await {
            Ok(value) => Ok(ToolResult::from_value(value)),
            Err(e) => match self.error_policy {
                ErrorPolicy::Payload => Ok(ToolResult::error(format!("{e:#}"))),
                ErrorPolicy::Propagate => Err(e),
            },
        }
    }
}

impl<A> std::fmt::Debug for FunctionTool<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("long_running", &self.long_running)
            .field("error_policy", &self.error_policy)
            .finish()
    }
}
