// ABOUTME: Defines all error types for the toolwire library using thiserror.
// ABOUTME: Each area has its own error enum, unified under ToolwireError.

/// Top-level error type for the toolwire library.
#[derive(Debug, thiserror::Error)]
pub enum ToolwireError {
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),

    #[error("MCP error: {0}")]
    Mcp(#[from] McpError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from tool lookup and invocation.
///
/// A domain miss (unknown city, unknown order) is never one of these; it is a
/// successful invocation whose result carries `status = "error"`.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments for '{tool}': {message}")]
    SchemaValidation { tool: String, message: String },

    #[error("Tool '{tool}' failed: {source}")]
    Execution {
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Callback for '{tool}' failed: {source}")]
    Callback {
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Toolset '{toolset}' failed: {source}")]
    Toolset {
        toolset: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ToolError {
    /// Whether this error was raised before the tool body ran.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::SchemaValidation { .. })
    }
}

/// Errors from the execution context services (state, artifacts, memory).
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("State store error: {0}")]
    State(String),

    #[error("Artifact store error: {0}")]
    Artifact(String),

    #[error("Invalid artifact name: {0}")]
    InvalidArtifactName(String),

    #[error("Memory service error: {0}")]
    Memory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from permission checks.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error("Tool '{0}' denied by policy")]
    Denied(String),

    #[error("Approval rejected for tool '{0}'")]
    Rejected(String),

    #[error("Approval handler error: {0}")]
    Handler(#[source] anyhow::Error),
}

/// Errors from MCP operations.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Request '{method}' timed out after {seconds}s")]
    Timeout { method: String, seconds: u64 },

    #[error("RPC error ({code}): {message}")]
    Rpc { code: i32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while assembling configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingEnv(&'static str),

    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}
