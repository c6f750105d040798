// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use toolwire::prelude::*;` to get started quickly.

pub use crate::agent::{
    Agent, AgentDefinition, AgentPreset, DirectAgent, LineSource, Lines, Repl,
};
pub use crate::config::Config;
pub use crate::context::{
    Artifact, ArtifactStore, EventActions, InMemoryArtifacts, InMemoryMemory, InMemoryState,
    MemoryEntry, MemoryService, StateStore, ToolContext,
};
pub use crate::error::{
    ConfigError, ContextError, McpError, PermissionError, ToolError, ToolwireError,
};
pub use crate::mcp::{McpClient, McpServerConfig, McpToolset, StdioTransport, Transport};
pub use crate::permission::{
    AlwaysApprove, AlwaysReject, ApprovalHandler, ApprovalRequest, Decision, Gate, Policy,
    PolicyBuilder,
};
pub use crate::tool::{
    BeforeToolAction, FunctionTool, NoArgs, Outcome, Registry, Schema, StaticToolset, Tool,
    ToolArgs, ToolCallback, ToolDefinition, ToolFilter, ToolResult, ToolStatus, Toolset,
};
