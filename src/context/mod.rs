// ABOUTME: Execution context handed to tools - invocation identity, session
// ABOUTME: state, artifacts, memory, and actions a tool can request.

mod artifact;
mod memory;
mod state;

pub use artifact::*;
pub use memory::*;
pub use state::*;

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

/// Side effects a tool asks the runtime to perform after the call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventActions {
    /// Hand the conversation to another agent.
    pub transfer_to_agent: Option<String>,
    pub escalate: bool,
    /// Return the tool output directly without a model summary.
    pub skip_summarization: bool,
}

/// Per-invocation handle to the services a tool may use.
///
/// Cloning shares everything, including the actions of this invocation.
#[derive(Clone)]
pub struct ToolContext {
    invocation_id: String,
    agent_name: String,
    state: Arc<dyn StateStore>,
    artifacts: Arc<dyn ArtifactStore>,
    memory: Arc<dyn MemoryService>,
    actions: Arc<Mutex<EventActions>>,
}

impl ToolContext {
    pub fn new(
        agent_name: impl Into<String>,
        state: Arc<dyn StateStore>,
        artifacts: Arc<dyn ArtifactStore>,
        memory: Arc<dyn MemoryService>,
    ) -> Self {
        Self {
            invocation_id: Uuid::new_v4().to_string(),
            agent_name: agent_name.into(),
            state,
            artifacts,
            memory,
            actions: Arc::new(Mutex::new(EventActions::default())),
        }
    }

    /// A context backed entirely by in-memory services.
    pub fn in_memory(agent_name: impl Into<String>) -> Self {
        Self::new(
            agent_name,
            Arc::new(InMemoryState::new()),
            Arc::new(InMemoryArtifacts::new()),
            Arc::new(InMemoryMemory::new()),
        )
    }

    /// Same services, fresh invocation id, cleared actions.
    pub fn for_invocation(&self) -> Self {
        Self {
            invocation_id: Uuid::new_v4().to_string(),
            agent_name: self.agent_name.clone(),
            state: self.state.clone(),
            artifacts: self.artifacts.clone(),
            memory: self.memory.clone(),
            actions: Arc::new(Mutex::new(EventActions::default())),
        }
    }

    pub fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    pub fn state(&self) -> &dyn StateStore {
        self.state.as_ref()
    }

    pub fn artifacts(&self) -> &dyn ArtifactStore {
        self.artifacts.as_ref()
    }

    pub fn memory(&self) -> &dyn MemoryService {
        self.memory.as_ref()
    }

    /// Ask the runtime to hand the conversation to another agent.
    pub async fn transfer_to_agent(&self, agent: impl Into<String>) {
        self.actions.lock().await.transfer_to_agent = Some(agent.into());
    }

    pub async fn escalate(&self) {
        self.actions.lock().await.escalate = true;
    }

    pub async fn skip_summarization(&self) {
        self.actions.lock().await.skip_summarization = true;
    }

    /// Snapshot of the actions requested so far.
    pub async fn actions(&self) -> EventActions {
        self.actions.lock().await.clone()
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("invocation_id", &self.invocation_id)
            .field("agent_name", &self.agent_name)
            .finish_non_exhaustive()
    }
}
