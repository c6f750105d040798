// ABOUTME: Session boundary - the Agent trait, the interactive loop, the
// ABOUTME: direct-dispatch agent, and presets for the example agents.

mod definition;
mod direct;
pub mod presets;
mod repl;

pub use definition::AgentDefinition;
pub use direct::{DirectAgent, parse_command};
pub use presets::AgentPreset;
pub use repl::{BANNER, LineSource, Lines, Repl};

use async_trait::async_trait;

/// Something a user can talk to, one message at a time.
#[async_trait]
pub trait Agent: Send {
    fn name(&self) -> &str;

    /// Handle one user message and return the reply text.
    async fn send(&mut self, input: &str) -> anyhow::Result<String>;
}
