use super::output::AgentOutput;
use crate::activity::TaskSpec;
use std::future::Future;
use std::pin::Pin;

/// Everything an executor needs to speak as one persona.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentHandle {
    pub persona_id: String,
    pub display_name: String,
    /// In-character system prompt (role, goal, backstory).
    pub system_prompt: String,
    /// Per-persona model override; the executor default applies when `None`.
    pub model: Option<String>,
    pub temperature: Option<f64>,
}

/// Turns one task description into persona text.
///
/// Implementations may call a remote model, a local one, or return scripted
/// output. Any error is fatal to the request.
pub trait Executor: Send + Sync {
    fn name(&self) -> &str;

    fn execute<'a>(
        &'a self,
        task: &'a TaskSpec,
        agent: &'a AgentHandle,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<AgentOutput>> + Send + 'a>>;
}
