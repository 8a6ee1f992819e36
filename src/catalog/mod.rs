//! Persona and activity lookup: turns a request into an agent handle and a
//! rendered task description.

pub mod definitions;
pub mod resolver;
pub mod template;

pub use definitions::{ActivityDefinition, CatalogFile, PersonaDefinition};
pub use resolver::CatalogResolver;

use crate::activity::TaskSpec;
use crate::agent::AgentHandle;
use crate::error::CatalogError;
use thiserror::Error;

pub(crate) const BUILTIN_CATALOG: &str = include_str!("builtin.toml");

/// Inputs to task resolution. `history` is passed through in the order
/// received.
#[derive(Debug, Clone, Copy)]
pub struct TaskQuery<'a> {
    pub persona_id: &'a str,
    pub activity_id: &'a str,
    pub user_input: &'a str,
    pub history: &'a [String],
    pub username: &'a str,
}

/// A persona agent plus its task. An empty `spec` means the activity is not
/// supported.
#[derive(Debug, Clone)]
pub struct ResolvedTask {
    pub spec: TaskSpec,
    pub agent: AgentHandle,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("persona not found: {0}")]
    PersonaNotFound(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub trait TaskResolver: Send + Sync {
    fn resolve(&self, query: &TaskQuery<'_>) -> Result<ResolvedTask, ResolveError>;
}
