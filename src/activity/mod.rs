//! Activity completion: request model, reward table and the orchestrator
//! that ties resolution, generation, XP and auditing together.

pub mod orchestrator;
pub mod rewards;
pub mod types;

pub use orchestrator::{ActivityOrchestrator, DEFAULT_PLATFORM};
pub use rewards::RewardCatalog;
pub use types::{
    ActivityCompletion, ActivityRequest, AuditRecord, BalanceSnapshot, ExecutionResult,
    ResponseEnvelope, RewardOutcome, TaskSpec, balance_converged,
};
