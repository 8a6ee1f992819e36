pub mod chat_completions;
pub mod output;
pub mod traits;

pub use chat_completions::ChatCompletionsExecutor;
pub use output::AgentOutput;
pub use traits::{AgentHandle, Executor};
