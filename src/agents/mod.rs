//! Stage workers: autonomous agents that reply to a stage transcript with text or
//! tool calls.
//!
//! A worker never executes tools itself; it only names them. The orchestrator runs
//! the calls against the stage's registry and appends the results before the next
//! turn.

pub mod error;
pub mod llm;
pub mod message;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod offline;
pub mod prompts;


use async_trait::async_trait;

use crate::tools::ToolSpec;

pub use error::AgentError;
pub use llm::{GenaiAgent, build_client};
pub use message::{AgentReply, Message, ToolCall, Transcript};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockAgent;
pub use offline::{QueryFetchAgent, ReviewAnalysisAgent, ScoreRequestAgent, entity_candidates};

#[async_trait]
/// A worker that takes one turn at a time.
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    /// Produces the next reply given everything said so far in this stage.
    async fn reply(
        &self,
        transcript: &Transcript,
        tools: &[ToolSpec],
    ) -> Result<AgentReply, AgentError>;
}
