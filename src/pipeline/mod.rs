//! Pipeline Orchestrator: a bounded, sequential Fetch → Analyze → Score state machine.
//!
//! Each stage runs one worker against its own tool registry for at most its reply
//! ceiling, then hands only its last message to the next stage. Stage-boundary
//! contracts decide whether that message is well-formed; a stage that never
//! produces one fails the run and names itself.

pub mod contract;
pub mod error;
pub mod factory;
pub mod orchestrator;
pub mod stage;
pub mod state;


pub use contract::{AnalyzeContract, FetchContract, ScoreContract, StageContract};
pub use error::{PipelineError, PipelineResult};
pub use factory::{StageAgents, assemble_pipeline, build_agents, build_pipeline};
pub use orchestrator::{Pipeline, RunReport, StageTurns};
pub use stage::{Stage, StageOutcome};
pub use state::{PipelineRun, RunState, StageKind};
