use thiserror::Error;

use crate::records::RecordStoreError;
use crate::scoring::ScoringError;
use crate::tools::ToolError;

use super::state::{RunState, StageKind};

/// Ways a run ends without a score. Every stage failure names its stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The stage used its whole reply ceiling without a well-formed payload.
    #[error("{stage} stage exhausted its reply ceiling after {turns} turns: {reason}")]
    StageExhausted {
        stage: StageKind,
        turns: u32,
        reason: String,
    },

    /// The entity resolved but no reviews exist for it (or the source is missing).
    #[error("no reviews found for '{entity}'")]
    NoReviews { entity: String },

    /// The Scoring Engine rejected its input. Never retried.
    #[error("{stage} stage aborted, invalid scoring input: {source}")]
    Scoring {
        stage: StageKind,
        #[source]
        source: ScoringError,
    },

    /// The review source exists but could not be read.
    #[error("{stage} stage aborted, review source unreadable: {source}")]
    RecordStore {
        stage: StageKind,
        #[source]
        source: RecordStoreError,
    },

    /// Any other tool failure classed as fatal.
    #[error("{stage} stage aborted, tool failed: {source}")]
    Tool {
        stage: StageKind,
        #[source]
        source: ToolError,
    },

    #[error("illegal run transition {from} -> {to}")]
    IllegalTransition { from: RunState, to: RunState },
}

impl PipelineError {
    /// The stage that failed, if the failure belongs to one.
    pub fn failed_stage(&self) -> Option<StageKind> {
        match self {
            PipelineError::StageExhausted { stage, .. }
            | PipelineError::Scoring { stage, .. }
            | PipelineError::RecordStore { stage, .. }
            | PipelineError::Tool { stage, .. } => Some(*stage),
            PipelineError::NoReviews { .. } => Some(StageKind::Fetch),
            PipelineError::IllegalTransition { from, .. } => from.stage(),
        }
    }

    /// Wraps a tool error that [`ToolError::is_fatal`] classed as aborting the run.
    pub(crate) fn from_fatal_tool(stage: StageKind, error: ToolError) -> Self {
        match error {
            ToolError::Scoring(source) => PipelineError::Scoring { stage, source },
            ToolError::RecordStore(source) => PipelineError::RecordStore { stage, source },
            source => PipelineError::Tool { stage, source },
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
