use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::records::RecordStoreError;
use crate::scoring::ScoringError;

/// Errors from invoking a registered tool.
///
/// Recoverable errors are reported back to the worker as an error tool result so it
/// can retry within its reply ceiling. Fatal errors abort the run.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool '{name}'")]
    UnknownTool { name: String },

    #[error("invalid arguments for '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("call to '{tool}' rejected: {reason}")]
    Rejected { tool: String, reason: String },

    #[error("rating extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("record store failed: {0}")]
    RecordStore(#[from] RecordStoreError),
}

impl ToolError {
    pub(crate) fn invalid_arguments(tool: &str, reason: impl Into<String>) -> Self {
        ToolError::InvalidArguments {
            tool: tool.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the run must abort rather than let the worker retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ToolError::Scoring(_) | ToolError::RecordStore(_))
    }
}
