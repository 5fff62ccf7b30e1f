use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl ScoringError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ScoringError::InvalidInput {
            reason: reason.into(),
        }
    }
}
