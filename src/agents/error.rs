use thiserror::Error;

/// Errors from asking a worker for its next reply.
///
/// Every variant still consumes one turn of the stage's reply ceiling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgentError {
    #[error("model backend error: {0}")]
    Backend(String),

    #[error("worker returned an empty reply")]
    EmptyReply,

    #[error("worker did not respond: {0}")]
    Unresponsive(String),
}
