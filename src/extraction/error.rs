use thiserror::Error;

use super::types::RatingPair;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("extractor returned {actual} rating pairs for {expected} reviews")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("extractor returned out-of-range ratings {pair:?} for review {index}")]
    OutOfRange { index: usize, pair: RatingPair },

    #[error("rating extraction backend failed: {0}")]
    Backend(String),
}
