//! Extraction Capability: review texts → per-review food/service ratings.
//!
//! The capability is pluggable through [`RatingExtractor`]; [`LexiconExtractor`] is
//! the built-in keyword implementation. Callers rely only on the output shape:
//! one in-range [`RatingPair`] per input review, in input order.

pub mod error;
pub mod lexicon;
pub mod types;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::records::ReviewRecord;

pub use error::ExtractionError;
pub use lexicon::{DEFAULT_LEXICON, LexiconExtractor};
pub use types::{RatingPair, RatingSheet};

#[async_trait]
/// Derives ratings from review texts.
pub trait RatingExtractor: Send + Sync {
    /// Returns one rating pair per review, in order.
    async fn extract(&self, reviews: &[ReviewRecord]) -> Result<Vec<RatingPair>, ExtractionError>;
}

/// Runs `extractor` and checks the one-pair-per-review contract.
pub async fn extract_checked(
    extractor: &dyn RatingExtractor,
    reviews: &[ReviewRecord],
) -> Result<Vec<RatingPair>, ExtractionError> {
    let ratings = extractor.extract(reviews).await?;
    if ratings.len() != reviews.len() {
        return Err(ExtractionError::LengthMismatch {
            expected: reviews.len(),
            actual: ratings.len(),
        });
    }
    if let Some((index, pair)) = ratings.iter().enumerate().find(|(_, p)| !p.is_in_range()) {
        return Err(ExtractionError::OutOfRange {
            index,
            pair: *pair,
        });
    }
    Ok(ratings)
}
