//! Scoring Engine: two equal-length rating sequences → one bounded score.
//!
//! Pure and deterministic; see [`overall_score`] for the formula.

pub mod engine;
pub mod error;
pub mod types;


pub use engine::{overall_score, score_ratings};
pub use error::ScoringError;
pub use types::Score;
