use tracing::debug;

use crate::constants::{MAX_RATING, MAX_SCORE, MIN_RATING, SCORE_DECIMALS};
use crate::extraction::RatingPair;

use super::error::ScoringError;
use super::types::Score;

/// Computes the overall score for `entity_name`.
///
/// Each review contributes `sqrt(food² · service) · 10 / (N · sqrt(125))`, so food
/// weighs quadratically against service and the total is `10` exactly when every
/// rating is `5`. The sum is rounded to three decimals.
///
/// Fails with [`ScoringError::InvalidInput`] if the sequences differ in length, are
/// empty, or hold a rating outside `[1, 5]`. Nothing is computed in that case.
pub fn overall_score(
    entity_name: &str,
    food: &[u8],
    service: &[u8],
) -> Result<Score, ScoringError> {
    if food.len() != service.len() {
        return Err(ScoringError::invalid(format!(
            "food and service sequences differ in length ({} vs {})",
            food.len(),
            service.len()
        )));
    }

    let n = food.len();
    if n == 0 {
        return Err(ScoringError::invalid("no ratings to score"));
    }

    if let Some((i, r)) = food
        .iter()
        .chain(service.iter())
        .enumerate()
        .find(|(_, r)| !(MIN_RATING..=MAX_RATING).contains(*r))
    {
        let (kind, index) = if i < n { ("food", i) } else { ("service", i - n) };
        return Err(ScoringError::invalid(format!(
            "{kind} rating {r} at index {index} is outside [{MIN_RATING}, {MAX_RATING}]"
        )));
    }

    let ceiling = f64::from(MAX_RATING).powi(3).sqrt();
    let weight = MAX_SCORE / (n as f64 * ceiling);

    let total: f64 = food
        .iter()
        .zip(service)
        .map(|(&f, &s)| {
            let f = f64::from(f);
            (f * f * f64::from(s)).sqrt() * weight
        })
        .sum();

    let value = round_score(total);

    debug!(
        entity = %entity_name,
        reviews = n,
        raw = total,
        score = value,
        "Computed overall score"
    );

    Ok(Score::new(entity_name, value))
}

/// [`overall_score`] over paired ratings.
pub fn score_ratings(entity_name: &str, ratings: &[RatingPair]) -> Result<Score, ScoringError> {
    let (food, service): (Vec<u8>, Vec<u8>) = ratings.iter().map(|r| (r.food, r.service)).unzip();
    overall_score(entity_name, &food, &service)
}

fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (value * factor).round() / factor
}
