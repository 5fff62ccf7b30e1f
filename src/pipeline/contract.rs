//! Stage-boundary checks: what each stage must hand forward before it can close.

use serde_json::Value;
use tracing::debug;

use crate::agents::ToolCall;
use crate::constants::SCORE_TOOL_NAME;
use crate::extraction::RatingSheet;
use crate::payload::{find_json_object, int_array, rating_sequences, review_mapping, score_mapping};
use crate::records::ReviewSet;
use crate::scoring::Score;

use super::error::PipelineError;
use super::state::StageKind;

/// The payload a stage must produce, and the guards around its tool calls.
pub trait StageContract: Send {
    type Output;

    fn kind(&self) -> StageKind;

    /// Describes the payload, for corrective messages.
    fn expected(&self) -> &'static str;

    /// Checks a tool call before it runs. `Err` rejects it without invoking the tool.
    fn check_call(&self, _call: &ToolCall) -> Result<(), String> {
        Ok(())
    }

    /// Sees each successful tool result.
    fn observe_result(&mut self, _call: &ToolCall, _result: &Value) {}

    /// Reads the stage output out of the last message.
    fn accept(&self, last_message: &str) -> Result<Self::Output, String>;

    /// The failure reported once the ceiling is reached without an accepted payload.
    fn exhausted(&self, _last_message: Option<&str>, turns: u32, reason: String) -> PipelineError {
        PipelineError::StageExhausted {
            stage: self.kind(),
            turns,
            reason,
        }
    }
}

/// Fetch: `{entity: [review, ...]}` with at least one review.
#[derive(Debug, Default)]
pub struct FetchContract;

impl StageContract for FetchContract {
    type Output = ReviewSet;

    fn kind(&self) -> StageKind {
        StageKind::Fetch
    }

    fn expected(&self) -> &'static str {
        "a JSON object mapping the restaurant name to its list of reviews"
    }

    fn accept(&self, last_message: &str) -> Result<ReviewSet, String> {
        let (entity, reviews) = find_json_object(last_message)
            .as_ref()
            .and_then(review_mapping)
            .ok_or("no {restaurant: [reviews]} object found")?;

        if reviews.is_empty() {
            return Err(format!("no reviews for '{entity}'"));
        }

        Ok(ReviewSet::from_texts(entity, reviews))
    }

    fn exhausted(&self, last_message: Option<&str>, turns: u32, reason: String) -> PipelineError {
        match last_message
            .and_then(find_json_object)
            .as_ref()
            .and_then(review_mapping)
        {
            Some((entity, reviews)) if reviews.is_empty() => PipelineError::NoReviews { entity },
            _ => PipelineError::StageExhausted {
                stage: StageKind::Fetch,
                turns,
                reason,
            },
        }
    }
}

/// Analyze: equal-length in-range rating sequences, one pair per fetched review.
#[derive(Debug)]
pub struct AnalyzeContract {
    entity_name: String,
    review_count: usize,
}

impl AnalyzeContract {
    pub fn new(entity_name: impl Into<String>, review_count: usize) -> Self {
        Self {
            entity_name: entity_name.into(),
            review_count,
        }
    }
}

impl StageContract for AnalyzeContract {
    type Output = RatingSheet;

    fn kind(&self) -> StageKind {
        StageKind::Analyze
    }

    fn expected(&self) -> &'static str {
        "a JSON object with equal-length \"food_scores\" and \"customer_service_scores\" lists"
    }

    fn accept(&self, last_message: &str) -> Result<RatingSheet, String> {
        let sequences = find_json_object(last_message)
            .as_ref()
            .and_then(rating_sequences)
            .ok_or("no food_scores/customer_service_scores object found")?;

        let sheet =
            RatingSheet::from_sequences(&self.entity_name, &sequences.food, &sequences.service)?;

        if sheet.len() != self.review_count {
            return Err(format!(
                "expected {} ratings (one per review), got {}",
                self.review_count,
                sheet.len()
            ));
        }

        Ok(sheet)
    }
}

/// Score: `{entity: score}` where the score is one the engine produced in this stage,
/// from exactly the ratings Analyze handed forward.
#[derive(Debug)]
pub struct ScoreContract {
    analyzed: RatingSheet,
    engine_scores: Vec<f64>,
}

impl ScoreContract {
    pub fn new(analyzed: RatingSheet) -> Self {
        Self {
            analyzed,
            engine_scores: Vec::new(),
        }
    }

    /// Scores returned by the engine so far in this stage.
    pub fn engine_scores(&self) -> &[f64] {
        &self.engine_scores
    }

    fn entity_name(&self) -> &str {
        self.analyzed.entity_name()
    }
}

impl StageContract for ScoreContract {
    type Output = Score;

    fn kind(&self) -> StageKind {
        StageKind::Score
    }

    fn expected(&self) -> &'static str {
        "the JSON object returned by calculate_overall_score, {\"<restaurant>\": <score>}"
    }

    fn check_call(&self, call: &ToolCall) -> Result<(), String> {
        if call.name != SCORE_TOOL_NAME {
            return Ok(());
        }

        let food = call.arguments.get("food_scores").and_then(int_array);
        let service = call
            .arguments
            .get("customer_service_scores")
            .and_then(int_array);

        // Shape errors are left to the tool, which reports them as retryable.
        let (Some(food), Some(service)) = (food, service) else {
            return Ok(());
        };

        if food.len() != service.len() {
            return Err(format!(
                "food_scores has {} entries but customer_service_scores has {}",
                food.len(),
                service.len()
            ));
        }
        if food.len() != self.analyzed.len() {
            return Err(format!(
                "expected {} ratings per list (one per review), got {}",
                self.analyzed.len(),
                food.len()
            ));
        }

        let submitted = RatingSheet::from_sequences(self.entity_name(), &food, &service)?;
        if submitted.ratings() != self.analyzed.ratings() {
            return Err(format!(
                "ratings must be the analyzed food_scores {:?} and customer_service_scores {:?}",
                self.analyzed.food_scores(),
                self.analyzed.service_scores()
            ));
        }
        Ok(())
    }

    fn observe_result(&mut self, call: &ToolCall, result: &Value) {
        if call.name != SCORE_TOOL_NAME {
            return;
        }
        if let Some((_, value)) = score_mapping(result) {
            debug!(score = value, "Recorded engine score");
            self.engine_scores.push(value);
        }
    }

    fn accept(&self, last_message: &str) -> Result<Score, String> {
        let (entity, value) = find_json_object(last_message)
            .as_ref()
            .and_then(score_mapping)
            .ok_or("no {restaurant: score} object found")?;

        if entity.trim().to_lowercase() != self.entity_name().trim().to_lowercase() {
            return Err(format!(
                "score is for '{entity}', expected '{}'",
                self.entity_name()
            ));
        }

        let engine_value = self
            .engine_scores
            .iter()
            .copied()
            .find(|&v| Score::new(self.entity_name(), v).matches_value(value))
            .ok_or_else(|| format!("score {value} was not computed by {SCORE_TOOL_NAME}"))?;

        Ok(Score::new(self.entity_name(), engine_value))
    }
}

