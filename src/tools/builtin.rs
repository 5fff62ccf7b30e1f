//! Tools wrapping the Record Store, the Extraction Capability and the Scoring Engine.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::constants::{EXTRACT_TOOL_NAME, FETCH_TOOL_NAME, SCORE_TOOL_NAME};
use crate::extraction::{RatingExtractor, RatingSheet, extract_checked};
use crate::payload::int_array;
use crate::records::{RecordStore, ReviewRecord, ReviewSource};
use crate::scoring::{ScoringError, overall_score};

use super::error::ToolError;
use super::registry::{Tool, ToolSpec};

/// `fetch_restaurant_data {restaurant_name}` → `{restaurant_name: [review, ...]}`.
pub struct FetchReviewsTool<S: ReviewSource> {
    store: Arc<RecordStore<S>>,
    spec: ToolSpec,
}

impl<S: ReviewSource> FetchReviewsTool<S> {
    pub fn new(store: Arc<RecordStore<S>>) -> Self {
        Self {
            store,
            spec: ToolSpec::new(
                FETCH_TOOL_NAME,
                "Fetches the reviews for a specific restaurant.",
                json!({
                    "type": "object",
                    "properties": {
                        "restaurant_name": {
                            "type": "string",
                            "description": "Restaurant name as it appears in the user's query."
                        }
                    },
                    "required": ["restaurant_name"]
                }),
            ),
        }
    }
}

#[async_trait]
impl<S: ReviewSource + 'static> Tool for FetchReviewsTool<S> {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn invoke(&self, arguments: Value) -> Result<Value, ToolError> {
        let name = required_str(&arguments, "restaurant_name", FETCH_TOOL_NAME)?;
        let set = self.store.fetch(name)?;
        Ok(set.to_json())
    }
}

/// `extract_review_ratings {restaurant_name, reviews}` →
/// `{restaurant_name, food_scores, customer_service_scores}`.
pub struct ExtractRatingsTool {
    extractor: Arc<dyn RatingExtractor>,
    spec: ToolSpec,
}

impl ExtractRatingsTool {
    pub fn new(extractor: Arc<dyn RatingExtractor>) -> Self {
        Self {
            extractor,
            spec: ToolSpec::new(
                EXTRACT_TOOL_NAME,
                "Rates each review's food and customer service from 1 to 5. \
                 Returns two lists with one score per review, in review order.",
                json!({
                    "type": "object",
                    "properties": {
                        "restaurant_name": { "type": "string" },
                        "reviews": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Review texts, in the order they were fetched."
                        }
                    },
                    "required": ["restaurant_name", "reviews"]
                }),
            ),
        }
    }
}

#[async_trait]
impl Tool for ExtractRatingsTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn invoke(&self, arguments: Value) -> Result<Value, ToolError> {
        let entity = arguments
            .get("restaurant_name")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let reviews = arguments
            .get("reviews")
            .and_then(Value::as_array)
            .ok_or_else(|| ToolError::invalid_arguments(EXTRACT_TOOL_NAME, "missing 'reviews' array"))?
            .iter()
            .map(|r| {
                r.as_str()
                    .map(|text| ReviewRecord::new(entity, text))
                    .ok_or_else(|| {
                        ToolError::invalid_arguments(EXTRACT_TOOL_NAME, "reviews must be strings")
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ratings = extract_checked(self.extractor.as_ref(), &reviews).await?;
        Ok(RatingSheet::new(entity, ratings).to_json())
    }
}

/// `calculate_overall_score {restaurant_name, food_scores, customer_service_scores}` →
/// `{restaurant_name: score}`.
pub struct OverallScoreTool {
    spec: ToolSpec,
}

impl Default for OverallScoreTool {
    fn default() -> Self {
        Self::new()
    }
}

impl OverallScoreTool {
    pub fn new() -> Self {
        Self {
            spec: ToolSpec::new(
                SCORE_TOOL_NAME,
                "Computes a restaurant's overall score (0 to 10) from its food and \
                 customer service scores. Both lists must have the same length.",
                json!({
                    "type": "object",
                    "properties": {
                        "restaurant_name": { "type": "string" },
                        "food_scores": {
                            "type": "array",
                            "items": { "type": "integer", "minimum": 1, "maximum": 5 }
                        },
                        "customer_service_scores": {
                            "type": "array",
                            "items": { "type": "integer", "minimum": 1, "maximum": 5 }
                        }
                    },
                    "required": ["restaurant_name", "food_scores", "customer_service_scores"]
                }),
            ),
        }
    }
}

#[async_trait]
impl Tool for OverallScoreTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn invoke(&self, arguments: Value) -> Result<Value, ToolError> {
        let entity = required_str(&arguments, "restaurant_name", SCORE_TOOL_NAME)?;
        let food = required_ints(&arguments, "food_scores", SCORE_TOOL_NAME)?;
        let service = required_ints(&arguments, "customer_service_scores", SCORE_TOOL_NAME)?;

        let food = to_ratings(&food, "food")?;
        let service = to_ratings(&service, "service")?;

        let score = overall_score(entity, &food, &service)?;
        Ok(score.to_json())
    }
}

fn required_str<'a>(arguments: &'a Value, key: &str, tool: &str) -> Result<&'a str, ToolError> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::invalid_arguments(tool, format!("missing string '{key}'")))
}

fn required_ints(arguments: &Value, key: &str, tool: &str) -> Result<Vec<i64>, ToolError> {
    arguments
        .get(key)
        .and_then(int_array)
        .ok_or_else(|| ToolError::invalid_arguments(tool, format!("'{key}' must be a list of integers")))
}

fn to_ratings(values: &[i64], kind: &str) -> Result<Vec<u8>, ScoringError> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            u8::try_from(v).map_err(|_| ScoringError::InvalidInput {
                reason: format!("{kind} rating {v} at index {i} is not a valid rating"),
            })
        })
        .collect()
}
