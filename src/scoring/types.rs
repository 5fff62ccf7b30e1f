use serde::{Deserialize, Serialize};

use crate::constants::SCORE_TOLERANCE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Terminal artifact of a run: one entity and its overall score in `[0, 10]`.
pub struct Score {
    /// Entity the score belongs to.
    pub entity_name: String,
    /// Score rounded to three decimal places.
    pub value: f64,
}

impl Score {
    pub fn new(entity_name: impl Into<String>, value: f64) -> Self {
        Self {
            entity_name: entity_name.into(),
            value,
        }
    }

    /// Returns `true` if `value` reports the same score (within rounding).
    pub fn matches_value(&self, value: f64) -> bool {
        (self.value - value).abs() < SCORE_TOLERANCE
    }

    /// The `{entity_name: score}` mapping as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(self.entity_name.clone(), serde_json::Value::from(self.value));
        serde_json::Value::Object(map)
    }

    /// Renders `{"<entity>": <score>}` with exactly three decimals.
    pub fn to_json_line(&self) -> String {
        let key = serde_json::Value::String(self.entity_name.clone());
        format!("{{{}: {:.3}}}", key, self.value)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.3}", self.entity_name, self.value)
    }
}
