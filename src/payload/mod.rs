//! Structured payloads carried inside free-text worker messages.
//!
//! Workers (LLM-backed or not) hand off JSON objects, possibly wrapped in prose or
//! code fences. These helpers locate the first JSON object in a message and read
//! the three stage payload shapes out of it. They only check shape; range and
//! length contracts are enforced at the stage boundary.

use serde_json::{Deserializer, Value};

/// Returns the first JSON object embedded in `text`.
pub fn find_json_object(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    trimmed
        .char_indices()
        .filter(|(_, c)| *c == '{')
        .find_map(|(i, _)| {
            let mut stream = Deserializer::from_str(&trimmed[i..]).into_iter::<Value>();
            match stream.next() {
                Some(Ok(value @ Value::Object(_))) => Some(value),
                _ => None,
            }
        })
}

/// Reads `{entity: [review, ...]}`. The object must hold exactly one key.
pub fn review_mapping(value: &Value) -> Option<(String, Vec<String>)> {
    let object = value.as_object()?;
    if object.len() != 1 {
        return None;
    }

    let (entity, reviews) = object.iter().next()?;
    let reviews = reviews
        .as_array()?
        .iter()
        .map(|r| r.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;

    Some((entity.clone(), reviews))
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw rating sequences as found in a message, before range checks.
pub struct RatingSequences {
    pub entity_name: Option<String>,
    pub food: Vec<i64>,
    pub service: Vec<i64>,
}

/// Reads `{restaurant_name?, food_scores: [..], customer_service_scores: [..]}`.
pub fn rating_sequences(value: &Value) -> Option<RatingSequences> {
    let object = value.as_object()?;

    let entity_name = object
        .get("restaurant_name")
        .and_then(Value::as_str)
        .map(str::to_string);
    let food = int_array(object.get("food_scores")?)?;
    let service = int_array(object.get("customer_service_scores")?)?;

    Some(RatingSequences {
        entity_name,
        food,
        service,
    })
}

/// Reads `{entity: score}`. The object must hold exactly one numeric entry.
pub fn score_mapping(value: &Value) -> Option<(String, f64)> {
    let object = value.as_object()?;
    if object.len() != 1 {
        return None;
    }

    let (entity, score) = object.iter().next()?;
    Some((entity.clone(), score.as_f64()?))
}

/// Reads an array of integers; floats with no fractional part are accepted.
pub fn int_array(value: &Value) -> Option<Vec<i64>> {
    value
        .as_array()?
        .iter()
        .map(|v| {
            v.as_i64().or_else(|| {
                v.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                    .map(|f| f as i64)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_json_object_whole_message() {
        let value = find_json_object(r#"  {"Subway": ["good"]}  "#).unwrap();
        assert_eq!(value, json!({"Subway": ["good"]}));
    }

    #[test]
    fn test_find_json_object_inside_prose_and_fence() {
        let text = "Here are the reviews:\n```json\n{\"Subway\": [\"a\", \"b\"]}\n```\nDone.";
        assert_eq!(
            find_json_object(text).unwrap(),
            json!({"Subway": ["a", "b"]})
        );
    }

    #[test]
    fn test_find_json_object_skips_unbalanced_braces() {
        let text = "Result {not json} then {\"X\": 5.045}";
        assert_eq!(find_json_object(text).unwrap(), json!({"X": 5.045}));
    }

    #[test]
    fn test_find_json_object_ignores_arrays_and_missing() {
        assert!(find_json_object("[1, 2, 3]").is_none());
        assert!(find_json_object("no payload here").is_none());
        assert!(find_json_object("").is_none());
    }

    #[test]
    fn test_review_mapping() {
        let (entity, reviews) = review_mapping(&json!({"Subway": ["a", "b"]})).unwrap();
        assert_eq!(entity, "Subway");
        assert_eq!(reviews, vec!["a", "b"]);

        let (_, empty) = review_mapping(&json!({"Subway": []})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_review_mapping_rejects_wrong_shapes() {
        assert!(review_mapping(&json!({"A": ["x"], "B": ["y"]})).is_none());
        assert!(review_mapping(&json!({"A": "x"})).is_none());
        assert!(review_mapping(&json!({"A": [1, 2]})).is_none());
        assert!(review_mapping(&json!({})).is_none());
    }

    #[test]
    fn test_rating_sequences() {
        let value = json!({
            "restaurant_name": "Subway",
            "food_scores": [5, 2.0],
            "customer_service_scores": [4, 2],
        });
        let seq = rating_sequences(&value).unwrap();

        assert_eq!(seq.entity_name.as_deref(), Some("Subway"));
        assert_eq!(seq.food, vec![5, 2]);
        assert_eq!(seq.service, vec![4, 2]);
    }

    #[test]
    fn test_rating_sequences_does_not_check_lengths() {
        let value = json!({"food_scores": [5, 2, 1], "customer_service_scores": [4]});
        let seq = rating_sequences(&value).unwrap();

        assert_eq!(seq.entity_name, None);
        assert_eq!(seq.food.len(), 3);
        assert_eq!(seq.service.len(), 1);
    }

    #[test]
    fn test_rating_sequences_rejects_non_integers() {
        let value = json!({"food_scores": [4.5], "customer_service_scores": [4]});
        assert!(rating_sequences(&value).is_none());

        let value = json!({"food_scores": ["5"], "customer_service_scores": [4]});
        assert!(rating_sequences(&value).is_none());

        assert!(rating_sequences(&json!({"food_scores": [5]})).is_none());
    }

    #[test]
    fn test_score_mapping() {
        assert_eq!(
            score_mapping(&json!({"Subway": 6.265})),
            Some(("Subway".to_string(), 6.265))
        );
        assert_eq!(
            score_mapping(&json!({"Subway": 10})),
            Some(("Subway".to_string(), 10.0))
        );
        assert!(score_mapping(&json!({"Subway": "6.2"})).is_none());
        assert!(score_mapping(&json!({"A": 1.0, "B": 2.0})).is_none());
    }
}
