use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One review line attributed to an entity.
pub struct ReviewRecord {
    /// Entity the review belongs to (the name as queried).
    pub entity_name: String,
    /// Review text with the entity prefix and separator removed.
    pub text: String,
}

impl ReviewRecord {
    /// Creates a new record.
    pub fn new(entity_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reviews for one entity, in source line order.
pub struct ReviewSet {
    entity_name: String,
    reviews: Vec<ReviewRecord>,
}

impl ReviewSet {
    /// Creates a set with no reviews for `entity_name`.
    pub fn empty(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            reviews: Vec::new(),
        }
    }

    /// Creates a set from review texts, preserving order.
    pub fn from_texts<I, T>(entity_name: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let entity_name = entity_name.into();
        let reviews = texts
            .into_iter()
            .map(|t| ReviewRecord::new(entity_name.clone(), t))
            .collect();
        Self {
            entity_name,
            reviews,
        }
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn reviews(&self) -> &[ReviewRecord] {
        &self.reviews
    }

    pub fn into_reviews(self) -> Vec<ReviewRecord> {
        self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Review texts in order.
    pub fn texts(&self) -> Vec<String> {
        self.reviews.iter().map(|r| r.text.clone()).collect()
    }

    /// The `{entity_name: [review, ...]}` mapping. The key is always present.
    pub fn to_mapping(&self) -> BTreeMap<String, Vec<String>> {
        BTreeMap::from([(self.entity_name.clone(), self.texts())])
    }

    /// The mapping as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(
            self.entity_name.clone(),
            serde_json::Value::from(self.texts()),
        );
        serde_json::Value::Object(map)
    }
}
