use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RATING, MIN_RATING};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Food and service ratings for one review, each in `[1, 5]`.
pub struct RatingPair {
    pub food: u8,
    pub service: u8,
}

impl RatingPair {
    pub fn new(food: u8, service: u8) -> Self {
        Self { food, service }
    }

    /// Returns `true` if both ratings are within bounds.
    pub fn is_in_range(&self) -> bool {
        let range = MIN_RATING..=MAX_RATING;
        range.contains(&self.food) && range.contains(&self.service)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Parallel food/service sequences for one entity.
pub struct RatingSheet {
    entity_name: String,
    ratings: Vec<RatingPair>,
}

impl RatingSheet {
    pub fn new(entity_name: impl Into<String>, ratings: Vec<RatingPair>) -> Self {
        Self {
            entity_name: entity_name.into(),
            ratings,
        }
    }

    /// Pairs up two sequences, rejecting unequal lengths and out-of-range values.
    pub fn from_sequences(
        entity_name: impl Into<String>,
        food: &[i64],
        service: &[i64],
    ) -> Result<Self, String> {
        if food.len() != service.len() {
            return Err(format!(
                "food_scores has {} entries but customer_service_scores has {}",
                food.len(),
                service.len()
            ));
        }

        let ratings = food
            .iter()
            .zip(service)
            .enumerate()
            .map(|(i, (&f, &s))| {
                let pair = RatingPair::new(to_rating(f, "food", i)?, to_rating(s, "service", i)?);
                Ok(pair)
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Self::new(entity_name, ratings))
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn ratings(&self) -> &[RatingPair] {
        &self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn food_scores(&self) -> Vec<u8> {
        self.ratings.iter().map(|r| r.food).collect()
    }

    pub fn service_scores(&self) -> Vec<u8> {
        self.ratings.iter().map(|r| r.service).collect()
    }

    /// `{restaurant_name, food_scores, customer_service_scores}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "restaurant_name": self.entity_name,
            "food_scores": self.food_scores(),
            "customer_service_scores": self.service_scores(),
        })
    }
}

fn to_rating(value: i64, kind: &str, index: usize) -> Result<u8, String> {
    u8::try_from(value)
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or_else(|| {
            format!("{kind} rating {value} at index {index} is outside [{MIN_RATING}, {MAX_RATING}]")
        })
}
