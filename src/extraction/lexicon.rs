use async_trait::async_trait;
use tracing::debug;

use crate::constants::NEUTRAL_RATING;
use crate::records::ReviewRecord;

use super::RatingExtractor;
use super::error::ExtractionError;
use super::types::RatingPair;

/// Keyword tiers, lowest rating first.
pub const DEFAULT_LEXICON: &[(u8, &[&str])] = &[
    (1, &["awful", "horrible", "disgusting"]),
    (2, &["bad", "unpleasant", "offensive"]),
    (3, &["average", "uninspiring", "forgettable"]),
    (4, &["good", "enjoyable", "satisfying"]),
    (5, &["awesome", "incredible", "amazing"]),
];

/// Rates reviews from fixed lexical cues.
///
/// The first cue word in a review sets the food rating and the second sets the
/// service rating. A single cue rates both; no cue rates both as neutral.
#[derive(Debug, Clone)]
pub struct LexiconExtractor {
    lexicon: Vec<(u8, Vec<String>)>,
}

impl Default for LexiconExtractor {
    fn default() -> Self {
        Self::with_lexicon(DEFAULT_LEXICON)
    }
}

impl LexiconExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lexicon(lexicon: &[(u8, &[&str])]) -> Self {
        Self {
            lexicon: lexicon
                .iter()
                .map(|(rating, words)| {
                    (*rating, words.iter().map(|w| w.to_lowercase()).collect())
                })
                .collect(),
        }
    }

    /// Rates a single review text.
    pub fn rate(&self, text: &str) -> RatingPair {
        let mut cues = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .filter_map(|w| self.lookup(&w.to_lowercase()));

        match (cues.next(), cues.next()) {
            (Some(food), Some(service)) => RatingPair::new(food, service),
            (Some(both), None) => RatingPair::new(both, both),
            _ => RatingPair::new(NEUTRAL_RATING, NEUTRAL_RATING),
        }
    }

    fn lookup(&self, word: &str) -> Option<u8> {
        self.lexicon
            .iter()
            .find(|(_, words)| words.iter().any(|w| w == word))
            .map(|(rating, _)| *rating)
    }
}

#[async_trait]
impl RatingExtractor for LexiconExtractor {
    async fn extract(&self, reviews: &[ReviewRecord]) -> Result<Vec<RatingPair>, ExtractionError> {
        let ratings: Vec<RatingPair> = reviews.iter().map(|r| self.rate(&r.text)).collect();
        debug!(reviews = reviews.len(), "Rated reviews from lexicon");
        Ok(ratings)
    }
}
