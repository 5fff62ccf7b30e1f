use async_trait::async_trait;

use super::*;
use crate::records::ReviewRecord;

fn review(text: &str) -> ReviewRecord {
    ReviewRecord::new("Subway", text)
}

#[test]
fn test_two_cues_rate_food_then_service() {
    let extractor = LexiconExtractor::new();
    let pair = extractor.rate("The food was incredible, but the service was bad.");
    assert_eq!(pair, RatingPair::new(5, 2));
}

#[test]
fn test_single_cue_rates_both() {
    let extractor = LexiconExtractor::new();
    assert_eq!(
        extractor.rate("Everything about it was forgettable."),
        RatingPair::new(3, 3)
    );
}

#[test]
fn test_no_cue_is_neutral() {
    let extractor = LexiconExtractor::new();
    assert_eq!(
        extractor.rate("We ate sandwiches there."),
        RatingPair::new(3, 3)
    );
}

#[test]
fn test_cues_are_case_insensitive_and_whole_word() {
    let extractor = LexiconExtractor::new();

    assert_eq!(
        extractor.rate("AWESOME subs, Horrible staff!"),
        RatingPair::new(5, 1)
    );
    // "badly" and "goods" are not cue words.
    assert_eq!(
        extractor.rate("Badly lit room, dry goods, awful bread."),
        RatingPair::new(1, 1)
    );
}

#[test]
fn test_extra_cues_are_ignored() {
    let extractor = LexiconExtractor::new();
    assert_eq!(
        extractor.rate("Good food, enjoyable service, awful parking."),
        RatingPair::new(4, 4)
    );
}

#[test]
fn test_custom_lexicon() {
    let extractor = LexiconExtractor::with_lexicon(&[(1, &["meh"]), (5, &["WOW"])]);
    assert_eq!(extractor.rate("wow then meh"), RatingPair::new(5, 1));
}

#[tokio::test]
async fn test_extract_preserves_order_and_length() {
    let extractor = LexiconExtractor::new();
    let reviews = vec![
        review("Amazing food, awesome service."),
        review("Bad food, unpleasant service."),
        review("Average."),
    ];

    let ratings = extract_checked(&extractor, &reviews).await.unwrap();

    assert_eq!(
        ratings,
        vec![
            RatingPair::new(5, 5),
            RatingPair::new(2, 2),
            RatingPair::new(3, 3),
        ]
    );
}

struct ShortExtractor;

#[async_trait]
impl RatingExtractor for ShortExtractor {
    async fn extract(&self, _reviews: &[ReviewRecord]) -> Result<Vec<RatingPair>, ExtractionError> {
        Ok(vec![RatingPair::new(4, 4)])
    }
}

struct WildExtractor;

#[async_trait]
impl RatingExtractor for WildExtractor {
    async fn extract(&self, reviews: &[ReviewRecord]) -> Result<Vec<RatingPair>, ExtractionError> {
        Ok(reviews.iter().map(|_| RatingPair::new(9, 1)).collect())
    }
}

#[tokio::test]
async fn test_extract_checked_detects_length_violation() {
    let reviews = vec![review("good"), review("bad")];
    let err = extract_checked(&ShortExtractor, &reviews).await.unwrap_err();

    assert!(matches!(
        err,
        ExtractionError::LengthMismatch {
            expected: 2,
            actual: 1
        }
    ));
}

#[tokio::test]
async fn test_extract_checked_detects_out_of_range() {
    let reviews = vec![review("good")];
    let err = extract_checked(&WildExtractor, &reviews).await.unwrap_err();

    assert!(matches!(err, ExtractionError::OutOfRange { index: 0, .. }));
}

#[test]
fn test_sheet_from_sequences() {
    let sheet = RatingSheet::from_sequences("Subway", &[5, 2], &[4, 2]).unwrap();

    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.food_scores(), vec![5, 2]);
    assert_eq!(sheet.service_scores(), vec![4, 2]);
    assert_eq!(
        sheet.to_json(),
        serde_json::json!({
            "restaurant_name": "Subway",
            "food_scores": [5, 2],
            "customer_service_scores": [4, 2],
        })
    );
}

#[test]
fn test_sheet_rejects_unequal_lengths() {
    let err = RatingSheet::from_sequences("Subway", &[5, 2, 3], &[4, 2]).unwrap_err();
    assert!(err.contains("3 entries"), "{err}");
}

#[test]
fn test_sheet_rejects_out_of_range() {
    assert!(RatingSheet::from_sequences("Subway", &[5], &[0]).is_err());
    assert!(RatingSheet::from_sequences("Subway", &[-1], &[3]).is_err());
    assert!(RatingSheet::from_sequences("Subway", &[300], &[3]).is_err());
}
