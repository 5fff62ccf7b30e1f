//! End-to-end pipeline tests over a file-backed Record Store.

mod common;

use std::sync::Arc;

use serde_json::json;

use savor::constants::{EXTRACT_TOOL_NAME, FETCH_TOOL_NAME, SCORE_TOOL_NAME};
use savor::pipeline::{PipelineError, RunState, StageAgents, StageKind, assemble_pipeline};
use savor::{LexiconExtractor, MockAgent, RecordStore, build_pipeline};

use common::fixtures::{SUBWAY_SCORE, offline_config, review_file, sample_review_file};

#[tokio::test]
async fn test_subway_query_yields_deterministic_score() {
    let file = sample_review_file();
    let pipeline = build_pipeline(&offline_config(file.path()));

    let first = pipeline.run("Tell me about Subway").await.unwrap();
    let second = pipeline.run("Tell me about Subway").await.unwrap();

    assert_eq!(first.score.entity_name, "Subway");
    assert_eq!(first.score.value, SUBWAY_SCORE);
    assert_eq!(first.score.to_json_line(), r#"{"Subway": 5.367}"#);
    assert_eq!(first.score, second.score);
    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.trail.last(), Some(&RunState::Done));
}

#[tokio::test]
async fn test_sample_queries_resolve_entities() {
    let file = sample_review_file();
    let pipeline = build_pipeline(&offline_config(file.path()));

    let mcdonalds = pipeline
        .run("How good is McDonald's as a restaurant")
        .await
        .unwrap();
    assert_eq!(mcdonalds.score.entity_name, "McDonald's");
    assert_eq!(mcdonalds.score.value, 6.197);

    let in_n_out = pipeline.run("What would you rate In N Out?").await.unwrap();
    assert_eq!(in_n_out.score.entity_name, "In N Out");
    assert_eq!(in_n_out.score.value, 10.0);
}

#[tokio::test]
async fn test_unknown_restaurant_is_reported_as_no_reviews() {
    let file = sample_review_file();
    let pipeline = build_pipeline(&offline_config(file.path()));

    let err = pipeline.run("Tell me about Chipotle").await.unwrap_err();

    assert!(matches!(err, PipelineError::NoReviews { .. }));
    assert_eq!(err.failed_stage(), Some(StageKind::Fetch));
}

#[tokio::test]
async fn test_missing_data_file_degrades_to_no_reviews() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("restaurant-data.txt");
    let pipeline = build_pipeline(&offline_config(&missing));

    let err = pipeline.run("Tell me about Subway").await.unwrap_err();
    assert!(matches!(err, PipelineError::NoReviews { .. }));
}

#[test]
fn test_record_store_fetch_is_case_insensitive() {
    let file = sample_review_file();
    let store = RecordStore::from_path(file.path());

    let lower = store.fetch("subway").unwrap();
    let upper = store.fetch("Subway").unwrap();

    assert_eq!(lower.texts(), upper.texts());
    assert_eq!(
        upper.texts(),
        vec![
            "The food was amazing and the customer service was good.",
            "Bad sandwiches and awful service, the staff ignored us.",
        ]
    );
}

#[test]
fn test_record_store_unknown_entity_is_empty_not_error() {
    let file = review_file(&["Subway. Good food."]);
    let store = RecordStore::from_path(file.path());

    let set = store.fetch("Wendy's").unwrap();
    assert!(set.is_empty());
    assert_eq!(set.to_json(), json!({"Wendy's": []}));
}

#[tokio::test]
async fn test_scripted_workers_drive_every_tool() {
    let file = sample_review_file();
    let config = offline_config(file.path());

    let fetch = Arc::new(
        MockAgent::new("fetch")
            .with_tool_call(FETCH_TOOL_NAME, json!({"restaurant_name": "Subwya"}))
            .with_tool_call(FETCH_TOOL_NAME, json!({"restaurant_name": "Subway"})),
    );
    let analyze = Arc::new(MockAgent::new("analyze").with_tool_call(
        EXTRACT_TOOL_NAME,
        json!({
            "restaurant_name": "Subway",
            "reviews": [
                "The food was amazing and the customer service was good.",
                "Bad sandwiches and awful service, the staff ignored us.",
            ],
        }),
    ));
    let score = Arc::new(MockAgent::new("score").with_tool_call(
        SCORE_TOOL_NAME,
        json!({
            "restaurant_name": "Subway",
            "food_scores": [5, 2],
            "customer_service_scores": [4, 1],
        }),
    ));

    let pipeline = assemble_pipeline(
        &config,
        Arc::new(RecordStore::from_path(file.path())),
        Arc::new(LexiconExtractor::new()),
        StageAgents {
            fetch: fetch.clone(),
            analyze: analyze.clone(),
            score: score.clone(),
        },
    );

    let report = pipeline.run("Tell me about Subway").await.unwrap();

    assert_eq!(report.score.value, SUBWAY_SCORE);
    assert_eq!(report.turns.fetch, 2);
    assert_eq!(report.turns.analyze, 1);
    assert_eq!(report.turns.score, 1);
    assert_eq!(fetch.calls(), 2);
}
