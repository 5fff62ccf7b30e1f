//! Tests for the `savor` binary: output line and exit codes.

mod common;

use std::process::{Command, Output};

use common::fixtures::sample_review_file;

fn savor(args: &[&str], data_path: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_savor"))
        .args(args)
        .env_remove("SAVOR_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("SAVOR_REPLY_CEILING")
        .env("SAVOR_AGENT_BACKEND", "offline")
        .env("SAVOR_DATA_PATH", data_path)
        .env("RUST_LOG", "off")
        .output()
        .expect("run savor binary")
}

#[test]
fn test_prints_score_line_and_exits_zero() {
    let file = sample_review_file();

    let output = savor(&["Tell me about Subway"], file.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"Subway": 5.367}"#
    );
}

#[test]
fn test_unquoted_query_words_are_joined() {
    let file = sample_review_file();

    let output = savor(&["Tell", "me", "about", "Subway"], file.path());

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_missing_query_is_usage_error() {
    let file = sample_review_file();

    let output = savor(&[], file.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_pipeline_failure_names_stage() {
    let file = sample_review_file();

    let output = savor(&["Tell me about Chipotle"], file.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Fetch stage failed"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_ceiling_is_configuration_error() {
    let file = sample_review_file();

    let output = Command::new(env!("CARGO_BIN_EXE_savor"))
        .arg("Tell me about Subway")
        .env("SAVOR_AGENT_BACKEND", "offline")
        .env("SAVOR_DATA_PATH", file.path())
        .env("SAVOR_REPLY_CEILING", "0")
        .env("RUST_LOG", "off")
        .output()
        .expect("run savor binary");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration error"));
}
