//! Savor library crate (used by the CLI and integration tests).
//!
//! # Public API Surface
//!
//! A free-text query about a restaurant goes through three bounded stages, each
//! driven by its own worker:
//!
//! 1. **Fetch**: resolve the entity name and pull its reviews from the
//!    [`RecordStore`].
//! 2. **Analyze**: rate every review for food and service through a
//!    [`RatingExtractor`].
//! 3. **Score**: combine the ratings with [`overall_score`].
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//! - [`Pipeline`], [`PipelineRun`], [`RunReport`], [`PipelineError`] - Orchestration
//! - [`Score`], [`ScoringError`] - Scoring Engine
//!
//! ## Collaborators
//! - [`RecordStore`], [`ReviewSource`] - Review lookup
//! - [`LexiconExtractor`] - Keyword-based rating extraction
//! - [`ToolRegistry`], [`Tool`] - Capabilities handed to workers
//! - [`Agent`], [`GenaiAgent`] and the offline workers
//!
//! ## Test/Mock Support
//! [`MockAgent`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod agents;
pub mod config;
pub mod constants;
pub mod extraction;
pub mod payload;
pub mod pipeline;
pub mod records;
pub mod scoring;
pub mod tools;

pub use agents::{
    Agent, AgentError, AgentReply, GenaiAgent, Message, QueryFetchAgent, ReviewAnalysisAgent,
    ScoreRequestAgent, ToolCall, Transcript,
};
#[cfg(any(test, feature = "mock"))]
pub use agents::MockAgent;
pub use config::{AgentBackend, Config, ConfigError, ReplyCeilings};
pub use constants::{MAX_RATING, MAX_SCORE, MIN_RATING};
pub use extraction::{ExtractionError, LexiconExtractor, RatingExtractor, RatingPair, RatingSheet};
pub use pipeline::{
    Pipeline, PipelineError, PipelineRun, RunReport, RunState, Stage, StageAgents, StageKind,
    assemble_pipeline, build_pipeline,
};
pub use records::{
    FileReviewSource, InMemoryReviewSource, RecordStore, RecordStoreError, ReviewRecord,
    ReviewSet, ReviewSource,
};
pub use scoring::{Score, ScoringError, overall_score};
pub use tools::{Tool, ToolError, ToolRegistry, ToolSpec};
