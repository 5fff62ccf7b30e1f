use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::extraction::{RatingPair, RatingSheet};
use crate::records::{ReviewRecord, ReviewSet};
use crate::scoring::Score;

use super::error::{PipelineError, PipelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// The three stages of a run, in execution order.
pub enum StageKind {
    Fetch,
    Analyze,
    Score,
}

impl StageKind {
    pub const ALL: [StageKind; 3] = [StageKind::Fetch, StageKind::Analyze, StageKind::Score];

    /// The run state while this stage is open.
    pub fn running_state(self) -> RunState {
        match self {
            StageKind::Fetch => RunState::Fetching,
            StageKind::Analyze => RunState::Analyzing,
            StageKind::Score => RunState::Scoring,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Fetch => write!(f, "Fetch"),
            StageKind::Analyze => write!(f, "Analyze"),
            StageKind::Score => write!(f, "Score"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Lifecycle of one run: `Init → Fetching → Analyzing → Scoring → Done`, or `Failed`
/// from any non-terminal state.
pub enum RunState {
    Init,
    Fetching,
    Analyzing,
    Scoring,
    Done,
    Failed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }

    /// The stage open in this state, if any.
    pub fn stage(self) -> Option<StageKind> {
        match self {
            RunState::Fetching => Some(StageKind::Fetch),
            RunState::Analyzing => Some(StageKind::Analyze),
            RunState::Scoring => Some(StageKind::Score),
            RunState::Init | RunState::Done | RunState::Failed => None,
        }
    }

    pub fn can_transition_to(self, next: RunState) -> bool {
        match (self, next) {
            (RunState::Init, RunState::Fetching)
            | (RunState::Fetching, RunState::Analyzing)
            | (RunState::Analyzing, RunState::Scoring)
            | (RunState::Scoring, RunState::Done) => true,
            (from, RunState::Failed) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Init => "Init",
            RunState::Fetching => "Fetching",
            RunState::Analyzing => "Analyzing",
            RunState::Scoring => "Scoring",
            RunState::Done => "Done",
            RunState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// Everything one invocation produces. Owned by a single run and never shared.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    run_id: Uuid,
    query: String,
    started_at: DateTime<Utc>,
    state: RunState,
    trail: Vec<RunState>,
    entity_name: Option<String>,
    reviews: Vec<ReviewRecord>,
    ratings: Vec<RatingPair>,
    score: Option<Score>,
}

impl PipelineRun {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            query: query.into(),
            started_at: Utc::now(),
            state: RunState::Init,
            trail: vec![RunState::Init],
            entity_name: None,
            reviews: Vec::new(),
            ratings: Vec::new(),
            score: None,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// States passed through so far, oldest first.
    pub fn trail(&self) -> &[RunState] {
        &self.trail
    }

    pub fn entity_name(&self) -> Option<&str> {
        self.entity_name.as_deref()
    }

    pub fn reviews(&self) -> &[ReviewRecord] {
        &self.reviews
    }

    pub fn ratings(&self) -> &[RatingPair] {
        &self.ratings
    }

    pub fn score(&self) -> Option<&Score> {
        self.score.as_ref()
    }

    /// Moves to `next`, rejecting transitions the state machine does not allow.
    pub fn transition(&mut self, next: RunState) -> PipelineResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(PipelineError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }

        debug!(run_id = %self.run_id, from = %self.state, to = %next, "Run transition");
        self.state = next;
        self.trail.push(next);
        Ok(())
    }

    /// Marks the run failed. No-op once terminal.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = RunState::Failed;
            self.trail.push(RunState::Failed);
        }
    }

    pub(crate) fn record_reviews(&mut self, set: ReviewSet) {
        self.entity_name = Some(set.entity_name().to_string());
        self.reviews = set.into_reviews();
    }

    pub(crate) fn record_ratings(&mut self, sheet: RatingSheet) {
        self.ratings = sheet.ratings().to_vec();
    }

    pub(crate) fn record_score(&mut self, score: Score) {
        self.score = Some(score);
    }
}
