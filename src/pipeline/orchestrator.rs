use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::agents::prompts::{
    ANALYZE_INSTRUCTION, SCORE_INSTRUCTION, carryover_request, fetch_request,
};
use crate::scoring::Score;

use super::contract::{AnalyzeContract, FetchContract, ScoreContract};
use super::error::PipelineResult;
use super::stage::Stage;
use super::state::{PipelineRun, RunState, StageKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Worker turns used by each stage of a run.
pub struct StageTurns {
    pub fetch: u32,
    pub analyze: u32,
    pub score: u32,
}

impl StageTurns {
    pub fn total(&self) -> u32 {
        self.fetch + self.analyze + self.score
    }
}

#[derive(Debug, Clone, Serialize)]
/// Result of a successful run.
pub struct RunReport {
    pub run_id: Uuid,
    pub query: String,
    pub started_at: DateTime<Utc>,
    pub score: Score,
    pub review_count: usize,
    pub turns: StageTurns,
    pub trail: Vec<RunState>,
}

/// Drives Fetch → Analyze → Score for one query at a time.
///
/// Holds no per-run state, so one pipeline can serve concurrent runs.
#[derive(Debug)]
pub struct Pipeline {
    fetch: Stage,
    analyze: Stage,
    score: Stage,
}

impl Pipeline {
    pub fn new(fetch: Stage, analyze: Stage, score: Stage) -> Self {
        Self {
            fetch,
            analyze,
            score,
        }
    }

    pub fn stage(&self, kind: StageKind) -> &Stage {
        match kind {
            StageKind::Fetch => &self.fetch,
            StageKind::Analyze => &self.analyze,
            StageKind::Score => &self.score,
        }
    }

    /// Runs `query` through all three stages.
    pub async fn run(&self, query: &str) -> PipelineResult<RunReport> {
        let mut run = PipelineRun::new(query);
        self.execute(&mut run).await
    }

    /// Drives `run` to `Done`, or leaves it `Failed` and returns the error.
    #[instrument(skip(self, run), fields(run_id = %run.run_id(), query = %run.query()))]
    pub async fn execute(&self, run: &mut PipelineRun) -> PipelineResult<RunReport> {
        match self.drive(run).await {
            Ok(report) => {
                info!(
                    entity = %report.score.entity_name,
                    score = report.score.value,
                    turns = report.turns.total(),
                    "Run complete"
                );
                Ok(report)
            }
            Err(e) => {
                run.fail();
                error!(
                    stage = ?e.failed_stage(),
                    error = %e,
                    "Run failed"
                );
                Err(e)
            }
        }
    }

    async fn drive(&self, run: &mut PipelineRun) -> PipelineResult<RunReport> {
        let mut turns = StageTurns::default();

        run.transition(StageKind::Fetch.running_state())?;
        let fetched = self
            .fetch
            .run(&mut FetchContract, fetch_request(run.query()))
            .await?;
        turns.fetch = fetched.turns;
        let entity = fetched.output.entity_name().to_string();
        let review_count = fetched.output.len();
        info!(entity = %entity, reviews = review_count, "Reviews fetched");
        run.record_reviews(fetched.output);

        run.transition(StageKind::Analyze.running_state())?;
        let analyzed = self
            .analyze
            .run(
                &mut AnalyzeContract::new(&entity, review_count),
                carryover_request(ANALYZE_INSTRUCTION, &fetched.last_message),
            )
            .await?;
        turns.analyze = analyzed.turns;
        run.record_ratings(analyzed.output.clone());

        run.transition(StageKind::Score.running_state())?;
        let scored = self
            .score
            .run(
                &mut ScoreContract::new(analyzed.output),
                carryover_request(SCORE_INSTRUCTION, &analyzed.last_message),
            )
            .await?;
        turns.score = scored.turns;
        run.record_score(scored.output.clone());

        run.transition(RunState::Done)?;

        Ok(RunReport {
            run_id: run.run_id(),
            query: run.query().to_string(),
            started_at: run.started_at(),
            score: scored.output,
            review_count,
            turns,
            trail: run.trail().to_vec(),
        })
    }
}

