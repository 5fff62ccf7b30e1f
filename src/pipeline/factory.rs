use std::sync::Arc;

use tracing::info;

use crate::agents::prompts::{analyze_system_prompt, fetch_system_prompt, score_system_prompt};
use crate::agents::{
    Agent, GenaiAgent, QueryFetchAgent, ReviewAnalysisAgent, ScoreRequestAgent, build_client,
};
use crate::config::{AgentBackend, Config};
use crate::extraction::{LexiconExtractor, RatingExtractor};
use crate::records::{RecordStore, ReviewSource};
use crate::tools::{ExtractRatingsTool, FetchReviewsTool, OverallScoreTool, ToolRegistry};

use super::orchestrator::Pipeline;
use super::stage::Stage;
use super::state::StageKind;

/// The three stage workers, in stage order.
pub struct StageAgents {
    pub fetch: Arc<dyn Agent>,
    pub analyze: Arc<dyn Agent>,
    pub score: Arc<dyn Agent>,
}

/// Builds the workers selected by `config.agent_backend`.
pub fn build_agents(config: &Config) -> StageAgents {
    match config.agent_backend {
        AgentBackend::Genai => {
            let client = build_client(config.api_key.as_deref(), config.endpoint.as_deref());
            StageAgents {
                fetch: Arc::new(GenaiAgent::new(
                    "fetch_agent",
                    client.clone(),
                    &config.model,
                    fetch_system_prompt(),
                )),
                analyze: Arc::new(GenaiAgent::new(
                    "review_analysis_agent",
                    client.clone(),
                    &config.model,
                    analyze_system_prompt(),
                )),
                score: Arc::new(GenaiAgent::new(
                    "scoring_agent",
                    client,
                    &config.model,
                    score_system_prompt(),
                )),
            }
        }
        AgentBackend::Offline => StageAgents {
            fetch: Arc::new(QueryFetchAgent),
            analyze: Arc::new(ReviewAnalysisAgent),
            score: Arc::new(ScoreRequestAgent),
        },
    }
}

/// Assembles a pipeline over `store` with the given workers.
///
/// Each stage gets only its own tool.
pub fn assemble_pipeline<S>(
    config: &Config,
    store: Arc<RecordStore<S>>,
    extractor: Arc<dyn RatingExtractor>,
    agents: StageAgents,
) -> Pipeline
where
    S: ReviewSource + 'static,
{
    let ceilings = config.reply_ceilings;

    let fetch = Stage::new(
        agents.fetch,
        ToolRegistry::new().register(Arc::new(FetchReviewsTool::new(store))),
        ceilings.for_stage(StageKind::Fetch),
    );
    let analyze = Stage::new(
        agents.analyze,
        ToolRegistry::new().register(Arc::new(ExtractRatingsTool::new(extractor))),
        ceilings.for_stage(StageKind::Analyze),
    );
    let score = Stage::new(
        agents.score,
        ToolRegistry::new().register(Arc::new(OverallScoreTool::new())),
        ceilings.for_stage(StageKind::Score),
    );

    Pipeline::new(fetch, analyze, score)
}

/// Builds the pipeline described by `config`: file-backed store, lexicon extractor,
/// and the configured worker backend.
pub fn build_pipeline(config: &Config) -> Pipeline {
    info!(
        backend = %config.agent_backend,
        model = %config.model,
        data_path = %config.data_path.display(),
        "Building pipeline"
    );

    let store = Arc::new(RecordStore::from_path(config.data_path.clone()));
    let extractor: Arc<dyn RatingExtractor> = Arc::new(LexiconExtractor::new());
    assemble_pipeline(config, store, extractor, build_agents(config))
}
