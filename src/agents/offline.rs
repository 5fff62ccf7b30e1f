//! Deterministic workers that need no model backend.
//!
//! Each derives its next move from the stage transcript alone, so one instance can
//! serve concurrent runs.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::constants::{EXTRACT_TOOL_NAME, FETCH_TOOL_NAME, SCORE_TOOL_NAME};
use crate::payload::{find_json_object, rating_sequences, review_mapping};
use crate::tools::ToolSpec;

use super::error::AgentError;
use super::message::{AgentReply, ToolCall, Transcript};
use super::prompts::query_from_request;
use super::Agent;

const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "as", "at", "do", "does", "for", "good", "how", "i", "is", "it",
    "me", "of", "overall", "please", "place", "rate", "restaurant", "review", "reviews", "score",
    "tell", "the", "think", "to", "was", "what", "would", "you",
];

const TRIGGERS: &[&str] = &["about", "is", "rate", "of", "at", "for", "review", "reviews"];

/// Resolves the entity name from the raw query and fetches its reviews.
///
/// Each turn tries the next name candidate until a fetch returns reviews.
#[derive(Debug, Clone, Default)]
pub struct QueryFetchAgent;

#[async_trait]
impl Agent for QueryFetchAgent {
    fn name(&self) -> &str {
        "query_fetch_agent"
    }

    async fn reply(
        &self,
        transcript: &Transcript,
        tools: &[ToolSpec],
    ) -> Result<AgentReply, AgentError> {
        require_tool(tools, FETCH_TOOL_NAME)?;

        let request = transcript.request().unwrap_or_default();
        let query = query_from_request(request).unwrap_or(request);

        let mut attempts = 0usize;
        for (content, is_error) in transcript.tool_results(FETCH_TOOL_NAME) {
            attempts += 1;
            if is_error {
                continue;
            }
            if let Some((_, reviews)) = find_json_object(content).as_ref().and_then(review_mapping)
                && !reviews.is_empty()
            {
                return Ok(AgentReply::Text(content.to_string()));
            }
        }

        let candidates = entity_candidates(query);
        match candidates.get(attempts) {
            Some(candidate) => {
                debug!(candidate = %candidate, attempt = attempts + 1, "Trying entity candidate");
                Ok(AgentReply::ToolCalls(vec![ToolCall::new(
                    format!("fetch-{}", attempts + 1),
                    FETCH_TOOL_NAME,
                    json!({ "restaurant_name": candidate }),
                )]))
            }
            None => Ok(AgentReply::Text(
                transcript
                    .last_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("No restaurant name found in \"{query}\".")),
            )),
        }
    }
}

/// Candidate entity names in the order they should be tried.
///
/// Capitalized word runs come first, then the phrase after a trigger word
/// ("about", "rate", ...), then the remaining content words one by one.
pub fn entity_candidates(query: &str) -> Vec<String> {
    let tokens: Vec<&str> = query
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '&'))
        .filter(|t| !t.is_empty())
        .collect();

    let mut candidates: Vec<String> = Vec::new();
    let mut push = |candidate: String| {
        if !candidate.is_empty()
            && !candidates
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&candidate))
        {
            candidates.push(candidate);
        }
    };

    let mut runs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for (i, &token) in tokens.iter().enumerate() {
        let capitalized = token
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit());
        if capitalized && (i > 0 || tokens.len() == 1) {
            current.push(token);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs.sort_by_key(|run| std::cmp::Reverse(run.len()));
    for run in runs {
        push(run.join(" "));
    }

    if let Some(pos) = tokens
        .iter()
        .position(|t| TRIGGERS.contains(&t.to_lowercase().as_str()))
    {
        let phrase: Vec<&str> = tokens[pos + 1..]
            .iter()
            .skip_while(|t| is_stopword(t))
            .take_while(|t| !is_stopword(t))
            .copied()
            .collect();
        push(phrase.join(" "));
    }

    for token in tokens.iter().filter(|t| !is_stopword(t)) {
        push(token.to_string());
    }

    candidates
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token.to_lowercase().as_str())
}

/// Rates the reviews carried over from the Fetch stage.
#[derive(Debug, Clone, Default)]
pub struct ReviewAnalysisAgent;

#[async_trait]
impl Agent for ReviewAnalysisAgent {
    fn name(&self) -> &str {
        "review_analysis_agent"
    }

    async fn reply(
        &self,
        transcript: &Transcript,
        tools: &[ToolSpec],
    ) -> Result<AgentReply, AgentError> {
        require_tool(tools, EXTRACT_TOOL_NAME)?;

        if let Some(reply) = finished_or_failed(transcript, EXTRACT_TOOL_NAME) {
            return Ok(reply);
        }

        let request = transcript.request().unwrap_or_default();
        let Some((entity, reviews)) = find_json_object(request).as_ref().and_then(review_mapping)
        else {
            return Ok(AgentReply::Text(
                "No reviews were provided to analyze.".to_string(),
            ));
        };

        Ok(AgentReply::ToolCalls(vec![ToolCall::new(
            "extract-1",
            EXTRACT_TOOL_NAME,
            json!({ "restaurant_name": entity, "reviews": reviews }),
        )]))
    }
}

/// Requests the overall score for the ratings carried over from the Analyze stage.
#[derive(Debug, Clone, Default)]
pub struct ScoreRequestAgent;

#[async_trait]
impl Agent for ScoreRequestAgent {
    fn name(&self) -> &str {
        "score_request_agent"
    }

    async fn reply(
        &self,
        transcript: &Transcript,
        tools: &[ToolSpec],
    ) -> Result<AgentReply, AgentError> {
        require_tool(tools, SCORE_TOOL_NAME)?;

        if let Some(reply) = finished_or_failed(transcript, SCORE_TOOL_NAME) {
            return Ok(reply);
        }

        let request = transcript.request().unwrap_or_default();
        let Some(sequences) = find_json_object(request).as_ref().and_then(rating_sequences)
        else {
            return Ok(AgentReply::Text(
                "No food or customer service scores were provided.".to_string(),
            ));
        };

        Ok(AgentReply::ToolCalls(vec![ToolCall::new(
            "score-1",
            SCORE_TOOL_NAME,
            json!({
                "restaurant_name": sequences.entity_name.unwrap_or_default(),
                "food_scores": sequences.food,
                "customer_service_scores": sequences.service,
            }),
        )]))
    }
}

/// After a single-shot tool call: echo a success, or report the error as text.
fn finished_or_failed(transcript: &Transcript, tool: &str) -> Option<AgentReply> {
    let (content, is_error) = transcript.tool_results(tool).last()?;
    if is_error {
        Some(AgentReply::Text(format!("Unable to complete: {content}")))
    } else {
        Some(AgentReply::Text(content.to_string()))
    }
}

fn require_tool(tools: &[ToolSpec], name: &str) -> Result<(), AgentError> {
    if tools.iter().any(|t| t.name == name) {
        Ok(())
    } else {
        Err(AgentError::Unresponsive(format!(
            "required tool '{name}' is not registered"
        )))
    }
}
