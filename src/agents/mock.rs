use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::tools::ToolSpec;

use super::Agent;
use super::error::AgentError;
use super::message::{AgentReply, ToolCall, Transcript};

/// Replays scripted replies in order, then a fallback (or `Unresponsive`).
pub struct MockAgent {
    name: String,
    replies: Mutex<VecDeque<Result<AgentReply, AgentError>>>,
    fallback: Option<Result<AgentReply, AgentError>>,
    seen: Mutex<Vec<Transcript>>,
}

impl MockAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replies: Mutex::new(VecDeque::new()),
            fallback: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A mock that gives the same reply on every turn.
    pub fn repeating(name: impl Into<String>, reply: Result<AgentReply, AgentError>) -> Self {
        Self {
            fallback: Some(reply),
            ..Self::new(name)
        }
    }

    pub fn with_reply(self, reply: Result<AgentReply, AgentError>) -> Self {
        self.replies.lock().push_back(reply);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_reply(Ok(AgentReply::Text(text.into())))
    }

    pub fn with_tool_call(self, name: &str, arguments: Value) -> Self {
        let id = format!("mock-{}", self.replies.lock().len() + 1);
        self.with_reply(Ok(AgentReply::ToolCalls(vec![ToolCall::new(
            id, name, arguments,
        )])))
    }

    pub fn with_error(self, error: AgentError) -> Self {
        self.with_reply(Err(error))
    }

    /// Number of turns this agent has been asked for.
    pub fn calls(&self) -> usize {
        self.seen.lock().len()
    }

    /// Transcripts as seen on each turn.
    pub fn seen(&self) -> Vec<Transcript> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl Agent for MockAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn reply(
        &self,
        transcript: &Transcript,
        _tools: &[ToolSpec],
    ) -> Result<AgentReply, AgentError> {
        self.seen.lock().push(transcript.clone());

        if let Some(reply) = self.replies.lock().pop_front() {
            return reply;
        }

        self.fallback
            .clone()
            .unwrap_or_else(|| Err(AgentError::Unresponsive("no scripted reply left".to_string())))
    }
}
