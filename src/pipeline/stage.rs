use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::agents::prompts::correction;
use crate::agents::{Agent, AgentReply, Message, ToolCall, Transcript};
use crate::tools::{ToolError, ToolRegistry};

use super::contract::StageContract;
use super::error::{PipelineError, PipelineResult};

/// A closed stage: its accepted payload, the last message and the turns it took.
#[derive(Debug, Clone)]
pub struct StageOutcome<T> {
    pub output: T,
    pub last_message: String,
    pub turns: u32,
}

/// One worker, the tools it may call, and its reply ceiling.
pub struct Stage {
    agent: Arc<dyn Agent>,
    tools: ToolRegistry,
    ceiling: u32,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("agent", &self.agent.name())
            .field("tools", &self.tools)
            .field("ceiling", &self.ceiling)
            .finish()
    }
}

impl Stage {
    /// A ceiling of `0` is raised to `1`: every stage gets at least one turn.
    pub fn new(agent: Arc<dyn Agent>, tools: ToolRegistry, ceiling: u32) -> Self {
        Self {
            agent,
            tools,
            ceiling: ceiling.max(1),
        }
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Runs turns until `contract` accepts the last message or the ceiling is hit.
    ///
    /// A turn is one worker reply. Tool calls in the reply are executed within the
    /// same turn; worker errors still consume it. A rejected text reply gets a
    /// corrective message if turns remain. Fatal tool errors abort immediately.
    #[instrument(
        skip(self, contract, request),
        fields(stage = %contract.kind(), agent = %self.agent.name(), ceiling = self.ceiling)
    )]
    pub async fn run<C: StageContract>(
        &self,
        contract: &mut C,
        request: String,
    ) -> PipelineResult<StageOutcome<C::Output>> {
        let stage = contract.kind();
        let specs = self.tools.specs();
        let mut transcript = Transcript::with_request(request);
        let mut reason = String::from("worker produced no reply");

        for turn in 1..=self.ceiling {
            match self.agent.reply(&transcript, &specs).await {
                Ok(AgentReply::Text(text)) => {
                    debug!(turn, len = text.len(), "Worker replied with text");
                    transcript.push(Message::assistant(text));
                }
                Ok(AgentReply::ToolCalls(calls)) => {
                    debug!(turn, calls = calls.len(), "Worker requested tool calls");
                    transcript.push(Message::ToolCalls {
                        calls: calls.clone(),
                    });
                    for call in &calls {
                        let message = self.execute(contract, call, turn).await?;
                        transcript.push(message);
                    }
                }
                Err(e) => {
                    warn!(turn, error = %e, "Worker turn failed");
                    reason = e.to_string();
                    continue;
                }
            }

            let Some(last) = transcript.last_message() else {
                continue;
            };

            match contract.accept(last) {
                Ok(output) => {
                    info!(turn, "Stage closed");
                    return Ok(StageOutcome {
                        output,
                        last_message: last.to_string(),
                        turns: turn,
                    });
                }
                Err(rejection) => {
                    debug!(turn, reason = %rejection, "Last message rejected");
                    if transcript.ends_with_worker_text() && turn < self.ceiling {
                        transcript.push(Message::user(correction(contract.expected(), &rejection)));
                    }
                    reason = rejection;
                }
            }
        }

        let error = contract.exhausted(transcript.last_message(), self.ceiling, reason);
        warn!(stage = %stage, error = %error, "Stage failed at reply ceiling");
        Err(error)
    }

    async fn execute<C: StageContract>(
        &self,
        contract: &mut C,
        call: &ToolCall,
        turn: u32,
    ) -> PipelineResult<Message> {
        if let Err(reason) = contract.check_call(call) {
            warn!(turn, tool = %call.name, reason = %reason, "Tool call rejected at stage boundary");
            let error = ToolError::Rejected {
                tool: call.name.clone(),
                reason,
            };
            return Ok(Message::tool_result(call, error.to_string(), true));
        }

        match self.tools.invoke(call).await {
            Ok(result) => {
                contract.observe_result(call, &result);
                Ok(Message::tool_result(call, result.to_string(), false))
            }
            Err(e) if e.is_fatal() => Err(PipelineError::from_fatal_tool(contract.kind(), e)),
            Err(e) => {
                debug!(turn, tool = %call.name, error = %e, "Tool error returned to worker");
                Ok(Message::tool_result(call, e.to_string(), true))
            }
        }
    }
}
