use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A worker's request to run a registered tool.
pub struct ToolCall {
    pub call_id: String,
    pub name: String,
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(call_id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
/// One entry in a stage conversation.
pub enum Message {
    /// Orchestrator-authored input (the stage request or a correction).
    User { content: String },
    /// Worker text reply.
    Assistant { content: String },
    /// Worker tool-call request.
    ToolCalls { calls: Vec<ToolCall> },
    /// Result of executing one tool call.
    ToolResult {
        call_id: String,
        name: String,
        content: String,
        is_error: bool,
    },
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: content.into(),
        }
    }

    pub fn tool_result(call: &ToolCall, content: impl Into<String>, is_error: bool) -> Self {
        Message::ToolResult {
            call_id: call.call_id.clone(),
            name: call.name.clone(),
            content: content.into(),
            is_error,
        }
    }

    /// Text content, if this message carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Message::User { content }
            | Message::Assistant { content }
            | Message::ToolResult { content, .. } => Some(content),
            Message::ToolCalls { .. } => None,
        }
    }

    /// Returns `true` for messages produced on the worker's side of the stage.
    pub fn is_worker_output(&self) -> bool {
        !matches!(self, Message::User { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A worker's reply for one turn.
pub enum AgentReply {
    Text(String),
    ToolCalls(Vec<ToolCall>),
}

#[derive(Debug, Clone, Default, PartialEq)]
/// The ordered messages of one stage. Never shared across stages or runs.
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a transcript with the stage request.
    pub fn with_request(request: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(request)],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The stage request (first user message).
    pub fn request(&self) -> Option<&str> {
        self.messages.iter().find_map(|m| match m {
            Message::User { content } => Some(content.as_str()),
            _ => None,
        })
    }

    /// The most recent worker-side text: the stage's "last message".
    pub fn last_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .filter(|m| m.is_worker_output())
            .find_map(Message::text)
    }

    /// Returns `true` if the newest message is a worker text reply.
    pub fn ends_with_worker_text(&self) -> bool {
        matches!(self.messages.last(), Some(Message::Assistant { .. }))
    }

    /// Results of calls to the tool named `name`, oldest first, as `(content, is_error)`.
    pub fn tool_results<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (&'a str, bool)> + 'a {
        self.messages.iter().filter_map(move |m| match m {
            Message::ToolResult {
                name: n,
                content,
                is_error,
                ..
            } if n == name => Some((content.as_str(), *is_error)),
            _ => None,
        })
    }
}
