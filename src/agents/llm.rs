//! LLM-backed workers through the `genai` client.

use async_trait::async_trait;
use genai::chat::{
    ChatMessage, ChatRequest, ContentPart, MessageContent, Tool as GenaiTool,
    ToolCall as GenaiToolCall, ToolResponse,
};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use tracing::{debug, warn};

use crate::tools::ToolSpec;

use super::Agent;
use super::error::AgentError;
use super::message::{AgentReply, Message, ToolCall, Transcript};

/// Builds a client with explicitly injected credentials and an optional endpoint.
///
/// With no key the client falls back to genai's own provider defaults.
pub fn build_client(api_key: Option<&str>, endpoint: Option<&str>) -> Client {
    let mut builder = Client::builder();

    if let Some(key) = api_key {
        let key = key.to_string();
        let auth_resolver = AuthResolver::from_resolver_fn(
            move |_model_iden: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_single(key.clone())))
            },
        );
        builder = builder.with_auth_resolver(auth_resolver);
    }

    if let Some(endpoint) = endpoint {
        let endpoint = endpoint.to_string();
        let target_resolver = ServiceTargetResolver::from_resolver_fn(
            move |service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let ServiceTarget { auth, model, .. } = service_target;
                Ok(ServiceTarget {
                    endpoint: Endpoint::from_owned(endpoint.clone()),
                    auth,
                    model,
                })
            },
        );
        builder = builder.with_service_target_resolver(target_resolver);
    }

    builder.build()
}

/// A worker whose replies come from a chat model.
#[derive(Clone)]
pub struct GenaiAgent {
    name: String,
    client: Client,
    model: String,
    system_prompt: String,
}

impl std::fmt::Debug for GenaiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiAgent")
            .field("name", &self.name)
            .field("model", &self.model)
            .finish()
    }
}

impl GenaiAgent {
    pub fn new(
        name: impl Into<String>,
        client: Client,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            model: model.into(),
            system_prompt: system_prompt.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, transcript: &Transcript, tools: &[ToolSpec]) -> ChatRequest {
        let messages: Vec<ChatMessage> = transcript.messages().iter().map(to_chat_message).collect();

        let mut request = ChatRequest::new(messages).with_system(self.system_prompt.clone());

        let genai_tools: Vec<GenaiTool> = tools.iter().map(to_genai_tool).collect();
        if !genai_tools.is_empty() {
            request = request.with_tools(genai_tools);
        }

        request
    }
}

#[async_trait]
impl Agent for GenaiAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn reply(
        &self,
        transcript: &Transcript,
        tools: &[ToolSpec],
    ) -> Result<AgentReply, AgentError> {
        let request = self.build_request(transcript, tools);

        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| {
                warn!(agent = %self.name, error = %e, "Model call failed");
                AgentError::Backend(e.to_string())
            })?;

        let calls: Vec<ToolCall> = response
            .tool_calls()
            .into_iter()
            .map(|tc| ToolCall::new(tc.call_id.clone(), tc.fn_name.clone(), tc.fn_arguments.clone()))
            .collect();

        if !calls.is_empty() {
            debug!(agent = %self.name, calls = calls.len(), "Model requested tool calls");
            return Ok(AgentReply::ToolCalls(calls));
        }

        let text = response.first_text().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(AgentError::EmptyReply);
        }

        Ok(AgentReply::Text(text))
    }
}

fn to_chat_message(message: &Message) -> ChatMessage {
    match message {
        Message::User { content } => ChatMessage::user(content.clone()),
        Message::Assistant { content } => ChatMessage::assistant(content.clone()),
        Message::ToolCalls { calls } => {
            let mut content = MessageContent::default();
            for call in calls {
                content.push(ContentPart::ToolCall(GenaiToolCall {
                    call_id: call.call_id.clone(),
                    fn_name: call.name.clone(),
                    fn_arguments: call.arguments.clone(),
                }));
            }
            ChatMessage::assistant(content)
        }
        Message::ToolResult {
            call_id, content, ..
        } => ChatMessage::from(ToolResponse::new(call_id.clone(), content.clone())),
    }
}

fn to_genai_tool(spec: &ToolSpec) -> GenaiTool {
    GenaiTool::new(&spec.name)
        .with_description(&spec.description)
        .with_schema(spec.parameters.clone())
}
