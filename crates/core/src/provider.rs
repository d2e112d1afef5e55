//! # Capability Provider
//!
//! The single external boundary of the orchestration core: an async
//! text-generation contract addressed by a model identifier string.
//! Agents and the orchestrator depend only on [`CapabilityProvider`];
//! [`GatewayClient`] is the default OpenAI-compatible implementation.
//!
//! Tool definitions here are schema-only markers. When a model asks to
//! call one, the gateway echoes the call arguments straight back as the
//! tool result — tools shape the model's intermediate reasoning, they
//! never execute side effects.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback model when neither the caller nor the context names one
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

const DEFAULT_BASE_URL: &str = "https://ai-gateway.vercel.sh/v1";

/// Errors from the generation boundary
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http transport error: {0}")]
    Http(String),
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("provider returned an empty response")]
    EmptyResponse,
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),
}

/// Role of a chat message in the conversation history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

/// One turn of conversation history passed to the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A schema-only tool declaration passed along with a generation call.
///
/// Deliberately not a plugin surface: name, description and a JSON
/// schema for the parameters is the whole contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema of the tool input
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    /// Build a spec whose parameter schema is derived from `T`
    pub fn of<T: schemars::JsonSchema>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let schema = schemars::schema_for!(T);
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::to_value(schema)
                .unwrap_or_else(|_| serde_json::json!({ "type": "object" })),
        }
    }
}

/// One generation call: model id, prompt material, and bounds.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    /// Present tools enable multi-step tool-assisted generation
    pub tools: Vec<ToolSpec>,
    /// Reasoning/tool-use step cap; only meaningful with tools
    pub step_limit: u32,
    pub temperature: f32,
    /// Usage attribution (gateway analytics), not semantics
    pub user: Option<String>,
    pub tags: Vec<String>,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            system: None,
            messages,
            tools: Vec::new(),
            step_limit: 1,
            temperature: 0.7,
            user: None,
            tags: Vec::new(),
        }
    }

    /// Single-shot prompt convenience constructor
    pub fn from_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(model, vec![ChatMessage::user(prompt)])
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpec>, step_limit: u32) -> Self {
        self.tools = tools;
        self.step_limit = step_limit.max(1);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_user(mut self, user: Option<&str>) -> Self {
        self.user = user.map(str::to_string);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// The external text-generation capability the swarm depends on.
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}

/// OpenAI-compatible chat-completions client (Vercel AI Gateway by
/// default, any compatible endpoint via `with_base_url`).
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GatewayClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Load the API key from `AI_GATEWAY_API_KEY`, falling back to
    /// `OPENAI_API_KEY`; base URL override from `AI_GATEWAY_BASE_URL`.
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = std::env::var("AI_GATEWAY_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| ProviderError::MissingApiKey("AI_GATEWAY_API_KEY"))?;
        let mut client = Self::new(api_key);
        if let Ok(base_url) = std::env::var("AI_GATEWAY_BASE_URL") {
            client.base_url = base_url;
        }
        Ok(client)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_messages(request: &GenerationRequest) -> Vec<serde_json::Value> {
        let mut api_messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            api_messages.push(serde_json::json!({
                "role": "system",
                "content": system,
            }));
        }
        for message in &request.messages {
            api_messages.push(serde_json::json!({
                "role": match message.role {
                    ChatRole::System => "system",
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                    ChatRole::Tool => "tool",
                },
                "content": message.content,
            }));
        }
        api_messages
    }

    fn build_tools(tools: &[ToolSpec]) -> Vec<serde_json::Value> {
        tools
            .iter()
            .map(|tool| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.parameters,
                    }
                })
            })
            .collect()
    }

    async fn post_chat(
        &self,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: payload
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown provider error")
                    .to_string(),
            });
        }
        Ok(payload)
    }
}

#[async_trait]
impl CapabilityProvider for GatewayClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let mut api_messages = Self::build_messages(&request);
        let tools = Self::build_tools(&request.tools);
        let steps = if request.tools.is_empty() {
            1
        } else {
            request.step_limit.max(1)
        };

        for step in 0..steps {
            let mut body = serde_json::json!({
                "model": request.model,
                "messages": api_messages,
                "temperature": request.temperature,
            });
            if !tools.is_empty() {
                body["tools"] = serde_json::Value::Array(tools.clone());
            }
            if let Some(user) = &request.user {
                body["user"] = serde_json::json!(user);
            }

            let payload = self.post_chat(&body).await?;
            let message = payload
                .get("choices")
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("message"))
                .ok_or(ProviderError::EmptyResponse)?;

            let tool_calls = message
                .get("tool_calls")
                .and_then(|t| t.as_array())
                .cloned()
                .unwrap_or_default();

            let last_step = step + 1 == steps;
            if tool_calls.is_empty() || last_step {
                return message
                    .get("content")
                    .and_then(|c| c.as_str())
                    .filter(|text| !text.is_empty())
                    .map(str::to_string)
                    .ok_or(ProviderError::EmptyResponse);
            }

            // Echo each call's arguments back as its result and loop.
            api_messages.push(message.clone());
            for call in &tool_calls {
                let call_id = call.get("id").and_then(|i| i.as_str()).unwrap_or_default();
                let arguments = call
                    .get("function")
                    .and_then(|f| f.get("arguments"))
                    .and_then(|a| a.as_str())
                    .unwrap_or("{}");
                api_messages.push(serde_json::json!({
                    "role": "tool",
                    "tool_call_id": call_id,
                    "content": arguments,
                }));
            }
            tracing::debug!(
                step = step + 1,
                calls = tool_calls.len(),
                "echoed inert tool calls back to model"
            );
        }

        Err(ProviderError::EmptyResponse)
    }
}
