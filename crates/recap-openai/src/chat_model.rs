use std::sync::Arc;

use async_trait::async_trait;
use recap_core::{ChatModel, ChatRequest, ChatResponse, Message, RecapError, TokenUsage};
use serde_json::{json, Value};

use crate::backend::{ProviderBackend, ProviderRequest, ProviderResponse};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Configuration for OpenAI chat completions.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Read the API credential from `OPENAI_API_KEY`.
    ///
    /// A missing credential is a startup error, not something to discover
    /// halfway through a run.
    pub fn from_env(model: impl Into<String>) -> Result<Self, RecapError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| RecapError::Config("OPENAI_API_KEY is not set".to_string()))?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

// ---------------------------------------------------------------------------
// Chat model
// ---------------------------------------------------------------------------

/// OpenAI chat model speaking the chat-completions API.
pub struct OpenAiChatModel {
    config: OpenAiConfig,
    backend: Arc<dyn ProviderBackend>,
}

impl OpenAiChatModel {
    pub fn new(config: OpenAiConfig, backend: Arc<dyn ProviderBackend>) -> Self {
        Self { config, backend }
    }

    /// Build a `ProviderRequest` targeting the chat completions endpoint.
    pub fn build_request(&self, request: &ChatRequest) -> ProviderRequest {
        let messages: Vec<Value> = request.messages.iter().map(message_to_openai).collect();

        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
        });

        if let Some(temp) = self.config.temperature {
            body["temperature"] = json!(temp);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        ProviderRequest {
            url: format!("{}/chat/completions", self.config.base_url),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.api_key),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, RecapError> {
        let provider_req = self.build_request(&request);
        let resp = self.backend.send(provider_req).await?;
        parse_response(&resp)
    }
}

// ---------------------------------------------------------------------------
// Wire mapping
// ---------------------------------------------------------------------------

pub(crate) fn message_to_openai(message: &Message) -> Value {
    json!({
        "role": message.role().to_string(),
        "content": message.content(),
    })
}

/// Map an HTTP response to a `ChatResponse` or the error taxonomy.
///
/// Rate limiting, request timeout, and server errors are transient;
/// every other non-200 status is not worth retrying.
pub(crate) fn parse_response(response: &ProviderResponse) -> Result<ChatResponse, RecapError> {
    match response.status {
        200 => {}
        408 | 429 => {
            return Err(RecapError::Transient(format!(
                "OpenAI API error ({}): {}",
                response.status, response.body
            )))
        }
        500..=599 => {
            return Err(RecapError::Transient(format!(
                "OpenAI API error ({}): {}",
                response.status, response.body
            )))
        }
        status => {
            return Err(RecapError::NonRetryable(format!(
                "OpenAI API error ({}): {}",
                status, response.body
            )))
        }
    }

    let content = response.body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| {
            RecapError::Parsing(format!("no completion content in response: {}", response.body))
        })?;
    let usage = serde_json::from_value::<TokenUsage>(response.body["usage"].clone()).ok();

    Ok(ChatResponse {
        message: Message::ai(content),
        usage,
    })
}
