//! OpenAI-compatible chat client
//!
//! One request shape covers every pipeline call: a single user message with
//! `response_format: {"type": "json_object"}`, so the assistant content is
//! always a JSON object string.

use crate::error::ChatError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default model used for both extraction and final analysis
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Seam between the pipeline and the completion backend
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `prompt` as a single user message in JSON mode and return the
    /// assistant content parsed as JSON.
    ///
    /// # Errors
    /// - `ChatError::Status` on a non-success HTTP status
    /// - `ChatError::MissingContent` if the response has no message
    /// - `ChatError::InvalidJson` if the content does not parse
    async fn complete_json(&self, prompt: &str) -> Result<Value, ChatError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

/// REST client for an OpenAI-compatible chat-completions endpoint
pub struct OpenAiChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChatClient {
    /// Create a client against the default endpoint and model
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// With API base URL (no trailing slash required)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With model name
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get model name
    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete_json(&self, prompt: &str) -> Result<Value, ChatError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "sending chat completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "chat completion rejected");
            return Err(ChatError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: ChatCompletionResponse = response.json().await?;
        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ChatError::MissingContent)?;

        Ok(serde_json::from_str(&content)?)
    }
}
