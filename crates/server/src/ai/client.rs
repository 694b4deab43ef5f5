//! Client for the OpenAI Chat Completions API

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SYSTEM_PROMPT: &str = "You are an EMR support assistant.";

/// Why a completion could not be produced
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("completion API error ({status}): {message}")]
    Status { status: StatusCode, message: String },

    #[error("failed to parse response: {0}")]
    Malformed(String),

    #[error("no text content in response")]
    EmptyChoices,
}

impl CompletionError {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::MissingApiKey => "missing_api_key",
            CompletionError::Timeout => "timeout",
            CompletionError::Transport(_) => "transport",
            CompletionError::Status { .. } => "status",
            CompletionError::Malformed(_) => "malformed",
            CompletionError::EmptyChoices => "empty",
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout
        } else if err.is_decode() {
            CompletionError::Malformed(err.to_string())
        } else {
            CompletionError::Transport(err.to_string())
        }
    }
}

/// Client for the chat-completion endpoint
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

/// Request body for the Chat Completions API
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

/// Response from the Chat Completions API
#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Error detail from the Chat Completions API
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl CompletionClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        }
    }

    /// Ask the model about `query` and return the first choice's text.
    ///
    /// Makes exactly one request. Nothing is retried.
    pub async fn complete(&self, query: &str) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                Message::new("system", SYSTEM_PROMPT),
                Message::new("user", query),
            ],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiError>(&body) {
                Ok(api_err) => api_err.error.message,
                Err(_) => body,
            };
            return Err(CompletionError::Status { status, message });
        }

        let parsed: ApiResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyChoices)
    }
}
