use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.com/v1";
pub const DEFAULT_MODEL: &str = "command-r7b-12-2024";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Generated reply for a single prompt.
#[derive(Debug, Clone)]
pub struct Completion {
    pub id: Option<String>,
    pub text: String,
}

/// Text-completion backend used to answer user messages.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn reply(&self, prompt: &str) -> Result<Completion, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    text: String,
    #[serde(default)]
    generation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

#[derive(Clone)]
pub struct CohereClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl CohereClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Reads `COHERE_API_KEY`, `COHERE_BASE_URL` and `COHERE_MODEL`.
    ///
    /// A missing key is not an error here; the provider rejects the first call instead.
    pub fn from_env() -> Self {
        let api_key = env::var("COHERE_API_KEY").unwrap_or_default();
        let base_url = env::var("COHERE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("COHERE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self::new(api_key, base_url, model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionService for CohereClient {
    async fn reply(&self, prompt: &str) -> Result<Completion, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            message: prompt,
        };

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
                return Err(LlmError::ApiError(error_response.message));
            }
            if error_text.is_empty() {
                return Err(LlmError::ApiError(status.to_string()));
            }
            return Err(LlmError::ApiError(error_text));
        }

        let body = response.text().await?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(Completion {
            id: chat_response.generation_id,
            text: chat_response.text,
        })
    }
}
