//! Minimal JSON-mode chat completion client shared by the analyzer and the
//! block translator.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::ServiceConfig;
use super::error::ServiceError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
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
struct ChatResponse {
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

/// Sampling settings for one kind of request
#[derive(Debug, Clone, Copy)]
pub struct Completion {
    pub temperature: f32,
    pub max_tokens: u32,
}

pub struct ChatClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(config: &ServiceConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            base_url: config.openai_base_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        }
    }

    /// Run one system+user exchange and return the raw JSON content
    pub async fn complete_json(
        &self,
        system: &str,
        user: &str,
        completion: Completion,
    ) -> Result<String, ServiceError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: completion.temperature,
            max_tokens: completion.max_tokens,
            response_format: ResponseFormat { kind: "json_object" },
        };

        debug!(model = %self.model, max_tokens = completion.max_tokens, "chat completion");
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "chat completion rejected");
            return Err(ServiceError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ServiceError::MalformedResponse("completion has no content".into()))
    }
}
