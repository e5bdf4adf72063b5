use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::client::LlmClient;
use crate::util::SecretString;

// ============================================================================
// OpenAI-compatible chat completions (xAI by default)
// ============================================================================

pub struct ChatCompletionsClient {
    api_key: SecretString,
    model: String,
    base_url: String,
    temperature: f32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    model: String,
    stream: bool,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(
        api_key: SecretString,
        model: String,
        base_url: String,
        temperature: f32,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .context("failed to build HTTP client")?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, system: &str, prompt: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            model: self.model.clone(),
            stream: false,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request = self.build_request(system, prompt);

        debug!(
            "Calling chat completions API at {} with model: {}",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("content-type", "application/json")
            .header(
                "authorization",
                format!("Bearer {}", self.api_key.expose()),
            )
            .json(&request)
            .send()
            .await
            .context("Failed to send request to chat completions API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("API error {}: {}", status, error_text);
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completions response")?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .context("No content in chat completions response")
    }
}

// ============================================================================
// Tests
// ============================================================================
