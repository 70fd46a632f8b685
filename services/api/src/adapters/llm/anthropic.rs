//! services/api/src/adapters/llm/anthropic.rs
//!
//! This module contains the Anthropic backend, implementing the
//! `CompletionModel` port over the Messages REST endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use storyforge_core::ports::{CompletionModel, PortError, PortResult};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// An adapter for the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicModel {
    api_key: String,
    model: String,
    client: Client,
}

impl AnthropicModel {
    /// Creates a new `AnthropicModel` from an API key and model name.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CompletionModel for AnthropicModel {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str) -> PortResult<String> {
        let request_body = json!({
            "model": self.model,
            "max_tokens": 2000,
            "temperature": 0.7,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        });

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PortError::Unexpected(format!(
                "Anthropic API request failed with status {}: {}",
                status, text
            )));
        }

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // The generated text lives at content[0].text.
        response_body["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                PortError::Unexpected("Anthropic response contained no text content.".to_string())
            })
    }
}
