//! services/api/src/adapters/llm/gemini.rs
//!
//! This module contains the Google Gemini backend, implementing the
//! `CompletionModel` port over the `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use storyforge_core::ports::{CompletionModel, PortError, PortResult};

/// An adapter for the Gemini REST API.
#[derive(Clone)]
pub struct GeminiModel {
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiModel {
    /// Creates a new `GeminiModel` from an API key and model name.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CompletionModel for GeminiModel {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> PortResult<String> {
        let mut request_body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        {"text": prompt}
                    ]
                }
            ],
            "generationConfig": {
                "maxOutputTokens": 2000,
                "temperature": 0.7
            }
        });

        // When the prompt asks for JSON output, request the JSON mime type
        // so the model skips the Markdown fence.
        if prompt.contains("JSON") {
            request_body["generationConfig"]["response_mime_type"] = json!("application/json");
        }

        // The model is specified in the URL, not the body.
        let api_url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self
            .client
            .post(api_url)
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
                "Gemini API request failed with status {}: {}",
                status, text
            )));
        }

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // The generated text lives at candidates[0].content.parts[0].text.
        response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                PortError::Unexpected("Gemini response contained no text content.".to_string())
            })
    }
}
