//! services/api/src/adapters/identity.rs
//!
//! This module contains the adapter for the external identity provider,
//! implementing the `IdentityService` port. Authentication mechanics live
//! entirely on the provider's side; this service only asks it to verify a
//! token and hand back the owning user id.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use storyforge_core::ports::{IdentityService, PortError, PortResult};
use tracing::warn;

/// An adapter that verifies bearer tokens against the hosted identity
/// provider's REST API.
#[derive(Clone)]
pub struct HttpIdentityAdapter {
    base_url: String,
    api_key: String,
    client: Client,
}

impl HttpIdentityAdapter {
    /// Creates a new `HttpIdentityAdapter`.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl IdentityService for HttpIdentityAdapter {
    async fn verify_token(&self, token: &str) -> PortResult<String> {
        let response = self
            .client
            .post(format!("{}/tokens/verify", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({ "token": token }))
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "identity provider rejected the token");
            return Err(PortError::Unauthorized);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        body["user_id"]
            .as_str()
            .map(str::to_string)
            .ok_or(PortError::Unauthorized)
    }
}
