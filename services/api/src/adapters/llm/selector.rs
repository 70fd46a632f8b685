//! services/api/src/adapters/llm/selector.rs
//!
//! Selects a usable LLM backend from the configured candidates.

use std::sync::Arc;

use storyforge_core::ports::CompletionModel;
use tracing::{debug, warn};

use crate::config::ProviderSettings;

use super::{AnthropicModel, GeminiModel, OpenAiModel};

/// The minimal prompt used to test whether a backend is alive before
/// committing to it for the real request.
const PROBE_PROMPT: &str = "Test";

/// Tries a fixed, ordered list of LLM backends and hands out the first one
/// that answers a liveness probe.
///
/// The order is Gemini, then Anthropic, then OpenAI: a cost/quota
/// ranking, not a capability one. Probing costs one wasted round trip per
/// unhealthy candidate per request, which is acceptable for a low-QPS
/// interactive feature.
pub struct ProviderSelector {
    backends: Vec<Arc<dyn CompletionModel>>,
}

impl ProviderSelector {
    /// Builds a selector over an explicit backend list, in priority order.
    pub fn new(backends: Vec<Arc<dyn CompletionModel>>) -> Self {
        Self { backends }
    }

    /// Instantiates a client for every backend whose credential is present
    /// in `settings`. Backends without credentials are skipped entirely and
    /// will never be probed.
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let mut backends: Vec<Arc<dyn CompletionModel>> = Vec::new();

        if let Some(gemini) = &settings.gemini {
            backends.push(Arc::new(GeminiModel::new(
                gemini.api_key.clone(),
                gemini.model.clone(),
            )));
        }
        if let Some(anthropic) = &settings.anthropic {
            backends.push(Arc::new(AnthropicModel::new(
                anthropic.api_key.clone(),
                anthropic.model.clone(),
            )));
        }
        if let Some(openai) = &settings.openai {
            backends.push(Arc::new(OpenAiModel::new(
                &openai.api_key,
                openai.model.clone(),
            )));
        }

        Self::new(backends)
    }

    /// The names of the configured backends, in probe order.
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Probes the configured backends in priority order and returns the
    /// first one that responds, or `None` when every candidate fails (or
    /// none are configured).
    ///
    /// Probe failures are swallowed by design: the cause is logged and the
    /// next candidate is tried, regardless of whether the failure was an
    /// auth error, a timeout, or a quota problem.
    pub async fn select(&self) -> Option<Arc<dyn CompletionModel>> {
        for backend in &self.backends {
            match backend.complete(PROBE_PROMPT).await {
                Ok(_) => {
                    debug!(backend = backend.name(), "liveness probe succeeded");
                    return Some(Arc::clone(backend));
                }
                Err(e) => {
                    warn!(
                        backend = backend.name(),
                        error = %e,
                        "liveness probe failed, trying next backend"
                    );
                }
            }
        }
        None
    }
}
