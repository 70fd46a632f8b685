//! crates/storyforge_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like databases,
//! LLM backends, or the identity provider.

use async_trait::async_trait;

use crate::domain::{UserStoryCollection, UserStoryRecord};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The error type for all port operations.
///
/// The variants are deliberately coarse: each one corresponds to a failure
/// the API boundary must be able to tell apart when mapping to an HTTP
/// response.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    /// Every configured LLM backend failed its liveness probe, or none are
    /// configured at all.
    #[error("No available LLM providers. Please check your API keys.")]
    NoProviderAvailable,
    /// A backend responded but its output failed JSON parsing or schema
    /// validation, or the call itself errored after selection.
    #[error("Failed to generate user stories: {0}")]
    GenerationFailed(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A single LLM backend. One method covers both uses: the liveness probe
/// (a trivial prompt) and the real generation call. Implementations hold
/// only configuration and are safe to share between requests.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Stable backend name, used in logs.
    fn name(&self) -> &str;

    /// Sends a text prompt and returns the model's raw text response.
    async fn complete(&self, prompt: &str) -> PortResult<String>;
}

/// Turns a free-text idea into a validated collection of user stories.
#[async_trait]
pub trait StoryGenerationService: Send + Sync {
    /// `idea` must already be trimmed and non-empty; emptiness is rejected
    /// at the API boundary before this is called.
    async fn generate_user_stories(&self, idea: &str) -> PortResult<UserStoryCollection>;
}

/// Persistence gateway for generated story sets, scoped by owner.
#[async_trait]
pub trait UserStoryStore: Send + Sync {
    /// Atomic single-row insert. The store assigns `id`, `created_at` and
    /// `updated_at`.
    async fn save_user_stories(
        &self,
        user_id: &str,
        original_idea: &str,
        stories: &UserStoryCollection,
    ) -> PortResult<UserStoryRecord>;

    /// All records owned by `user_id`, ordered by creation time ascending.
    async fn list_by_user(&self, user_id: &str) -> PortResult<Vec<UserStoryRecord>>;

    /// Fetches one record, filtering by both id AND owner. The ownership
    /// check is part of the query, not a separate step.
    async fn get_by_id(&self, id: i64, user_id: &str) -> PortResult<Option<UserStoryRecord>>;

    /// Deletes one record with the same dual-filter discipline. Returns
    /// whether a row was actually removed.
    async fn delete_by_id(&self, id: i64, user_id: &str) -> PortResult<bool>;
}

/// The external identity provider, reduced to the one question this
/// service ever asks it.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Verifies a bearer token and returns the id of the user it belongs
    /// to, or `PortError::Unauthorized`.
    async fn verify_token(&self, token: &str) -> PortResult<String>;
}
