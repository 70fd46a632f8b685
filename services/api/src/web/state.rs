//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use storyforge_core::ports::{IdentityService, StoryGenerationService, UserStoryStore};

/// The shared application state, created once at startup and passed to all
/// handlers. Every field is a stateless port implementation, so sharing
/// across concurrent requests needs no locking.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStoryStore>,
    pub generator: Arc<dyn StoryGenerationService>,
    pub identity: Arc<dyn IdentityService>,
}
