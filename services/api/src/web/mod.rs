pub mod middleware;
pub mod rest;
pub mod state;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

pub use middleware::{require_auth, AuthenticatedUser};
pub use rest::{
    delete_user_story_handler, generate_user_stories_handler, get_user_story_handler,
    list_user_stories_handler,
};
use state::AppState;

/// Builds the API router. Every route requires an authenticated caller;
/// the binary layers CORS and Swagger UI on top of this.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/user-stories",
            post(generate_user_stories_handler).get(list_user_stories_handler),
        )
        .route(
            "/api/user-stories/{id}",
            get(get_user_story_handler).delete(delete_user_story_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ))
        .with_state(app_state)
}
