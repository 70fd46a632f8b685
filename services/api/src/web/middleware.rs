//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use std::sync::Arc;
use tracing::warn;

use crate::web::rest::ErrorResponse;
use crate::web::state::AppState;

/// The authenticated caller, inserted into request extensions by
/// [`require_auth`] for handlers to use.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub String);

/// Middleware that verifies the bearer token through the identity port and
/// extracts the user id.
///
/// If valid, inserts an [`AuthenticatedUser`] into request extensions.
/// If invalid or missing, returns 401 Unauthorized before the handler runs.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    // 1. Extract the bearer token from the Authorization header.
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;

    // 2. Verify the token with the identity provider, get the user id.
    let user_id = state.identity.verify_token(token).await.map_err(|e| {
        warn!(error = %e, "token verification failed");
        unauthorized()
    })?;

    // 3. Insert the caller into request extensions.
    req.extensions_mut().insert(AuthenticatedUser(user_id));

    // 4. Continue to the handler.
    Ok(next.run(req).await)
}

fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Authentication required".to_string(),
        }),
    )
}
