//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::middleware::AuthenticatedUser;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storyforge_core::domain::{UserStory, UserStoryRecord};
use storyforge_core::ports::PortError;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_user_stories_handler,
        list_user_stories_handler,
        get_user_story_handler,
        delete_user_story_handler,
    ),
    components(
        schemas(GenerateStoriesRequest, GenerateStoriesResponse, ListStoriesResponse, ErrorResponse)
    ),
    tags(
        (name = "Storyforge API", description = "API endpoints for generating and retrieving agile user stories.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The request payload for generating user stories.
#[derive(Deserialize, ToSchema)]
pub struct GenerateStoriesRequest {
    /// The free-text software idea to break down.
    pub idea: String,
}

/// The response payload sent after a successful generation, combining the
/// fresh collection with its persistence metadata.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoriesResponse {
    #[schema(value_type = Vec<Object>)]
    pub user_stories: Vec<UserStory>,
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

/// The response payload listing a user's saved story sets.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListStoriesResponse {
    #[schema(value_type = Vec<Object>)]
    pub user_stories: Vec<UserStoryRecord>,
}

/// A JSON error body.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps a port failure to its HTTP response.
///
/// Raw generation and storage failures are logged here; the client only
/// ever sees a generic message for those.
fn port_error_response(e: PortError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = match &e {
        PortError::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required".to_string()),
        PortError::NotFound(_) => (StatusCode::NOT_FOUND, "User story not found".to_string()),
        // The no-provider message is actionable for the caller, pass it through.
        PortError::NoProviderAvailable => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        PortError::GenerationFailed(reason) => {
            error!(error = %reason, "user story generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate user stories. Please try again.".to_string(),
            )
        }
        PortError::Storage(reason) => {
            error!(error = %reason, "user story persistence failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save user stories".to_string(),
            )
        }
        PortError::Unexpected(reason) => {
            error!(error = %reason, "unexpected failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            )
        }
    };
    (status, Json(ErrorResponse { error: message }))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Generate user stories from an idea and persist them.
///
/// The body must carry a non-empty string `idea`; anything else is rejected
/// before any provider is contacted.
#[utoipa::path(
    post,
    path = "/api/user-stories",
    request_body = GenerateStoriesRequest,
    responses(
        (status = 200, description = "Stories generated and saved", body = GenerateStoriesResponse),
        (status = 400, description = "Missing or empty idea", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Generation or persistence failed", body = ErrorResponse)
    ),
)]
pub async fn generate_user_stories_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let idea = body
        .get("idea")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|idea| !idea.is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Idea is required and must be a non-empty string".to_string(),
                }),
            )
        })?;

    let collection = app_state
        .generator
        .generate_user_stories(idea)
        .await
        .map_err(port_error_response)?;

    let record = app_state
        .store
        .save_user_stories(&user.0, idea, &collection)
        .await
        .map_err(port_error_response)?;

    Ok(Json(GenerateStoriesResponse {
        user_stories: record.user_stories.user_stories,
        id: record.id,
        created_at: record.created_at,
    }))
}

/// List all story sets owned by the authenticated user, oldest first.
#[utoipa::path(
    get,
    path = "/api/user-stories",
    responses(
        (status = 200, description = "The caller's saved story sets", body = ListStoriesResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Lookup failed", body = ErrorResponse)
    ),
)]
pub async fn list_user_stories_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let records = app_state
        .store
        .list_by_user(&user.0)
        .await
        .map_err(port_error_response)?;

    Ok(Json(ListStoriesResponse {
        user_stories: records,
    }))
}

/// Fetch one story set by id. Records belonging to other users are
/// indistinguishable from absent ones.
#[utoipa::path(
    get,
    path = "/api/user-stories/{id}",
    params(("id" = i64, Path, description = "The record id")),
    responses(
        (status = 200, description = "The record", body = Object),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "No such record for this user", body = ErrorResponse),
        (status = 500, description = "Lookup failed", body = ErrorResponse)
    ),
)]
pub async fn get_user_story_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let record = app_state
        .store
        .get_by_id(id, &user.0)
        .await
        .map_err(port_error_response)?
        .ok_or_else(|| port_error_response(PortError::NotFound(format!("user story {}", id))))?;

    Ok(Json(record))
}

/// Delete one story set by id, with the same ownership discipline as a fetch.
#[utoipa::path(
    delete,
    path = "/api/user-stories/{id}",
    params(("id" = i64, Path, description = "The record id")),
    responses(
        (status = 204, description = "Record removed"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "No such record for this user", body = ErrorResponse),
        (status = 500, description = "Delete failed", body = ErrorResponse)
    ),
)]
pub async fn delete_user_story_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let removed = app_state
        .store
        .delete_by_id(id, &user.0)
        .await
        .map_err(port_error_response)?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(port_error_response(PortError::NotFound(format!(
            "user story {}",
            id
        ))))
    }
}
