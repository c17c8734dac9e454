//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/sessions             - List a user's sessions with previews
//! - POST /api/sessions/newsession  - Create a session
//! - GET  /api/sessions/{id}        - Get a single session
//! - PUT  /api/sessions/{id}        - Update title and/or status (owner only)

use axum::extract::{Path, State};
use serde::Deserialize;

use hackpal_types::chat::SessionPatch;

use crate::http::error::AppError;
use crate::http::extractors::json::JsonBody;
use crate::http::response::{ApiResponse, SessionListPayload, SessionPayload};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsBody {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionBody {
    pub user_id: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionBody {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
}

/// POST /api/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ListSessionsBody>,
) -> Result<ApiResponse<SessionListPayload>, AppError> {
    let sessions = state
        .conversations
        .list_sessions(body.user_id.as_deref())
        .await?;
    Ok(ApiResponse::ok(SessionListPayload { sessions }))
}

/// POST /api/sessions/newsession
pub async fn create_session(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewSessionBody>,
) -> Result<ApiResponse<SessionPayload>, AppError> {
    let session = state
        .conversations
        .create_session(body.user_id.as_deref(), body.title.as_deref())
        .await?;
    Ok(ApiResponse::created(SessionPayload { session }))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SessionPayload>, AppError> {
    let session = state.conversations.get_session(&id).await?;
    Ok(ApiResponse::ok(SessionPayload { session }))
}

/// PUT /api/sessions/{id}
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateSessionBody>,
) -> Result<ApiResponse<SessionPayload>, AppError> {
    let patch = SessionPatch {
        title: body.title,
        status: body.status,
    };
    let session = state
        .conversations
        .update_session(&id, body.user_id.as_deref(), patch)
        .await?;
    Ok(ApiResponse::ok(SessionPayload { session }))
}
