//! Message HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/sessions/{id}/messages - Full history, oldest first
//! - POST /api/sessions/{id}/messages - Post a user turn (JSON or multipart)
//!   and return the stored user and assistant messages

use axum::extract::{Path, State};

use crate::http::error::AppError;
use crate::http::extractors::submission::MessageSubmission;
use crate::http::response::{ApiResponse, MessageListPayload};
use crate::state::AppState;

/// GET /api/sessions/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<MessageListPayload>, AppError> {
    let messages = state.conversations.list_messages(&id).await?;
    Ok(ApiResponse::ok(MessageListPayload { messages }))
}

/// POST /api/sessions/{id}/messages
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    submission: MessageSubmission,
) -> Result<ApiResponse<MessageListPayload>, AppError> {
    let turn = state
        .conversations
        .post_message(&id, submission.into())
        .await?;
    Ok(ApiResponse::ok(MessageListPayload {
        messages: turn.into_messages(),
    }))
}
