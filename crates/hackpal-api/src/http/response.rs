//! Success response bodies.
//!
//! Every successful response is an object with `"success": true` alongside
//! the payload's own fields:
//! ```json
//! { "success": true, "session": { ... } }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use hackpal_types::chat::{Message, Session, SessionSummary};
use hackpal_types::user::User;

/// `{ "success": true, ...payload }` with a status code.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    payload: T,
}

#[derive(Serialize)]
struct Body<'a, T: Serialize> {
    success: bool,
    #[serde(flatten)]
    payload: &'a T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            status: StatusCode::OK,
            payload,
        }
    }

    pub fn created(payload: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            payload,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Body {
            success: true,
            payload: &self.payload,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct SessionPayload {
    pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct SessionListPayload {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize)]
pub struct MessageListPayload {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct StatusMessagePayload {
    pub message: &'static str,
}

/// Public view of a user returned by signup and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserView {
    pub fn with_email(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: Some(user.email),
        }
    }

    pub fn without_email(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: UserView,
}
