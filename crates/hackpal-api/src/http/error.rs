//! Application error type mapping service errors to HTTP status codes.
//!
//! Error bodies are `{"success": false, "message": "..."}`. Server-side
//! failures are logged in full but answered with a generic message.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use hackpal_types::error::{AccountError, ChatError};

const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Conversation service errors.
    Chat(ChatError),
    /// Account service errors.
    Account(AccountError),
    /// A request body the extractors could not decode.
    Rejected { status: StatusCode, message: String },
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        AppError::Account(e)
    }
}

/// Undecodable JSON is a validation failure (400). Body read errors such as
/// an oversized payload keep their own status.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => StatusCode::BAD_REQUEST,
            other => other.status(),
        };
        AppError::Rejected {
            status,
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Chat(ChatError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Chat(ChatError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Chat(
                ChatError::Dependency(_) | ChatError::Store(_) | ChatError::Internal(_),
            ) => server_error(),

            AppError::Account(AccountError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Account(AccountError::Conflict(msg)) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Account(e @ AccountError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, e.to_string())
            }
            AppError::Account(AccountError::Store(_) | AccountError::Internal(_)) => {
                server_error()
            }

            AppError::Rejected { status, message } => (*status, message.clone()),
        }
    }
}

fn server_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        SERVER_ERROR_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            match &self {
                AppError::Chat(e) => tracing::error!(error = %e, "Conversation request failed"),
                AppError::Account(e) => tracing::error!(error = %e, "Account request failed"),
                AppError::Rejected { message, .. } => {
                    tracing::error!(error = %message, "Request rejected")
                }
            }
        }

        (
            status,
            Json(json!({
                "success": false,
                "message": message,
            })),
        )
            .into_response()
    }
}
