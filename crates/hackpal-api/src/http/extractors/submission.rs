//! Decodes a posted user turn from either JSON or multipart form data.
//!
//! JSON: `{"message": "...", "userId": "..."}`
//! Multipart: text fields `message` and `userId`, optional file field `pdf`.
//!
//! Both encodings produce the same [`MessageSubmission`]; nothing past this
//! extractor looks at the content type. Any other content type yields an
//! empty submission.

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use serde::Deserialize;

use hackpal_core::chat::service::PostMessage;
use hackpal_types::inference::Attachment;

use crate::http::error::AppError;

const MESSAGE_FIELD: &str = "message";
const USER_ID_FIELD: &str = "userId";
const PDF_FIELD: &str = "pdf";
const DEFAULT_PDF_NAME: &str = "upload.pdf";
const DEFAULT_PDF_TYPE: &str = "application/pdf";

/// A user turn as submitted over HTTP.
#[derive(Debug, Default)]
pub struct MessageSubmission {
    pub content: Option<String>,
    pub user_id: Option<String>,
    pub attachment: Option<Attachment>,
}

impl From<MessageSubmission> for PostMessage {
    fn from(submission: MessageSubmission) -> Self {
        PostMessage {
            user_id: submission.user_id,
            content: submission.content,
            attachment: submission.attachment,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonSubmission {
    message: Option<String>,
    user_id: Option<String>,
}

enum BodyKind {
    Json,
    Multipart,
    Unsupported,
}

fn body_kind(req: &Request) -> BodyKind {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        BodyKind::Json
    } else if content_type.starts_with("multipart/form-data") {
        BodyKind::Multipart
    } else {
        BodyKind::Unsupported
    }
}

impl<S> FromRequest<S> for MessageSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let Json(body) = Json::<JsonSubmission>::from_request(req, state).await?;
                Ok(MessageSubmission {
                    content: body.message,
                    user_id: body.user_id,
                    attachment: None,
                })
            }
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::bad_request(e.body_text()))?;
                read_multipart(multipart).await
            }
            // Nothing is read; the service rejects the empty submission.
            BodyKind::Unsupported => Ok(MessageSubmission::default()),
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<MessageSubmission, AppError> {
    let mut submission = MessageSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            MESSAGE_FIELD => submission.content = Some(field.text().await.map_err(multipart_error)?),
            USER_ID_FIELD => submission.user_id = Some(field.text().await.map_err(multipart_error)?),
            PDF_FIELD => {
                let file_name = field.file_name().unwrap_or(DEFAULT_PDF_NAME).to_string();
                let content_type = field.content_type().unwrap_or(DEFAULT_PDF_TYPE).to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was chosen.
                if !bytes.is_empty() {
                    submission.attachment = Some(Attachment {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    Ok(submission)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Rejected {
        status: err.status(),
        message: err.body_text(),
    }
}
