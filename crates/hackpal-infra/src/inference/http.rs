//! HttpInferenceClient -- concrete [`InferenceClient`] that posts each user
//! turn to the inference collaborator as `multipart/form-data`.
//!
//! Form fields: `session_id`, `message`, and, when present, a `pdf` file part.
//! The collaborator answers `{"response": "...", "session_id": "..."}`.

use std::time::Duration;

use hackpal_core::inference::client::InferenceClient;
use hackpal_types::error::InferenceError;
use hackpal_types::inference::InferenceRequest;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// Largest slice of an error body kept in `InferenceError::Status`.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Deserialize)]
struct InferenceReply {
    response: Option<String>,
    #[allow(dead_code)]
    session_id: Option<String>,
}

/// Inference collaborator reached over HTTP.
pub struct HttpInferenceClient {
    client: reqwest::Client,
    url: String,
    timeout_secs: u64,
}

impl HttpInferenceClient {
    /// Build a client for `url` whose requests give up after `timeout_secs`.
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| InferenceError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_form(request: &InferenceRequest) -> Result<Form, InferenceError> {
        let mut form = Form::new()
            .text("session_id", request.session_id.to_string())
            .text("message", request.message.clone());

        if let Some(attachment) = &request.attachment {
            let part = Part::bytes(attachment.bytes.clone())
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.content_type)
                .map_err(|e| {
                    InferenceError::Transport(format!("invalid attachment content type: {e}"))
                })?;
            form = form.part("pdf", part);
        }

        Ok(form)
    }

    fn map_send_error(&self, err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout(self.timeout_secs)
        } else {
            InferenceError::Transport(format!("HTTP request failed: {err}"))
        }
    }
}

impl InferenceClient for HttpInferenceClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn reply(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        let form = Self::build_form(request)?;

        tracing::debug!(
            session_id = %request.session_id,
            has_attachment = request.attachment.is_some(),
            url = %self.url,
            "Forwarding turn to inference collaborator"
        );

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        parse_reply(&body)
    }
}

/// Extract the reply text from a collaborator response body.
pub fn parse_reply(body: &str) -> Result<String, InferenceError> {
    let reply: InferenceReply = serde_json::from_str(body)
        .map_err(|e| InferenceError::InvalidResponse(format!("failed to parse response: {e}")))?;

    reply
        .response
        .ok_or_else(|| InferenceError::InvalidResponse("missing 'response' field".to_string()))
}
