//! Request types exchanged with the inference collaborator.

use uuid::Uuid;

/// A file forwarded alongside a user turn.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One user turn sent to the inference collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub session_id: Uuid,
    /// Raw text typed by the user; empty when only an attachment was sent.
    pub message: String,
    pub attachment: Option<Attachment>,
}
