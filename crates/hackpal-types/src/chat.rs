//! Chat session and message types for Hackpal.
//!
//! These types model conversations between a user and the assistant:
//! sessions (threads) and the messages exchanged within them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Title given to sessions created without one.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Status given to freshly created sessions.
pub const DEFAULT_SESSION_STATUS: &str = "active";

/// Content stored for a user turn that carried only an attachment.
pub const ATTACHMENT_ONLY_PLACEHOLDER: &str = "PDF uploaded";

/// Maximum number of characters kept in a session preview.
pub const PREVIEW_CHARS: usize = 100;

/// Author of a chat message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Optional flags describing what a session carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    /// Set once a PDF has been posted into the session.
    pub has_pdf: bool,
}

/// A conversation thread owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    /// Free-form lifecycle marker (e.g. "active", "archived").
    pub status: String,
    pub metadata: SessionMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a session by its owner.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    pub title: Option<String>,
    pub status: Option<String>,
}

impl SessionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none()
    }
}

/// A session as shown in listings, with a short excerpt of its first user turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    #[serde(flatten)]
    pub session: Session,
    pub preview: String,
}

impl SessionSummary {
    /// Build a summary, truncating `first_user_message` to [`PREVIEW_CHARS`].
    pub fn new(session: Session, first_user_message: Option<&str>) -> Self {
        let preview = first_user_message
            .map(|content| content.chars().take(PREVIEW_CHARS).collect())
            .unwrap_or_default();
        Self { session, preview }
    }
}

/// A single turn within a session.
///
/// Messages are ordered by `created_at` within a session and are never
/// updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
