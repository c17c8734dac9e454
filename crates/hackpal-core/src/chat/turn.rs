//! State machine for a single user turn.
//!
//! A turn moves through
//! `UserMessagePersisted -> InferenceRequested -> AssistantMessagePersisted | InferenceFailed`.
//! The user message is durable from the first state onward; a failed
//! inference call leaves it in place with no compensating write.

use std::fmt;

use hackpal_types::chat::Message;
use hackpal_types::error::ChatError;

/// Progress of one `post_message` call.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnState {
    UserMessagePersisted(Message),
    InferenceRequested(Message),
    AssistantMessagePersisted { user: Message, assistant: Message },
    InferenceFailed { user: Message, reason: String },
}

/// The two messages written by a successful turn, in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTurn {
    pub user: Message,
    pub assistant: Message,
}

impl CompletedTurn {
    pub fn into_messages(self) -> Vec<Message> {
        vec![self.user, self.assistant]
    }
}

impl TurnState {
    /// Start a turn once the user message has been written.
    pub fn begin(user: Message) -> Self {
        TurnState::UserMessagePersisted(user)
    }

    pub fn phase(&self) -> &'static str {
        match self {
            TurnState::UserMessagePersisted(_) => "user_message_persisted",
            TurnState::InferenceRequested(_) => "inference_requested",
            TurnState::AssistantMessagePersisted { .. } => "assistant_message_persisted",
            TurnState::InferenceFailed { .. } => "inference_failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TurnState::AssistantMessagePersisted { .. } | TurnState::InferenceFailed { .. }
        )
    }

    /// The user message that opened this turn. Present in every state.
    pub fn user_message(&self) -> &Message {
        match self {
            TurnState::UserMessagePersisted(user)
            | TurnState::InferenceRequested(user)
            | TurnState::AssistantMessagePersisted { user, .. }
            | TurnState::InferenceFailed { user, .. } => user,
        }
    }

    pub fn request_inference(self) -> Result<Self, ChatError> {
        match self {
            TurnState::UserMessagePersisted(user) => Ok(TurnState::InferenceRequested(user)),
            other => Err(other.invalid("request_inference")),
        }
    }

    pub fn record_reply(self, assistant: Message) -> Result<Self, ChatError> {
        match self {
            TurnState::InferenceRequested(user) => {
                Ok(TurnState::AssistantMessagePersisted { user, assistant })
            }
            other => Err(other.invalid("record_reply")),
        }
    }

    pub fn record_failure(self, reason: impl Into<String>) -> Result<Self, ChatError> {
        match self {
            TurnState::InferenceRequested(user) => Ok(TurnState::InferenceFailed {
                user,
                reason: reason.into(),
            }),
            other => Err(other.invalid("record_failure")),
        }
    }

    /// Both messages, if the turn reached `AssistantMessagePersisted`.
    pub fn into_completed(self) -> Option<CompletedTurn> {
        match self {
            TurnState::AssistantMessagePersisted { user, assistant } => {
                Some(CompletedTurn { user, assistant })
            }
            _ => None,
        }
    }

    fn invalid(&self, transition: &str) -> ChatError {
        ChatError::Internal(format!("cannot {transition} from {}", self.phase()))
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phase())
    }
}
