//! MessageRepository trait definition.

use hackpal_types::chat::{Message, MessageRole};
use hackpal_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat message persistence.
///
/// Messages are append-only: there is no update or delete.
pub trait MessageRepository: Send + Sync {
    /// Append a message to a session, assigning its id and timestamp.
    fn create_message(
        &self,
        session_id: &Uuid,
        role: MessageRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// Get every message in a session, ordered by created_at ASC.
    fn list_messages_by_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Get the earliest `user` message of a session.
    fn find_first_user_message(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;
}
