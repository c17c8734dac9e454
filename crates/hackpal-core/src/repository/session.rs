//! SessionRepository trait definition.
//!
//! Owner-scoped methods take both the session id and the caller's user id and
//! return `None` whether the session is absent or belongs to someone else.

use hackpal_types::chat::{Session, SessionPatch};
use hackpal_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session persistence.
pub trait SessionRepository: Send + Sync {
    /// Create a session for `user_id`. A missing title becomes "New Chat".
    fn create_session(
        &self,
        user_id: &Uuid,
        title: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Session, RepositoryError>> + Send;

    /// Get a session by id regardless of owner.
    fn find_session(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Get a session by id only if it is owned by `user_id`.
    fn find_session_for_owner(
        &self,
        id: &Uuid,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Apply `patch` to a session owned by `user_id` and bump `updated_at`.
    ///
    /// Returns the updated session, or `None` if no session matched.
    fn update_session(
        &self,
        id: &Uuid,
        user_id: &Uuid,
        patch: &SessionPatch,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Bump `updated_at` after a message was appended. Sets the PDF flag when
    /// `has_pdf` is true; never clears it.
    fn touch_session(
        &self,
        id: &Uuid,
        has_pdf: bool,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List a user's sessions, most recently updated first.
    fn list_sessions_by_user(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, RepositoryError>> + Send;
}
