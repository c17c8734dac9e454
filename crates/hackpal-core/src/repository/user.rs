//! UserRepository trait definition.

use hackpal_types::error::RepositoryError;
use hackpal_types::user::{NewUser, User};
use uuid::Uuid;

/// Repository trait for user persistence.
///
/// Implementations live in hackpal-infra (e.g., `SqliteUserRepository`).
pub trait UserRepository: Send + Sync {
    /// Create a user, assigning its id and timestamps.
    ///
    /// Fails with `RepositoryError::Validation` when a required field is blank
    /// and `RepositoryError::Conflict` when the email is already registered.
    fn create_user(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Get a user by id.
    fn find_user_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Get a user by (normalized) email.
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
