//! Account service: signup, login, and logout.
//!
//! Credentials are checked here; there is no server-side session or token.
//! Callers identify themselves on later requests by the user id returned at
//! login.

use hackpal_types::error::{AccountError, RepositoryError};
use hackpal_types::user::{NewUser, User, normalize_email};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::repository::user::UserRepository;
use crate::service::hash::CredentialHasher;

/// Shortest password accepted at signup, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

pub const LOGOUT_MESSAGE: &str = "Logout successful";

/// Registers users and checks their credentials.
pub struct AccountService<U: UserRepository, H: CredentialHasher> {
    user_repo: U,
    hasher: H,
}

impl<U: UserRepository, H: CredentialHasher> AccountService<U, H> {
    pub fn new(user_repo: U, hasher: H) -> Self {
        Self { user_repo, hasher }
    }

    /// Register a new user. Emails are trimmed and lowercased before storage.
    pub async fn signup(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        password: Option<&SecretString>,
    ) -> Result<User, AccountError> {
        let username = username.map(str::trim).unwrap_or_default();
        let email = email.map(normalize_email).unwrap_or_default();
        let password = password.map(|p| p.expose_secret()).unwrap_or_default();

        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AccountError::Validation(
                "Username, email, and password are required".into(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AccountError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        let new_user = NewUser {
            username: username.to_string(),
            email,
            password_hash: self.hasher.hash_password(password)?,
        };

        let user = match self.user_repo.create_user(&new_user).await {
            Ok(user) => user,
            Err(RepositoryError::Conflict(_)) => {
                return Err(AccountError::Conflict("Email already registered".into()));
            }
            Err(RepositoryError::Validation(msg)) => return Err(AccountError::Validation(msg)),
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password fail identically.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&SecretString>,
    ) -> Result<User, AccountError> {
        let email = email.map(normalize_email).unwrap_or_default();
        let password = password.map(|p| p.expose_secret()).unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::Validation("Email and password are required".into()));
        }

        let user = self
            .user_repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AccountError::Unauthorized)?;

        if !self.hasher.verify_password(password, &user.password_hash) {
            return Err(AccountError::Unauthorized);
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Nothing is held server-side, so logout only acknowledges.
    pub fn logout(&self) -> &'static str {
        LOGOUT_MESSAGE
    }
}
