//! CredentialHasher trait for password storage.
//!
//! Defined in hackpal-core so the account service can hash passwords without
//! coupling to a specific algorithm. The `Argon2CredentialHasher` adapter
//! lives in hackpal-infra.

use hackpal_types::error::AccountError;

/// Abstraction over one-way password hashing.
pub trait CredentialHasher: Send + Sync {
    /// Produce a self-describing hash string (salt included) for storage.
    fn hash_password(&self, password: &str) -> Result<String, AccountError>;

    /// Check `password` against a stored hash. Malformed hashes never verify.
    fn verify_password(&self, password: &str, hash: &str) -> bool;
}
