use thiserror::Error;

/// Errors from repository operations (used by trait definitions in hackpal-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Errors from the external inference collaborator.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference request timed out after {0}s")]
    Timeout(u64),

    #[error("inference transport error: {0}")]
    Transport(String),

    #[error("inference service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid inference response: {0}")]
    InvalidResponse(String),
}

/// Errors surfaced by the conversation service.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing or malformed required input.
    #[error("{0}")]
    Validation(String),

    /// Referenced entity is absent, or is not owned by the caller.
    #[error("{0}")]
    NotFound(String),

    /// The inference collaborator failed or timed out.
    #[error("inference failed: {0}")]
    Dependency(#[from] InferenceError),

    /// Underlying persistence failure.
    #[error("storage error: {0}")]
    Store(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors surfaced by the account service.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    /// Unknown email and wrong password share this variant.
    #[error("invalid email or password")]
    Unauthorized,

    #[error("storage error: {0}")]
    Store(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}
