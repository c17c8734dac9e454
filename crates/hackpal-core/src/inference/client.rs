//! InferenceClient trait definition.

use hackpal_types::error::InferenceError;
use hackpal_types::inference::InferenceRequest;

/// Trait for the external service that generates assistant replies.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// The HTTP implementation lives in hackpal-infra (`HttpInferenceClient`).
/// Implementations must not retry; a failed call is reported as-is.
pub trait InferenceClient: Send + Sync {
    /// Short name used in logs (e.g., "http").
    fn name(&self) -> &str;

    /// Send one user turn and return the reply text.
    fn reply(
        &self,
        request: &InferenceRequest,
    ) -> impl std::future::Future<Output = Result<String, InferenceError>> + Send;
}
