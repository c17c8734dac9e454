//! BoxInferenceClient -- object-safe dynamic dispatch wrapper for InferenceClient.
//!
//! 1. Define an object-safe `InferenceClientDyn` trait with boxed futures
//! 2. Blanket-impl `InferenceClientDyn` for all `T: InferenceClient`
//! 3. `BoxInferenceClient` wraps `Box<dyn InferenceClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use hackpal_types::error::InferenceError;
use hackpal_types::inference::InferenceRequest;

use super::client::InferenceClient;

/// Object-safe version of [`InferenceClient`] with boxed futures.
pub trait InferenceClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn reply_boxed<'a>(
        &'a self,
        request: &'a InferenceRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, InferenceError>> + Send + 'a>>;
}

impl<T: InferenceClient> InferenceClientDyn for T {
    fn name(&self) -> &str {
        InferenceClient::name(self)
    }

    fn reply_boxed<'a>(
        &'a self,
        request: &'a InferenceRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, InferenceError>> + Send + 'a>> {
        Box::pin(self.reply(request))
    }
}

/// Type-erased inference client.
///
/// Lets the application state pin a single concrete service type while the
/// server wires in `HttpInferenceClient` and tests wire in a stub.
pub struct BoxInferenceClient {
    inner: Box<dyn InferenceClientDyn + Send + Sync>,
}

impl BoxInferenceClient {
    /// Wrap a concrete `InferenceClient` in a type-erased box.
    pub fn new<T: InferenceClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }
}

impl InferenceClient for BoxInferenceClient {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn reply(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        self.inner.reply_boxed(request).await
    }
}
