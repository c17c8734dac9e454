//! Inference collaborator abstraction.
//!
//! The conversation service hands each user turn to an `InferenceClient` and
//! stores whatever text comes back as the assistant reply.

pub mod box_client;
pub mod client;
