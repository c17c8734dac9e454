//! HTTP/REST API layer for Hackpal.
//!
//! Axum routes under `/api/`. Bodies are camelCase JSON (or multipart for
//! message posts) and every response carries a `success` flag.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
