//! Repository trait definitions (ports) for the three persisted entities.
//!
//! Each trait uses native async fn in traits (RPITIT, Rust 2024 edition).
//! Implementations live in hackpal-infra.

pub mod message;
pub mod session;
pub mod user;
