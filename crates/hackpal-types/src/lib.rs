//! Shared domain types for Hackpal.
//!
//! This crate contains the core domain types used across the Hackpal service:
//! users, chat sessions, messages, inference requests, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod inference;
pub mod user;
