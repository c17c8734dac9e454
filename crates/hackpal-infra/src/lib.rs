//! Infrastructure layer for Hackpal.
//!
//! Contains implementations of the traits defined in `hackpal-core`: SQLite
//! storage, the HTTP client for the inference collaborator, and Argon2
//! password hashing. Also loads `config.toml` from the data directory.

pub mod config;
pub mod crypto;
pub mod inference;
pub mod sqlite;
