//! Business logic and repository trait definitions for Hackpal.
//!
//! This crate defines the "ports" (repository, inference, and hashing traits)
//! that the infrastructure layer implements. It depends only on
//! `hackpal-types` -- never on `hackpal-infra` or any database/IO crate.

pub mod chat;
pub mod inference;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
