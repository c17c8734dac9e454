//! Clients for the external inference collaborator.

pub mod http;
