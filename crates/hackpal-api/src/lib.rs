//! Hackpal application layer: REST API, application state, and CLI definitions.
//!
//! The `hackpal` binary (`src/main.rs`) parses the CLI and serves the router
//! built here; integration tests drive the same router in-process.

pub mod cli;
pub mod http;
pub mod state;
