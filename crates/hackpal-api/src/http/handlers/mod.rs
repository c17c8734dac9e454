//! Route handlers, one module per resource.

pub mod message;
pub mod session;
pub mod user;
