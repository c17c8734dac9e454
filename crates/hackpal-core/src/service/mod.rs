//! Account-level services.

pub mod account;
pub mod hash;
