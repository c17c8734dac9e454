//! Custom request extractors.

pub mod json;
pub mod submission;
