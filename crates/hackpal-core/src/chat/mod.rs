//! Conversation orchestration: sessions, messages, and the per-turn state machine.

pub mod service;
pub mod turn;
