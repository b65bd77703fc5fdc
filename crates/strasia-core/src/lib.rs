//! Chat session logic and the sales agent contract.
//!
//! This crate defines the `SalesAgent` port that agent implementations
//! satisfy, and the `ChatController` that owns a session and routes user
//! input to the agent. It never depends on `strasia-infra` or any
//! filesystem/terminal crate.

pub mod agent;
pub mod chat;
pub mod clock;
pub mod event;
