//! Shared domain types for the Strasia sales console.
//!
//! This crate contains the plain data shapes used across the workspace:
//! chat messages and sessions, export snapshots, session metrics,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod metrics;
