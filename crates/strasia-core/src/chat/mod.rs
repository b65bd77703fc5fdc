//! Chat session control.
//!
//! `ChatController` owns a single session and its agent; `SessionHandle`
//! shares a controller while guaranteeing one in-flight agent call.

pub mod controller;
pub mod handle;
pub mod metrics;
pub mod preset;
pub mod view;
