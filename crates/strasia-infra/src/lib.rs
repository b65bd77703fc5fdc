//! Infrastructure layer for the Strasia sales console.
//!
//! Contains the concrete pieces the core crate abstracts over: the scripted
//! `SalesAgent`, the export file writer, config loading and data directory
//! resolution.

pub mod agent;
pub mod config;
pub mod export;
pub mod filesystem;
