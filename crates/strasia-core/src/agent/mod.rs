//! Sales agent contract.
//!
//! The agent is an external collaborator: it turns user text into a reply
//! using its own prompt construction, knowledge retrieval and model calls.
//! This module only defines how the controller talks to it.

pub mod box_agent;
pub mod provider;

#[cfg(test)]
pub(crate) mod stub;
