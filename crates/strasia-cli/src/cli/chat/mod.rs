//! Interactive chat console.
//!
//! Implements the chat loop: thinking spinner, markdown rendering of agent
//! replies, welcome banner, slash commands and the status panels.
//! Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod panels;
pub mod renderer;
