//! Change events published by the chat controller.
//!
//! The rendering layer subscribes to these instead of polling session state.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// How a submitted turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcomeKind {
    /// The agent replied and the reply was appended.
    Rendered,
    /// The agent failed and an error message was appended instead.
    Errored,
}

/// A state change in a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A message was appended to the thread.
    MessageAppended { message: ChatMessage },
    /// The agent has been invoked and its reply is pending.
    AgentThinking,
    /// The pending agent call completed.
    TurnFinished { outcome: TurnOutcomeKind },
    /// The thread and the agent's memory were reset.
    Cleared,
}
