//! Conversation export snapshot.
//!
//! The export is a one-shot JSON artifact of the current thread. It is the
//! only way a session outlives its process.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatSession};

/// ISO-8601 local timestamp with microseconds (`2024-01-31T14:25:01.123456`).
pub const EXPORT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Serialized snapshot of a session at the moment of export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationExport {
    pub session_id: String,
    pub timestamp: String,
    pub messages: Vec<ChatMessage>,
}

impl ConversationExport {
    /// Capture the session's current messages.
    pub fn snapshot(session: &ChatSession, at: DateTime<Local>) -> Self {
        Self {
            session_id: session.id().to_string(),
            timestamp: at.format(EXPORT_TIME_FORMAT).to_string(),
            messages: session.messages().to_vec(),
        }
    }

    /// File name for the exported artifact: `conversation_<session_id>.json`.
    pub fn file_name(&self) -> String {
        format!("conversation_{}.json", self.session_id)
    }

    /// Pretty-printed JSON body of the export file.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
