//! Chat session and message types.
//!
//! A session is one client's conversation with the sales agent: an
//! immutable timestamp-derived id plus an ordered, append-only list of
//! messages.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Format used for session ids (`20240131_142501`).
pub const SESSION_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Format used for per-message timestamps (`14:25:01`).
pub const MESSAGE_TIME_FORMAT: &str = "%H:%M:%S";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in the conversation thread.
///
/// `timestamp` is the local wall-clock time the message was created,
/// formatted as [`MESSAGE_TIME_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, at: DateTime<Local>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: at.format(MESSAGE_TIME_FORMAT).to_string(),
        }
    }

    pub fn assistant(content: impl Into<String>, at: DateTime<Local>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: at.format(MESSAGE_TIME_FORMAT).to_string(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}

/// Identifier of a chat session, derived from the session start time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Build a session id from the moment the session started.
    pub fn from_start_time(at: DateTime<Local>) -> Self {
        Self(at.format(SESSION_ID_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One client's conversation state.
///
/// The id never changes for the lifetime of the session, including across
/// [`ChatSession::clear`]. Messages are only ever appended or cleared
/// wholesale.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: SessionId,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
