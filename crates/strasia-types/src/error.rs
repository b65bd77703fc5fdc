use thiserror::Error;

/// Errors raised by a sales agent collaborator.
///
/// The display string is the human-readable message shown to the user
/// after an `Error: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("{0}")]
    Generation(String),

    #[error("agent unavailable: {0}")]
    Unavailable(String),

    #[error("agent initialization failed: {0}")]
    Init(String),
}

/// Errors from chat session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("an agent call is already in progress")]
    Busy,
}

/// Errors from writing a conversation export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize conversation: {0}")]
    Serialize(String),

    #[error("failed to write export file: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialize(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}
