//! Prompt line for the chat loop, backed by `rustyline_async`.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// What the user did at the prompt.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// A non-blank line, trimmed.
    Message(String),
    /// Enter on an empty or whitespace-only line.
    Blank,
    /// Ctrl+D, or the terminal went away.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

impl InputEvent {
    fn from_line(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            InputEvent::Blank
        } else {
            InputEvent::Message(trimmed.to_string())
        }
    }
}

/// The `You >` prompt. Submitted lines are kept in readline history.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Returns the input handle plus a writer that prints above the prompt.
    pub fn new() -> Result<(Self, SharedWriter), ReadlineError> {
        let prompt = format!("  {} ", style("You >").green().bold());
        let (rl, writer) = Readline::new(prompt)?;
        Ok((Self { rl }, writer))
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let event = InputEvent::from_line(&line);
                if let InputEvent::Message(text) = &event {
                    self.rl.add_history_entry(text.clone());
                }
                event
            }
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Ok(ReadlineEvent::Eof) | Err(_) => InputEvent::Eof,
        }
    }

    /// Clear the terminal screen (`/cls`).
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}
