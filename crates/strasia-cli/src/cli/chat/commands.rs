//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and give the console its session controls:
//! reset, presets, export and the status panels.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the conversation and the agent's memory.
    Clear,
    /// Clear the terminal screen only.
    ClearScreen,
    /// Exit the chat session.
    Exit,
    /// Show session status (knowledge base, id, counters).
    Status,
    /// Show the knowledge-base info panel.
    KnowledgeBase,
    /// List preset scenarios.
    Presets,
    /// Queue a preset scenario and send it.
    Preset(String),
    /// Show the conversation analysis.
    Metrics,
    /// Show conversation history for this session.
    History,
    /// Write the conversation to an export file.
    Export,
    /// Unknown or malformed command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts
        .get(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/reset" => Some(ChatCommand::Clear),
        "/cls" => Some(ChatCommand::ClearScreen),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/status" => Some(ChatCommand::Status),
        "/kb" => Some(ChatCommand::KnowledgeBase),
        "/presets" => Some(ChatCommand::Presets),
        "/preset" | "/p" => match arg {
            Some(selector) => Some(ChatCommand::Preset(selector)),
            None => Some(ChatCommand::Unknown(
                "/preset requires a scenario (business, cost, compare, or 1-3)".to_string(),
            )),
        },
        "/metrics" | "/stats" => Some(ChatCommand::Metrics),
        "/history" => Some(ChatCommand::History),
        "/export" | "/save" => Some(ChatCommand::Export),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the conversation and agent memory"),
        ("/cls", "Clear the screen"),
        ("/status", "Show session status"),
        ("/kb", "Show knowledge base info"),
        ("/presets", "List test scenarios"),
        ("/preset <n>", "Send a test scenario (name or 1-3)"),
        ("/metrics", "Show conversation analysis"),
        ("/history", "Show conversation history"),
        ("/export", "Save the conversation as JSON"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, description) in rows {
        println!("  {:<14}{}", style(cmd).cyan(), description);
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
