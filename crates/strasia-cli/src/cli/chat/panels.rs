//! Status panels drawn on demand: session status, knowledge-base info,
//! preset list, conversation analysis and history.

use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use strasia_core::chat::preset::PRESETS;
use strasia_core::chat::view::SidebarView;
use strasia_types::chat::ChatMessage;
use strasia_types::metrics::SessionMetrics;

pub fn print_status(view: &SidebarView) {
    println!();
    println!("  {}", style("── Agent Status ──").dim());
    if view.knowledge_base {
        println!("  {}", style(view.knowledge_base_label()).green());
    } else {
        println!("  {}", style(view.knowledge_base_label()).yellow());
    }
    println!();
    println!("  {}", style("── Session Info ──").dim());
    println!("  Session ID: {}", style(&view.session_id).bold());
    println!("  Messages:   {}", view.message_count);
    print_analysis(&view.metrics);
}

pub fn print_knowledge_base(view: &SidebarView) {
    println!();
    println!("  {}", style("── Knowledge Base Info ──").dim());
    for line in view.knowledge_base_info() {
        println!("  {line}");
    }
    println!();
}

/// Table of the preset test scenarios.
pub fn presets_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Key").fg(Color::White),
        Cell::new("Scenario").fg(Color::White),
        Cell::new("Prompt").fg(Color::White),
    ]);
    for (i, preset) in PRESETS.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            Cell::new(preset.key).fg(Color::Cyan),
            Cell::new(preset.label),
            Cell::new(preset.prompt).fg(Color::DarkGrey),
        ]);
    }
    table
}

pub fn print_presets() {
    println!();
    println!("  {}", style("Quick Test Scenarios").bold());
    println!();
    println!("{}", presets_table());
    println!();
    println!(
        "  {}",
        style("Send one with /preset <key or number>").dim()
    );
    println!();
}

pub fn print_analysis(metrics: &SessionMetrics) {
    let booking = if metrics.booking_offered {
        style(metrics.booking_label()).green()
    } else {
        style(metrics.booking_label()).dim()
    };
    println!();
    println!("  {}", style("── Conversation Analysis ──").dim());
    println!("  User Messages:   {}", style(metrics.user_messages).bold());
    println!("  Agent Responses: {}", style(metrics.assistant_messages).bold());
    println!("  Booking Offered: {booking}");
    println!();
}

/// Compact analysis printed after each exchange.
pub fn analysis_line(metrics: &SessionMetrics) -> String {
    format!(
        "User Messages: {} | Agent Responses: {} | Booking Offered: {}",
        metrics.user_messages,
        metrics.assistant_messages,
        metrics.booking_label()
    )
}

pub fn print_analysis_line(metrics: &SessionMetrics) {
    println!("  {}", style(analysis_line(metrics)).dim());
    println!();
}

/// One-line preview of a message, cut at `max` characters.
pub fn preview(content: &str, max: usize) -> String {
    let single_line = content.replace('\n', " ");
    if single_line.chars().count() > max {
        let cut: String = single_line.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        single_line
    }
}

pub fn print_history(messages: &[ChatMessage]) {
    println!();
    if messages.is_empty() {
        println!("  {}", style("No messages yet.").dim());
        println!();
        return;
    }
    for message in messages {
        let label = if message.is_user() {
            style("You").green().bold()
        } else {
            style("Agent").cyan().bold()
        };
        println!(
            "  {} {} {}",
            style(&message.timestamp).dim(),
            label,
            preview(&message.content, 100)
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("line one\nline two", 100), "line one line two");
        let long = "é".repeat(20);
        let cut = preview(&long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_analysis_line() {
        let metrics = SessionMetrics {
            user_messages: 2,
            assistant_messages: 2,
            booking_offered: true,
        };
        assert_eq!(
            analysis_line(&metrics),
            "User Messages: 2 | Agent Responses: 2 | Booking Offered: Yes"
        );
    }

    #[test]
    fn test_presets_table_lists_every_scenario() {
        let rendered = presets_table().to_string();
        for preset in PRESETS.iter() {
            assert!(rendered.contains(preset.key));
            assert!(rendered.contains(preset.label));
        }
    }
}
