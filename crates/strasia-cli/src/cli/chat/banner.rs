//! Header and footer shown around a chat session.

use console::style;

use strasia_core::chat::view::SidebarView;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(view: &SidebarView) {
    let kb = if view.knowledge_base {
        style(view.knowledge_base_label()).green()
    } else {
        style(view.knowledge_base_label()).yellow()
    };

    println!();
    println!("  {}", style("Strasia Sales Agent").cyan().bold());
    println!(
        "  {}",
        style("Professional Corporate Services Consultant").dim()
    );
    println!();
    println!("  {}  {}", style("Session:").bold(), style(&view.session_id).dim());
    println!("  {}", kb);
    println!();
    println!(
        "  {}",
        style("Type /help for commands, /presets for test scenarios, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Print the closing footer.
pub fn print_footer() {
    println!("  {}", style("---").dim());
    println!(
        "  {}",
        style("Sales Agent Test Interface | Strasia console").dim()
    );
    println!();
}
