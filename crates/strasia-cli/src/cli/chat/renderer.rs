//! Terminal rendering of agent replies.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for fenced
//! code blocks. Agent replies arrive whole, so each one is rendered once as
//! formatted markdown.

use console::style;
use crossterm::style::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

use strasia_types::chat::ChatMessage;

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ChatRenderer {
    /// Create a renderer, tinting bold text and headers with `accent`.
    pub fn new(accent: Option<Color>) -> Self {
        let mut skin = MadSkin::default_dark();

        if let Some(color) = accent {
            let tc = to_termimad(color);
            skin.bold.set_fg(tc);
            skin.headers[0].set_fg(tc);
            skin.headers[1].set_fg(tc);
        }
        skin.inline_code.set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a markdown reply. Fenced code is highlighted via syntect,
    /// everything else goes through termimad.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") && !in_code_block {
                in_code_block = true;
                code_lang = line.trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if line.starts_with("```") {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&self.skin.term_text(line).to_string());
            }
        }

        // Unclosed fence
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    /// Print an assistant reply as markdown under the agent label.
    pub fn print_reply(&self, message: &ChatMessage) {
        println!();
        println!("  {}", style("Sales Agent").cyan().bold());
        for line in self.render_final(&message.content).trim_end().lines() {
            println!("  {line}");
        }
        print_caption(message);
        println!();
    }

    /// Print a failed turn's reply. The content already carries the
    /// `Error: ` prefix.
    pub fn print_error(&self, message: &ChatMessage) {
        println!();
        println!("  {} {}", style("!").red().bold(), style(&message.content).red());
        print_caption(message);
        println!();
    }

    /// Print a user message as it appears in the transcript.
    pub fn print_user(&self, message: &ChatMessage) {
        println!();
        println!("  {} {}", style("You >").green().bold(), message.content);
        print_caption(message);
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let Some(theme) = self.theme_set.themes.get("base16-ocean.dark") else {
            return code.to_string();
        };
        let mut h = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        output.push_str(&format!("  {}\n", style(format!("--- {lang} ---")).dim()));
        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }
        output
    }
}

/// The "Sent at HH:MM:SS" line under each message.
pub fn caption(message: &ChatMessage) -> String {
    format!("Sent at {}", message.timestamp)
}

fn print_caption(message: &ChatMessage) {
    println!("  {}", style(caption(message)).dim());
}

/// Parse the `[ui] accent` setting. Unknown names yield `None`.
pub fn parse_accent(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "cyan" => Some(Color::Cyan),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "magenta" => Some(Color::Magenta),
        "blue" => Some(Color::Blue),
        "red" => Some(Color::Red),
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::Rgb {
                r: channel(1)?,
                g: channel(3)?,
                b: channel(5)?,
            })
        }
        _ => None,
    }
}

fn to_termimad(color: Color) -> termimad::crossterm::style::Color {
    use termimad::crossterm::style::Color as Tc;
    match color {
        Color::Cyan => Tc::Cyan,
        Color::Green => Tc::Green,
        Color::Yellow => Tc::Yellow,
        Color::Magenta => Tc::Magenta,
        Color::Blue => Tc::Blue,
        Color::Red => Tc::Red,
        Color::Rgb { r, g, b } => Tc::Rgb { r, g, b },
        _ => Tc::Cyan,
    }
}
