//! Main chat loop orchestration.
//!
//! Coordinates the session lifecycle: agent initialization, welcome banner,
//! input loop, slash commands and per-turn rendering. Turn output is drawn
//! from the session's event stream rather than from return values.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::{debug, info, warn};

use strasia_core::chat::controller::ChatController;
use strasia_core::chat::handle::SessionHandle;
use strasia_core::chat::preset;
use strasia_infra::agent::build_agent;
use strasia_infra::export::write_export;
use strasia_types::chat::ChatMessage;
use strasia_types::event::{SessionEvent, TurnOutcomeKind};

use crate::state::AppState;

use super::banner::{print_footer, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::panels;
use super::renderer::{parse_accent, ChatRenderer};

/// Flags passed to `strasia chat`.
#[derive(Debug, Default)]
pub struct ChatOptions {
    pub preset: Option<String>,
    pub script: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop until the user exits.
pub async fn run_chat_loop(state: &AppState, options: ChatOptions) -> anyhow::Result<()> {
    let script = state.script_path(options.script.as_deref());
    let export_dir = state.export_dir(options.export_dir.as_deref());

    let init_spinner = spinner("Initializing sales agent...");
    let controller = ChatController::initialize(build_agent(script.as_deref())).await;
    init_spinner.finish_and_clear();
    let controller = controller.context("Failed to initialize the sales agent")?;

    let handle = SessionHandle::new(controller);
    info!(session_id = %handle.session_id(), "chat session started");

    let accent = parse_accent(&state.config.ui.accent);
    if accent.is_none() {
        warn!(accent = %state.config.ui.accent, "unknown accent color, using default styling");
    }
    let renderer = ChatRenderer::new(accent);

    print_welcome_banner(&handle.sidebar().await);

    if let Some(selector) = options.preset.as_deref() {
        let scenario = preset::find(selector)
            .with_context(|| format!("Unknown preset '{selector}'. Run `strasia presets` to list them."))?;
        handle.queue_preset(scenario).await;
        run_turn(&handle, &renderer, None, true).await;
    }

    let (mut chat_input, _writer) = ChatInput::new().context("Failed to initialize input")?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Blank => continue,
            InputEvent::Message(text) => text,
        };

        let Some(command) = commands::parse(&text) else {
            run_turn(&handle, &renderer, Some(text), false).await;
            continue;
        };

        match command {
            ChatCommand::Help => commands::print_help(),
            ChatCommand::Clear => {
                handle.clear().await;
                println!(
                    "\n  {} Conversation cleared. Session {} continues.\n",
                    style("*").cyan().bold(),
                    style(handle.session_id()).dim()
                );
            }
            ChatCommand::ClearScreen => chat_input.clear(),
            ChatCommand::Exit => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            ChatCommand::Status => panels::print_status(&handle.sidebar().await),
            ChatCommand::KnowledgeBase => panels::print_knowledge_base(&handle.sidebar().await),
            ChatCommand::Presets => panels::print_presets(),
            ChatCommand::Preset(selector) => match preset::find(&selector) {
                Some(scenario) => {
                    handle.queue_preset(scenario).await;
                    run_turn(&handle, &renderer, None, true).await;
                }
                None => println!(
                    "\n  {} Unknown preset: {}. Type /presets to list them.\n",
                    style("?").yellow().bold(),
                    style(selector).dim()
                ),
            },
            ChatCommand::Metrics => panels::print_analysis(&handle.metrics().await),
            ChatCommand::History => {
                let messages = handle.read(|c| c.messages().to_vec()).await;
                panels::print_history(&messages);
            }
            ChatCommand::Export => {
                let export = handle.export().await;
                match write_export(&export_dir, &export).await {
                    Ok(path) => println!(
                        "\n  {} Conversation saved to {}\n",
                        style("*").cyan().bold(),
                        style(path.display()).bold()
                    ),
                    Err(e) => println!(
                        "\n  {} Failed to export conversation: {e}\n",
                        style("!").red().bold()
                    ),
                }
            }
            ChatCommand::Unknown(name) => println!(
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(name).dim()
            ),
        }
    }

    print_footer();
    info!(session_id = %handle.session_id(), "chat session ended");
    Ok(())
}

/// Run one render cycle and draw its events as they arrive.
///
/// `echo_user` prints the user message too, for preset turns whose text
/// the user never typed.
async fn run_turn(
    handle: &SessionHandle,
    renderer: &ChatRenderer,
    typed: Option<String>,
    echo_user: bool,
) {
    let mut events = handle.subscribe();
    let mut view = TurnView::new(renderer, echo_user);

    let cycle = handle.run_cycle(typed);
    tokio::pin!(cycle);

    let result = loop {
        tokio::select! {
            result = &mut cycle => break result,
            event = events.recv() => match event {
                Ok(event) => view.apply(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "chat view fell behind session events");
                }
                Err(RecvError::Closed) => break (&mut cycle).await,
            },
        }
    };

    loop {
        match events.try_recv() {
            Ok(event) => view.apply(event),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "chat view fell behind session events");
            }
            Err(_) => break,
        }
    }
    view.finish();

    match result {
        Ok(Some(outcome)) => {
            debug!(kind = ?outcome.kind(), "turn finished");
            let metrics = handle.metrics().await;
            panels::print_analysis_line(&metrics);
        }
        Ok(None) => {}
        Err(e) => println!("\n  {} {e}\n", style("!").yellow().bold()),
    }
}

/// Per-turn rendering state fed by session events.
struct TurnView<'a> {
    renderer: &'a ChatRenderer,
    echo_user: bool,
    spinner: Option<ProgressBar>,
    reply: Option<ChatMessage>,
}

impl<'a> TurnView<'a> {
    fn new(renderer: &'a ChatRenderer, echo_user: bool) -> Self {
        Self {
            renderer,
            echo_user,
            spinner: None,
            reply: None,
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::MessageAppended { message } if message.is_user() => {
                if self.echo_user {
                    self.renderer.print_user(&message);
                }
            }
            SessionEvent::MessageAppended { message } => self.reply = Some(message),
            SessionEvent::AgentThinking => {
                self.spinner = Some(spinner("thinking..."));
            }
            SessionEvent::TurnFinished { outcome } => {
                self.stop_spinner();
                if let Some(reply) = self.reply.take() {
                    match outcome {
                        TurnOutcomeKind::Rendered => self.renderer.print_reply(&reply),
                        TurnOutcomeKind::Errored => self.renderer.print_error(&reply),
                    }
                }
            }
            SessionEvent::Cleared => {}
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn finish(&mut self) {
        self.stop_spinner();
    }
}
