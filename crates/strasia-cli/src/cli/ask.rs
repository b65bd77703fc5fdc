//! One-shot `strasia ask` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use strasia_core::chat::controller::{ChatController, TurnOutcome};
use strasia_infra::agent::build_agent;
use strasia_infra::export::write_export;
use strasia_types::export::ConversationExport;

use crate::state::AppState;

use super::chat::loop_runner::spinner;
use super::chat::panels;
use super::chat::renderer::{parse_accent, ChatRenderer};

/// Result of a single submitted message.
struct Exchange {
    outcome: TurnOutcome,
    snapshot: ConversationExport,
    written: Option<PathBuf>,
}

/// Submit `message` once and optionally write the export file.
async fn exchange(
    controller: &mut ChatController,
    message: &str,
    export_to: Option<&Path>,
) -> Result<Exchange> {
    let outcome = controller.submit_message(message).await?;
    let snapshot = controller.export_conversation();
    let written = match export_to {
        Some(dir) => Some(
            write_export(dir, &snapshot)
                .await
                .context("Failed to export conversation")?,
        ),
        None => None,
    };
    Ok(Exchange {
        outcome,
        snapshot,
        written,
    })
}

/// Send one message to the agent and print the reply.
///
/// With `--json` the export snapshot is printed instead. An agent failure
/// is still shown, then reported as the command's error.
pub async fn ask(
    state: &AppState,
    message: &str,
    script: Option<&Path>,
    export: bool,
    export_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    let script = state.script_path(script);
    let agent = build_agent(script.as_deref())
        .await
        .context("Failed to initialize the sales agent")?;
    let mut controller = ChatController::new(agent);

    let export_dir = export.then(|| state.export_dir(export_dir));
    let thinking = (!json).then(|| spinner("thinking..."));
    let result = exchange(&mut controller, message, export_dir.as_deref()).await;
    if let Some(thinking) = thinking {
        thinking.finish_and_clear();
    }
    let Exchange {
        outcome,
        snapshot,
        written,
    } = result?;

    if json {
        println!("{}", snapshot.to_json_pretty()?);
    } else {
        let renderer = ChatRenderer::new(parse_accent(&state.config.ui.accent));
        if outcome.is_error() {
            renderer.print_error(&outcome.reply);
        } else {
            renderer.print_reply(&outcome.reply);
        }
        panels::print_analysis_line(&controller.compute_metrics());
        if let Some(path) = &written {
            println!(
                "  {} Conversation saved to {}\n",
                style("*").cyan().bold(),
                style(path.display()).bold()
            );
        }
    }

    match outcome.error {
        Some(err) => Err(anyhow::Error::new(err).context("The sales agent failed to respond")),
        None => Ok(()),
    }
}
