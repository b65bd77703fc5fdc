//! Configuration and agent status command.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use strasia_infra::agent::build_agent;
use strasia_core::chat::view::knowledge_base_info;

use crate::state::AppState;

/// Display where data lives and what the configured agent can do.
pub async fn status(state: &AppState, script: Option<&Path>, json: bool) -> Result<()> {
    let script = state.script_path(script);
    let agent = build_agent(script.as_deref())
        .await
        .context("Failed to initialize the sales agent")?;
    let knowledge_base = agent.has_knowledge_base();
    let export_dir = state.export_dir(None);
    let config_exists = tokio::fs::try_exists(&state.config_path)
        .await
        .unwrap_or(false);

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "config_path": state.config_path.display().to_string(),
            "config_exists": config_exists,
            "agent": {
                "name": agent.name(),
                "script": script.as_ref().map(|p| p.display().to_string()),
                "knowledge_base": knowledge_base,
            },
            "export_dir": export_dir.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!("  {} v{}", style("Strasia Sales Agent").cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!();

    println!("  {}", style("── Agent ──").dim());
    println!("  Name:   {}", style(agent.name()).bold());
    match &script {
        Some(path) => println!("  Script: {}", style(path.display()).dim()),
        None => println!("  Script: {}", style("built-in").dim()),
    }
    for line in knowledge_base_info(knowledge_base) {
        if knowledge_base {
            println!("  {}", style(line).green());
        } else {
            println!("  {}", style(line).yellow());
        }
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir:   {}", style(state.data_dir.display()).dim());
    let config_note = if config_exists { "" } else { " (not found, using defaults)" };
    println!(
        "  Config:     {}{}",
        style(state.config_path.display()).dim(),
        style(config_note).yellow()
    );
    println!("  Export dir: {}", style(export_dir.display()).dim());
    println!();

    Ok(())
}
