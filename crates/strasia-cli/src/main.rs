//! Strasia sales console entry point.
//!
//! Binary name: `strasia`
//!
//! Parses CLI arguments, initializes tracing and configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use strasia_observe::tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};

use cli::chat::loop_runner::ChatOptions;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "strasia", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    let result = match cli.command {
        Commands::Chat {
            preset,
            script,
            export_dir,
        } => {
            cli::chat::loop_runner::run_chat_loop(
                &state,
                ChatOptions {
                    preset,
                    script,
                    export_dir,
                },
            )
            .await
        }

        Commands::Ask {
            message,
            script,
            export,
            export_dir,
        } => {
            cli::ask::ask(
                &state,
                &message,
                script.as_deref(),
                export,
                export_dir.as_deref(),
                cli.json,
            )
            .await
        }

        Commands::Presets => cli::presets::list_presets(cli.json),

        Commands::Status { script } => cli::status::status(&state, script.as_deref(), cli.json).await,

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
