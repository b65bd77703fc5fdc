//! CLI command definitions for the `strasia` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod presets;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Test console for the Strasia corporate services sales agent.
#[derive(Parser)]
#[command(name = "strasia", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session with the sales agent.
    Chat {
        /// Send a preset scenario first (business, cost, compare, or 1-3).
        #[arg(long)]
        preset: Option<String>,

        /// Agent script to load instead of the configured one.
        #[arg(long)]
        script: Option<PathBuf>,

        /// Directory for /export files.
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },

    /// Send a single message and print the reply.
    Ask {
        /// The message to send.
        message: String,

        /// Agent script to load instead of the configured one.
        #[arg(long)]
        script: Option<PathBuf>,

        /// Write the conversation to an export file afterwards.
        #[arg(long)]
        export: bool,

        /// Directory for the export file.
        #[arg(long, requires = "export")]
        export_dir: Option<PathBuf>,
    },

    /// List the preset test scenarios.
    Presets,

    /// Show configuration and agent status.
    Status {
        /// Agent script to load instead of the configured one.
        #[arg(long)]
        script: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
