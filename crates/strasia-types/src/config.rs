//! Application configuration types.
//!
//! `AppConfig` represents the top-level `config.toml` in the data directory.
//! Every field has a default so an empty or missing file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub agent: AgentSection,

    #[serde(default)]
    pub export: ExportSection,

    #[serde(default)]
    pub ui: UiSection,
}

/// How the sales agent collaborator is constructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentSection {
    /// Path to a scripted-agent TOML file. The built-in script is used when unset.
    #[serde(default)]
    pub script: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSection {
    /// Directory export files are written to. Defaults to the working directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSection {
    /// Accent color for markdown headers and bold text (e.g. "cyan", "green").
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_accent() -> String {
    "cyan".to_string()
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            accent: default_accent(),
        }
    }
}
