//! Application state shared by CLI commands.
//!
//! Resolves the data directory and loads `config.toml` once at startup.
//! Command-line overrides take precedence over configured paths.

use std::path::{Path, PathBuf};

use strasia_infra::config::{config_path, load_app_config, resolve_in};
use strasia_infra::filesystem::resolve_data_dir;
use strasia_types::config::AppConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_app_config(&data_dir).await;
        Ok(Self::new(data_dir, config))
    }

    pub fn new(data_dir: PathBuf, config: AppConfig) -> Self {
        Self {
            config_path: config_path(&data_dir),
            config,
            data_dir,
        }
    }

    /// Agent script to load: the flag if given, else `[agent] script`
    /// resolved against the data directory.
    pub fn script_path(&self, override_path: Option<&Path>) -> Option<PathBuf> {
        match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => self
                .config
                .agent
                .script
                .as_deref()
                .map(|p| resolve_in(&self.data_dir, p)),
        }
    }

    /// Directory exports are written to: the flag, else `[export] dir`, else
    /// the working directory.
    pub fn export_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.config.export.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
