//! Application configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.strasia/` by default)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use strasia_types::config::AppConfig;

pub const CONFIG_FILE: &str = "config.toml";

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Resolve a configured path relative to the data directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_in(data_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
