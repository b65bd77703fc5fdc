use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "STRASIA_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `STRASIA_DATA_DIR` environment variable
/// 2. `~/.strasia` in the user's home directory
/// 3. `.strasia` in the working directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".strasia");
    }

    PathBuf::from(".strasia")
}
