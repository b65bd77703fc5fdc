//! Conversation export writer.
//!
//! Writes a `ConversationExport` as pretty-printed UTF-8 JSON to
//! `{dir}/conversation_<session_id>.json`, creating `dir` if needed. An
//! existing file for the same session is overwritten.

use std::path::{Path, PathBuf};

use strasia_types::error::ExportError;
use strasia_types::export::ConversationExport;
use tracing::info;

pub async fn write_export(dir: &Path, export: &ConversationExport) -> Result<PathBuf, ExportError> {
    let body = export.to_json_pretty()?;
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(export.file_name());
    tokio::fs::write(&path, body).await?;

    info!(
        path = %path.display(),
        messages = export.messages.len(),
        "Conversation exported"
    );
    Ok(path)
}
