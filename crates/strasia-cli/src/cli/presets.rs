//! `strasia presets` command.

use anyhow::Result;

use strasia_core::chat::preset::PRESETS;

use super::chat::panels;

pub fn list_presets(json: bool) -> Result<()> {
    if json {
        let presets: Vec<_> = PRESETS
            .iter()
            .enumerate()
            .map(|(i, p)| {
                serde_json::json!({
                    "index": i + 1,
                    "key": p.key,
                    "label": p.label,
                    "prompt": p.prompt,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    panels::print_presets();
    Ok(())
}
