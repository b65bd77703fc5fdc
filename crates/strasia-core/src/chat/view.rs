//! Render-ready view of a session.
//!
//! Built purely from controller state so any frontend can draw the status
//! panel without touching the controller's internals.

use serde::Serialize;
use strasia_types::metrics::SessionMetrics;

use super::preset::KNOWLEDGE_BASE_JURISDICTIONS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarView {
    pub knowledge_base: bool,
    pub session_id: String,
    pub message_count: usize,
    pub metrics: SessionMetrics,
}

impl SidebarView {
    pub fn knowledge_base_label(&self) -> &'static str {
        if self.knowledge_base {
            "Knowledge Base: Active"
        } else {
            "Knowledge Base: Not Available"
        }
    }

    /// Lines of the knowledge-base info panel.
    pub fn knowledge_base_info(&self) -> Vec<String> {
        knowledge_base_info(self.knowledge_base)
    }
}

pub fn knowledge_base_info(knowledge_base: bool) -> Vec<String> {
    if !knowledge_base {
        return vec![
            "Knowledge base is not available. The agent will use general responses.".to_string(),
        ];
    }
    let mut lines =
        vec!["The agent has access to corporate services information for:".to_string()];
    lines.extend(KNOWLEDGE_BASE_JURISDICTIONS.iter().map(|j| format!("- {j}")));
    lines
}
