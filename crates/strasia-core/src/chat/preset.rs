//! Fixed test scenarios offered as input shortcuts.

/// A canned prompt that can be queued as if the user had typed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetScenario {
    pub key: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const PRESETS: [PresetScenario; 3] = [
    PresetScenario {
        key: "business",
        label: "Business Inquiry",
        prompt: "I'm looking to set up a company in Singapore. What do I need to know?",
    },
    PresetScenario {
        key: "cost",
        label: "Cost Inquiry",
        prompt: "How much does it cost to incorporate in Hong Kong and what's the timeline?",
    },
    PresetScenario {
        key: "compare",
        label: "Multi-jurisdiction",
        prompt: "I need to compare incorporation options between UK and Singapore for my tech startup",
    },
];

/// Jurisdictions covered by the agent's knowledge base, as shown in the info panel.
pub const KNOWLEDGE_BASE_JURISDICTIONS: [&str; 6] = [
    "Hong Kong",
    "Singapore",
    "Malaysia",
    "Thailand",
    "UK",
    "USA",
];

/// Find a preset by key, label, or 1-based index.
///
/// Matching on key and label is case-insensitive.
pub fn find(selector: &str) -> Option<&'static PresetScenario> {
    let selector = selector.trim();
    if let Ok(index) = selector.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| PRESETS.get(i));
    }
    PRESETS.iter().find(|p| {
        p.key.eq_ignore_ascii_case(selector) || p.label.eq_ignore_ascii_case(selector)
    })
}
