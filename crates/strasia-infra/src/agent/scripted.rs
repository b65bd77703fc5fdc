//! Deterministic scripted sales agent.
//!
//! Replies are chosen from keyword rules in a TOML script, which lets the
//! console run and be demonstrated without a hosted model. Example script:
//!
//! ```toml
//! knowledge_base = true
//! fallback = "Could you tell me more about your plans? (turn {turn})"
//! fail_on = ["simulate outage"]
//!
//! [[rules]]
//! keywords = ["singapore"]
//! reply = "Singapore incorporation usually takes 1-3 days."
//! ```
//!
//! Replies may contain `{turn}` (1-based turn number since the last memory
//! reset) and `{message}` (the user's text).

use std::path::Path;
use std::sync::Mutex;

use serde::Deserialize;
use tracing::{debug, info};

use strasia_core::agent::provider::SalesAgent;
use strasia_types::error::AgentError;

const BUILTIN_FALLBACK: &str = "Thank you for reaching out. I don't have a knowledge base loaded \
right now, so I can only give general guidance on \"{message}\". A consultant can follow up \
with specifics for your jurisdiction.";

/// A keyword rule: the first rule with any keyword contained in the message wins.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptRule {
    pub keywords: Vec<String>,
    pub reply: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentScript {
    #[serde(default)]
    pub knowledge_base: bool,

    #[serde(default = "default_fallback")]
    pub fallback: String,

    #[serde(default)]
    pub rules: Vec<ScriptRule>,

    /// Substrings that make `generate_response` fail.
    #[serde(default)]
    pub fail_on: Vec<String>,
}

fn default_fallback() -> String {
    BUILTIN_FALLBACK.to_string()
}

impl Default for AgentScript {
    fn default() -> Self {
        Self {
            knowledge_base: false,
            fallback: default_fallback(),
            rules: Vec::new(),
            fail_on: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Turn {
    user: String,
    reply: String,
}

#[derive(Debug)]
pub struct ScriptedAgent {
    script: AgentScript,
    memory: Mutex<Vec<Turn>>,
}

impl ScriptedAgent {
    pub fn new(script: AgentScript) -> Self {
        Self {
            script,
            memory: Mutex::new(Vec::new()),
        }
    }

    /// The script used when no file is configured.
    pub fn builtin() -> Self {
        Self::new(AgentScript::default())
    }

    pub fn from_toml(source: &str) -> Result<Self, AgentError> {
        let script: AgentScript = toml::from_str(source)
            .map_err(|e| AgentError::Init(format!("invalid agent script: {e}")))?;
        Ok(Self::new(script))
    }

    /// Load a script file.
    pub async fn load(path: &Path) -> Result<Self, AgentError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AgentError::Init(format!("failed to read {}: {e}", path.display())))?;
        let agent = Self::from_toml(&source)?;
        info!(
            path = %path.display(),
            rules = agent.script.rules.len(),
            knowledge_base = agent.script.knowledge_base,
            "Loaded agent script"
        );
        Ok(agent)
    }

    /// Number of exchanges remembered since the last reset.
    pub fn remembered_turns(&self) -> usize {
        self.memory.lock().map(|m| m.len()).unwrap_or(0)
    }

    fn pick_reply(&self, user_text: &str) -> &str {
        let lowered = user_text.to_lowercase();
        self.script
            .rules
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|k| lowered.contains(&k.to_lowercase()))
            })
            .map(|rule| rule.reply.as_str())
            .unwrap_or(self.script.fallback.as_str())
    }

    fn failure_trigger(&self, user_text: &str) -> Option<&str> {
        let lowered = user_text.to_lowercase();
        self.script
            .fail_on
            .iter()
            .find(|t| lowered.contains(&t.to_lowercase()))
            .map(String::as_str)
    }
}

impl SalesAgent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    fn has_knowledge_base(&self) -> bool {
        self.script.knowledge_base
    }

    async fn generate_response(&self, user_text: &str) -> Result<String, AgentError> {
        if let Some(trigger) = self.failure_trigger(user_text) {
            return Err(AgentError::Generation(format!(
                "scripted failure triggered by '{trigger}'"
            )));
        }

        let mut memory = self
            .memory
            .lock()
            .map_err(|_| AgentError::Unavailable("agent memory poisoned".to_string()))?;
        let turn = memory.len() + 1;
        let reply = self
            .pick_reply(user_text)
            .replace("{turn}", &turn.to_string())
            .replace("{message}", user_text);

        memory.push(Turn {
            user: user_text.to_string(),
            reply: reply.clone(),
        });
        debug!(turn, "Scripted reply selected");
        Ok(reply)
    }

    async fn clear_memory(&self) {
        if let Ok(mut memory) = self.memory.lock() {
            if let Some(last) = memory.last() {
                debug!(
                    turns = memory.len(),
                    last_user = %last.user,
                    last_reply_chars = last.reply.len(),
                    "Clearing agent memory"
                );
            }
            memory.clear();
        }
    }
}
