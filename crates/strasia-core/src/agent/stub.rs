//! In-memory agent used by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use strasia_types::error::AgentError;
use tokio::sync::Notify;

use super::provider::SalesAgent;

/// What the stub has been asked to do, in call order.
#[derive(Debug, Default)]
pub struct StubCalls {
    pub prompts: Vec<String>,
    pub clears: usize,
}

pub struct StubAgent {
    replies: Mutex<VecDeque<String>>,
    fail_on: Vec<String>,
    knowledge_base: bool,
    gate: Option<Arc<Notify>>,
    calls: Arc<Mutex<StubCalls>>,
}

impl StubAgent {
    /// Reply with the given strings in order, then `reply <n>` once exhausted.
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            fail_on: Vec::new(),
            knowledge_base: false,
            gate: None,
            calls: Arc::new(Mutex::new(StubCalls::default())),
        }
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on.push(text.to_string());
        self
    }

    pub fn with_knowledge_base(mut self, enabled: bool) -> Self {
        self.knowledge_base = enabled;
        self
    }

    /// Block every `generate_response` until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Arc<Mutex<StubCalls>> {
        Arc::clone(&self.calls)
    }
}

impl SalesAgent for StubAgent {
    fn name(&self) -> &str {
        "stub"
    }

    fn has_knowledge_base(&self) -> bool {
        self.knowledge_base
    }

    async fn generate_response(&self, user_text: &str) -> Result<String, AgentError> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.prompts.push(user_text.to_string());
            calls.prompts.len()
        };

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.fail_on.iter().any(|f| user_text.contains(f.as_str())) {
            return Err(AgentError::Generation(format!(
                "could not process '{user_text}'"
            )));
        }

        let next = self.replies.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| format!("reply {call_number}")))
    }

    async fn clear_memory(&self) {
        self.calls.lock().unwrap().clears += 1;
    }
}
