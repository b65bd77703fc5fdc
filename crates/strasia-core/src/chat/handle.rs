//! Shared access to a chat controller.
//!
//! `SessionHandle` serializes every operation through an async mutex, which
//! doubles as the single-slot queue: a second submission waits (FIFO) behind
//! the in-flight agent call. The `try_*` variants fail fast with
//! [`SessionError::Busy`] instead of waiting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use strasia_types::chat::SessionId;
use strasia_types::error::SessionError;
use strasia_types::event::SessionEvent;
use strasia_types::export::ConversationExport;
use strasia_types::metrics::SessionMetrics;
use tokio::sync::{broadcast, Mutex};

use crate::event::bus::EventBus;

use super::controller::{is_sendable, ChatController, TurnOutcome};
use super::preset::PresetScenario;
use super::view::SidebarView;

/// Whether the session is waiting on the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingAgent,
}

/// Cloneable, task-safe handle to a single chat session.
#[derive(Clone)]
pub struct SessionHandle {
    controller: Arc<Mutex<ChatController>>,
    awaiting_agent: Arc<AtomicBool>,
    events: EventBus,
    session_id: SessionId,
}

/// Clears the in-flight flag even if the submitting future is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SessionHandle {
    pub fn new(controller: ChatController) -> Self {
        let events = controller.events().clone();
        let session_id = controller.session_id().clone();
        Self {
            controller: Arc::new(Mutex::new(controller)),
            awaiting_agent: Arc::new(AtomicBool::new(false)),
            events,
            session_id,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Subscribe to change events without waiting on the controller lock.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn turn_state(&self) -> TurnState {
        if self.awaiting_agent.load(Ordering::SeqCst) {
            TurnState::AwaitingAgent
        } else {
            TurnState::Idle
        }
    }

    /// Submit a message, queueing behind any call already in flight.
    pub async fn submit(&self, text: &str) -> Result<TurnOutcome, SessionError> {
        let mut controller = self.controller.lock().await;
        self.send(&mut controller, text).await
    }

    /// Submit a message, or fail with `Busy` if another operation holds the session.
    pub async fn try_submit(&self, text: &str) -> Result<TurnOutcome, SessionError> {
        let mut controller = self.controller.try_lock().map_err(|_| SessionError::Busy)?;
        self.send(&mut controller, text).await
    }

    /// Run one render cycle (pending preset first, then typed input).
    pub async fn run_cycle(
        &self,
        typed: Option<String>,
    ) -> Result<Option<TurnOutcome>, SessionError> {
        let mut controller = self.controller.lock().await;
        match controller.take_cycle_input(typed) {
            Some(text) => self.send(&mut controller, &text).await.map(Some),
            None => Ok(None),
        }
    }

    /// `AwaitingAgent` is reported only while the agent is actually called.
    async fn send(
        &self,
        controller: &mut ChatController,
        text: &str,
    ) -> Result<TurnOutcome, SessionError> {
        if !is_sendable(text) {
            return Err(SessionError::EmptyMessage);
        }
        let _in_flight = InFlight::enter(&self.awaiting_agent);
        controller.submit_message(text).await
    }

    pub async fn clear(&self) {
        self.controller.lock().await.clear_conversation().await;
    }

    pub async fn try_clear(&self) -> Result<(), SessionError> {
        let mut controller = self.controller.try_lock().map_err(|_| SessionError::Busy)?;
        controller.clear_conversation().await;
        Ok(())
    }

    pub async fn queue_preset_message(&self, text: impl Into<String>) {
        self.controller.lock().await.queue_preset_message(text);
    }

    pub async fn queue_preset(&self, preset: &PresetScenario) {
        self.controller.lock().await.queue_preset(preset);
    }

    pub async fn export(&self) -> ConversationExport {
        self.controller.lock().await.export_conversation()
    }

    pub async fn metrics(&self) -> SessionMetrics {
        self.controller.lock().await.compute_metrics()
    }

    pub async fn sidebar(&self) -> SidebarView {
        self.controller.lock().await.sidebar()
    }

    /// Run a read-only closure against the controller.
    pub async fn read<R>(&self, f: impl FnOnce(&ChatController) -> R) -> R {
        let controller = self.controller.lock().await;
        f(&controller)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("session_id", &self.session_id)
            .field("turn_state", &self.turn_state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::box_agent::BoxSalesAgent;
    use crate::agent::stub::{StubAgent, StubCalls};
    use tokio::sync::Notify;

    type Calls = Arc<std::sync::Mutex<StubCalls>>;

    fn gated_handle(replies: &[&str]) -> (SessionHandle, Arc<Notify>, Calls) {
        let gate = Arc::new(Notify::new());
        let agent = StubAgent::replying(replies.iter().copied()).gated(Arc::clone(&gate));
        let calls = agent.calls();
        let handle = SessionHandle::new(ChatController::new(BoxSalesAgent::new(agent)));
        (handle, gate, calls)
    }

    async fn wait_for_thinking(rx: &mut broadcast::Receiver<SessionEvent>) {
        loop {
            if rx.recv().await.unwrap() == SessionEvent::AgentThinking {
                return;
            }
        }
    }

    #[tokio::test]
    async fn test_busy_while_agent_call_in_flight() {
        let (handle, gate, _calls) = gated_handle(&["slow reply"]);
        let mut rx = handle.subscribe();

        let first = tokio::spawn({
            let handle = handle.clone();
            async move { handle.submit("first").await }
        });
        wait_for_thinking(&mut rx).await;

        assert_eq!(handle.turn_state(), TurnState::AwaitingAgent);
        assert!(matches!(handle.try_submit("second").await, Err(SessionError::Busy)));
        assert!(matches!(handle.try_clear().await, Err(SessionError::Busy)));

        gate.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome.reply.content, "slow reply");
        assert_eq!(handle.turn_state(), TurnState::Idle);
        assert_eq!(handle.read(|c| c.messages().len()).await, 2);
    }

    #[tokio::test]
    async fn test_second_submission_queues_behind_first() {
        let (handle, gate, calls) = gated_handle(&["A", "B"]);
        let mut rx = handle.subscribe();

        let first = tokio::spawn({
            let handle = handle.clone();
            async move { handle.submit("one").await }
        });
        wait_for_thinking(&mut rx).await;

        let second = tokio::spawn({
            let handle = handle.clone();
            async move { handle.submit("two").await }
        });
        tokio::task::yield_now().await;
        assert_eq!(calls.lock().unwrap().prompts, vec!["one".to_string()]);

        gate.notify_one();
        first.await.unwrap().unwrap();
        wait_for_thinking(&mut rx).await;
        gate.notify_one();
        second.await.unwrap().unwrap();

        let contents = handle
            .read(|c| c.messages().iter().map(|m| m.content.clone()).collect::<Vec<_>>())
            .await;
        assert_eq!(contents, vec!["one", "A", "two", "B"]);
    }

    #[tokio::test]
    async fn test_clear_waits_for_in_flight_reply() {
        let (handle, gate, calls) = gated_handle(&["late reply"]);
        let mut rx = handle.subscribe();

        let submit = tokio::spawn({
            let handle = handle.clone();
            async move { handle.submit("question").await }
        });
        wait_for_thinking(&mut rx).await;

        let clear = tokio::spawn({
            let handle = handle.clone();
            async move { handle.clear().await }
        });
        tokio::task::yield_now().await;
        assert_eq!(calls.lock().unwrap().clears, 0);

        gate.notify_one();
        submit.await.unwrap().unwrap();
        clear.await.unwrap();

        assert!(handle.read(|c| c.messages().is_empty()).await);
        assert_eq!(handle.metrics().await, SessionMetrics::default());
        assert_eq!(calls.lock().unwrap().clears, 1);
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_agent() {
        let (handle, _gate, calls) = gated_handle(&["unused"]);
        let mut rx = handle.subscribe();

        assert!(matches!(handle.submit("  ").await, Err(SessionError::EmptyMessage)));
        assert!(matches!(handle.try_submit("").await, Err(SessionError::EmptyMessage)));
        assert!(handle.run_cycle(Some("\n".to_string())).await.unwrap().is_none());
        assert!(handle.run_cycle(None).await.unwrap().is_none());

        assert_eq!(handle.turn_state(), TurnState::Idle);
        assert!(calls.lock().unwrap().prompts.is_empty());
        assert!(rx.try_recv().is_err());
        assert!(handle.read(|c| c.messages().is_empty()).await);
    }

    #[tokio::test]
    async fn test_preset_through_handle() {
        let (handle, gate, _calls) = gated_handle(&["ok"]);
        gate.notify_one();

        handle.queue_preset(&crate::chat::preset::PRESETS[0]).await;
        let outcome = handle.run_cycle(None).await.unwrap().unwrap();
        assert_eq!(outcome.user.content, crate::chat::preset::PRESETS[0].prompt);
        assert!(handle.run_cycle(None).await.unwrap().is_none());

        let export = handle.export().await;
        assert_eq!(export.session_id, handle.session_id().to_string());
        assert_eq!(export.messages.len(), 2);
        assert_eq!(handle.sidebar().await.message_count, 2);
    }
}
