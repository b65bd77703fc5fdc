//! Chat session controller.
//!
//! Owns the session, the agent collaborator and the pending preset slot.
//! Every mutating operation takes `&mut self`, so a controller can never
//! have two agent calls in flight; `SessionHandle` extends that guarantee to
//! shared use across tasks.
//!
//! Per submission the controller moves `Idle -> AwaitingAgent ->
//! {Rendered | Errored} -> Idle`, publishing a `SessionEvent` at each step.

use std::future::Future;

use strasia_types::chat::{ChatMessage, ChatSession, SessionId};
use strasia_types::error::{AgentError, SessionError};
use strasia_types::event::{SessionEvent, TurnOutcomeKind};
use strasia_types::export::ConversationExport;
use strasia_types::metrics::SessionMetrics;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::agent::box_agent::BoxSalesAgent;
use crate::clock::{Clock, SystemClock};
use crate::event::bus::EventBus;

use super::metrics;
use super::preset::PresetScenario;
use super::view::SidebarView;

/// Result of one submitted message.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub user: ChatMessage,
    pub reply: ChatMessage,
    /// Set when the agent failed and `reply` carries the error text.
    pub error: Option<AgentError>,
}

impl TurnOutcome {
    pub fn kind(&self) -> TurnOutcomeKind {
        if self.error.is_some() {
            TurnOutcomeKind::Errored
        } else {
            TurnOutcomeKind::Rendered
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

pub struct ChatController {
    session: ChatSession,
    agent: BoxSalesAgent,
    pending_input: Option<String>,
    clock: Box<dyn Clock>,
    events: EventBus,
}

impl ChatController {
    /// Start a session around an already-built agent.
    pub fn new(agent: BoxSalesAgent) -> Self {
        Self::with_clock(agent, SystemClock)
    }

    pub fn with_clock(agent: BoxSalesAgent, clock: impl Clock + 'static) -> Self {
        let session = ChatSession::new(SessionId::from_start_time(clock.now()));
        info!(
            session_id = %session.id(),
            agent = agent.name(),
            knowledge_base = agent.has_knowledge_base(),
            "Chat session started"
        );
        Self {
            session,
            agent,
            pending_input: None,
            clock: Box::new(clock),
            events: EventBus::default(),
        }
    }

    /// Build the agent and start a session.
    ///
    /// Agent construction may be slow; callers should show a loading state
    /// while this is pending. Construction errors are returned unchanged.
    pub async fn initialize<F>(build_agent: F) -> Result<Self, AgentError>
    where
        F: Future<Output = Result<BoxSalesAgent, AgentError>>,
    {
        let agent = build_agent.await?;
        Ok(Self::new(agent))
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn session_id(&self) -> &SessionId {
        self.session.id()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.session.messages()
    }

    pub fn agent(&self) -> &BoxSalesAgent {
        &self.agent
    }

    pub fn has_knowledge_base(&self) -> bool {
        self.agent.has_knowledge_base()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn pending_input(&self) -> Option<&str> {
        self.pending_input.as_deref()
    }

    /// Send user text to the agent and record both sides of the exchange.
    ///
    /// The user message is appended and published before the agent is
    /// invoked. Agent failures are recorded as an `Error: ...` assistant
    /// message and reported in the outcome; they never end the session.
    pub async fn submit_message(&mut self, text: &str) -> Result<TurnOutcome, SessionError> {
        if !is_sendable(text) {
            return Err(SessionError::EmptyMessage);
        }

        let user = ChatMessage::user(text, self.clock.now());
        self.append(user.clone());

        self.events.publish(SessionEvent::AgentThinking);
        debug!(session_id = %self.session.id(), chars = text.len(), "Awaiting agent reply");

        let (reply, error) = match self.agent.generate_response(text).await {
            Ok(response) => (ChatMessage::assistant(response, self.clock.now()), None),
            Err(e) => {
                warn!(session_id = %self.session.id(), error = %e, "Agent call failed");
                let content = format!("Error: {e}");
                (ChatMessage::assistant(content, self.clock.now()), Some(e))
            }
        };
        self.append(reply.clone());

        let outcome = TurnOutcome { user, reply, error };
        self.events.publish(SessionEvent::TurnFinished {
            outcome: outcome.kind(),
        });
        Ok(outcome)
    }

    /// Empty the thread and reset the agent's memory.
    ///
    /// The session id is kept.
    pub async fn clear_conversation(&mut self) {
        let dropped = self.session.len();
        self.session.clear();
        self.agent.clear_memory().await;
        self.events.publish(SessionEvent::Cleared);
        info!(session_id = %self.session.id(), dropped, "Conversation cleared");
    }

    /// Queue text to be sent on the next cycle, replacing any earlier preset.
    pub fn queue_preset_message(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Some(previous) = self.pending_input.replace(text) {
            debug!(previous = %previous, "Replaced queued preset");
        }
    }

    pub fn queue_preset(&mut self, preset: &PresetScenario) {
        self.queue_preset_message(preset.prompt);
    }

    /// Run one render cycle.
    ///
    /// A queued preset is consumed first and takes precedence over typed
    /// input. Blank input sends nothing and returns `Ok(None)`.
    pub async fn run_cycle(
        &mut self,
        typed: Option<String>,
    ) -> Result<Option<TurnOutcome>, SessionError> {
        match self.take_cycle_input(typed) {
            Some(text) => self.submit_message(&text).await.map(Some),
            None => Ok(None),
        }
    }

    /// Resolve what a cycle would send, consuming any queued preset.
    ///
    /// Returns `None` when there is nothing to send; the agent is called
    /// only for `Some`.
    pub fn take_cycle_input(&mut self, typed: Option<String>) -> Option<String> {
        self.pending_input
            .take()
            .or(typed)
            .filter(|text| is_sendable(text))
    }

    /// Snapshot the thread for export. Read-only.
    pub fn export_conversation(&self) -> ConversationExport {
        ConversationExport::snapshot(&self.session, self.clock.now())
    }

    pub fn compute_metrics(&self) -> SessionMetrics {
        metrics::compute(self.session.messages())
    }

    pub fn sidebar(&self) -> SidebarView {
        SidebarView {
            knowledge_base: self.agent.has_knowledge_base(),
            session_id: self.session.id().to_string(),
            message_count: self.session.len(),
            metrics: self.compute_metrics(),
        }
    }

    fn append(&mut self, message: ChatMessage) {
        self.session.append(message.clone());
        self.events.publish(SessionEvent::MessageAppended { message });
    }
}

impl std::fmt::Debug for ChatController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatController")
            .field("session_id", self.session.id())
            .field("messages", &self.session.len())
            .field("pending_input", &self.pending_input)
            .field("agent", &self.agent)
            .finish()
    }
}

/// Whether `text` would be sent to the agent: anything but blank.
pub fn is_sendable(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::stub::StubAgent;
    use crate::clock::FixedClock;
    use chrono::{Local, TimeZone};
    use strasia_types::chat::MessageRole;

    const SINGAPORE: &str = "I'm looking to set up a company in Singapore. What do I need to know?";

    fn controller(agent: StubAgent) -> ChatController {
        let start = Local.with_ymd_and_hms(2024, 5, 6, 9, 30, 15).unwrap();
        ChatController::with_clock(BoxSalesAgent::new(agent), FixedClock(start))
    }

    fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_new_session_is_empty_with_timestamp_id() {
        let ctl = controller(StubAgent::replying(Vec::<String>::new()));
        assert!(ctl.messages().is_empty());
        assert_eq!(ctl.session_id().as_str(), "20240506_093015");
        assert!(ctl.pending_input().is_none());
    }

    #[tokio::test]
    async fn test_initialize_builds_agent() {
        let ctl = ChatController::initialize(async {
            Ok::<_, AgentError>(BoxSalesAgent::new(
                StubAgent::replying(["hi"]).with_knowledge_base(true),
            ))
        })
        .await
        .unwrap();
        assert!(ctl.has_knowledge_base());
        assert!(ctl.messages().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_propagates_construction_error() {
        let result = ChatController::initialize(async {
            Err::<BoxSalesAgent, _>(AgentError::Init("no script".to_string()))
        })
        .await;
        assert!(matches!(result, Err(AgentError::Init(_))));
    }

    #[tokio::test]
    async fn test_business_inquiry_scenario() {
        let mut ctl = controller(StubAgent::replying(["Response A"]));

        let outcome = ctl.submit_message(SINGAPORE).await.unwrap();
        assert_eq!(outcome.kind(), TurnOutcomeKind::Rendered);

        let messages = ctl.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, SINGAPORE);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "Response A");
        assert_eq!(messages[1].timestamp, "09:30:15");

        let metrics = ctl.compute_metrics();
        assert_eq!(metrics.user_messages, 1);
        assert_eq!(metrics.assistant_messages, 1);
    }

    #[tokio::test]
    async fn test_n_submissions_yield_2n_ordered_messages() {
        let mut ctl = controller(StubAgent::replying(Vec::<String>::new()));
        for i in 0..5 {
            ctl.submit_message(&format!("question {i}")).await.unwrap();
        }

        let messages = ctl.messages();
        assert_eq!(messages.len(), 10);
        for (k, pair) in messages.chunks(2).enumerate() {
            assert_eq!(pair[0].role, MessageRole::User);
            assert_eq!(pair[0].content, format!("question {k}"));
            assert_eq!(pair[1].role, MessageRole::Assistant);
            assert_eq!(pair[1].content, format!("reply {}", k + 1));
        }
    }

    #[tokio::test]
    async fn test_agent_failure_is_recorded_and_session_continues() {
        let mut ctl = controller(StubAgent::replying(["fine"]).failing_on("bad input"));

        let outcome = ctl.submit_message("bad input").await.unwrap();
        assert!(outcome.is_error());
        assert!(outcome.reply.content.starts_with("Error: "));
        assert_eq!(ctl.messages()[1].content, outcome.reply.content);

        let outcome = ctl.submit_message("good input").await.unwrap();
        assert!(!outcome.is_error());
        assert_eq!(outcome.reply.content, "fine");
        assert_eq!(ctl.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_submission_rejected_without_side_effects() {
        let agent = StubAgent::replying(["x"]);
        let calls = agent.calls();
        let mut ctl = controller(agent);

        assert!(matches!(
            ctl.submit_message("").await,
            Err(SessionError::EmptyMessage)
        ));
        assert!(matches!(
            ctl.submit_message("   ").await,
            Err(SessionError::EmptyMessage)
        ));
        assert!(ctl.messages().is_empty());
        assert!(calls.lock().unwrap().prompts.is_empty());
    }

    #[tokio::test]
    async fn test_clear_resets_messages_metrics_and_agent_memory() {
        let agent = StubAgent::replying(["Book here: CALENDLY_LINK"]);
        let calls = agent.calls();
        let mut ctl = controller(agent);
        let id = ctl.session_id().clone();

        ctl.submit_message("hello").await.unwrap();
        assert!(ctl.compute_metrics().booking_offered);

        ctl.clear_conversation().await;
        assert_eq!(ctl.compute_metrics(), SessionMetrics::default());
        assert!(ctl.messages().is_empty());
        assert_eq!(ctl.session_id(), &id);
        assert_eq!(calls.lock().unwrap().clears, 1);
    }

    #[tokio::test]
    async fn test_preset_consumed_exactly_once() {
        let agent = StubAgent::replying(["ok"]);
        let calls = agent.calls();
        let mut ctl = controller(agent);

        ctl.queue_preset_message("test");
        assert_eq!(ctl.pending_input(), Some("test"));

        let outcome = ctl.run_cycle(None).await.unwrap().unwrap();
        assert_eq!(outcome.user.content, "test");
        assert!(ctl.pending_input().is_none());

        assert!(ctl.run_cycle(None).await.unwrap().is_none());
        assert_eq!(calls.lock().unwrap().prompts, vec!["test".to_string()]);
        assert_eq!(ctl.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_queue_overwrites_previous_preset() {
        let mut ctl = controller(StubAgent::replying(["ok"]));
        ctl.queue_preset_message("first");
        ctl.queue_preset(&crate::chat::preset::PRESETS[1]);
        assert_eq!(
            ctl.pending_input(),
            Some(crate::chat::preset::PRESETS[1].prompt)
        );
    }

    #[tokio::test]
    async fn test_preset_takes_precedence_over_typed_input() {
        let mut ctl = controller(StubAgent::replying(["ok"]));
        ctl.queue_preset_message("preset text");
        let outcome = ctl
            .run_cycle(Some("typed text".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.user.content, "preset text");
    }

    #[tokio::test]
    async fn test_cycle_with_typed_input_and_blank_input() {
        let mut ctl = controller(StubAgent::replying(["ok"]));
        assert!(ctl.run_cycle(Some("  ".to_string())).await.unwrap().is_none());
        let outcome = ctl.run_cycle(Some("hi".to_string())).await.unwrap();
        assert_eq!(outcome.map(|o| o.user.content), Some("hi".to_string()));
    }

    #[test]
    fn test_take_cycle_input_consumes_preset_and_skips_blank() {
        let mut ctl = controller(StubAgent::replying(["ok"]));
        assert_eq!(ctl.take_cycle_input(Some(" \t".to_string())), None);
        assert_eq!(ctl.take_cycle_input(None), None);

        ctl.queue_preset_message("preset text");
        assert_eq!(
            ctl.take_cycle_input(Some("typed".to_string())),
            Some("preset text".to_string())
        );
        assert_eq!(ctl.pending_input(), None);

        ctl.queue_preset_message("   ");
        assert_eq!(ctl.take_cycle_input(None), None);
        assert_eq!(ctl.pending_input(), None);
    }

    #[tokio::test]
    async fn test_export_reproduces_messages() {
        let mut ctl = controller(StubAgent::replying(["one", "two"]).failing_on("oops"));
        ctl.submit_message("first").await.unwrap();
        ctl.submit_message("oops").await.unwrap();

        let json = ctl.export_conversation().to_json_pretty().unwrap();
        let parsed = ConversationExport::from_json(&json).unwrap();
        assert_eq!(parsed.session_id, "20240506_093015");
        assert_eq!(parsed.timestamp, "2024-05-06T09:30:15.000000");
        assert_eq!(parsed.messages, ctl.messages());
    }

    #[tokio::test]
    async fn test_events_published_in_turn_order() {
        let mut ctl = controller(StubAgent::replying(["Response A"]));
        let mut rx = ctl.subscribe();

        ctl.submit_message("hello").await.unwrap();
        ctl.clear_conversation().await;

        let events = drain(&mut rx);
        assert_eq!(events.len(), 5);
        assert!(matches!(
            &events[0],
            SessionEvent::MessageAppended { message } if message.is_user()
        ));
        assert_eq!(events[1], SessionEvent::AgentThinking);
        assert!(matches!(
            &events[2],
            SessionEvent::MessageAppended { message } if message.content == "Response A"
        ));
        assert_eq!(
            events[3],
            SessionEvent::TurnFinished {
                outcome: TurnOutcomeKind::Rendered
            }
        );
        assert_eq!(events[4], SessionEvent::Cleared);
    }

    #[tokio::test]
    async fn test_sidebar_reflects_state() {
        let mut ctl = controller(StubAgent::replying(["Mail EMAIL"]).with_knowledge_base(true));
        ctl.submit_message("contact?").await.unwrap();

        let view = ctl.sidebar();
        assert!(view.knowledge_base);
        assert_eq!(view.session_id, "20240506_093015");
        assert_eq!(view.message_count, 2);
        assert!(view.metrics.booking_offered);
        assert_eq!(view.knowledge_base_label(), "Knowledge Base: Active");
    }
}
