//! SalesAgent trait definition.
//!
//! Uses RPITIT for the async operations. Dynamic dispatch goes through
//! [`BoxSalesAgent`](super::box_agent::BoxSalesAgent).

use strasia_types::error::AgentError;

/// Trait for sales agent backends.
///
/// `generate_response` is stateful with respect to the agent's conversation
/// memory, so callers must invoke it in the order messages were sent and
/// never concurrently for the same session.
///
/// Implementations live in strasia-infra (e.g., `ScriptedAgent`).
pub trait SalesAgent: Send + Sync {
    /// Human-readable agent name (e.g., "scripted").
    fn name(&self) -> &str;

    /// Whether the agent has a knowledge base loaded.
    ///
    /// Read at startup and whenever status is displayed.
    fn has_knowledge_base(&self) -> bool;

    /// Produce a reply to the given user text.
    fn generate_response(
        &self,
        user_text: &str,
    ) -> impl std::future::Future<Output = Result<String, AgentError>> + Send;

    /// Forget the conversation so far. Idempotent.
    fn clear_memory(&self) -> impl std::future::Future<Output = ()> + Send;
}
