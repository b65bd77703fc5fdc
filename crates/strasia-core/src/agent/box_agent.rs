//! BoxSalesAgent -- object-safe dynamic dispatch wrapper for SalesAgent.
//!
//! 1. Define an object-safe `SalesAgentDyn` trait with boxed futures
//! 2. Blanket-impl `SalesAgentDyn` for all `T: SalesAgent`
//! 3. `BoxSalesAgent` wraps `Box<dyn SalesAgentDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use strasia_types::error::AgentError;

use super::provider::SalesAgent;

/// Object-safe version of [`SalesAgent`] with boxed futures.
pub trait SalesAgentDyn: Send + Sync {
    fn name(&self) -> &str;

    fn has_knowledge_base(&self) -> bool;

    fn generate_response_boxed<'a>(
        &'a self,
        user_text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>>;

    fn clear_memory_boxed<'a>(&'a self) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

impl<T: SalesAgent> SalesAgentDyn for T {
    fn name(&self) -> &str {
        SalesAgent::name(self)
    }

    fn has_knowledge_base(&self) -> bool {
        SalesAgent::has_knowledge_base(self)
    }

    fn generate_response_boxed<'a>(
        &'a self,
        user_text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>> {
        Box::pin(self.generate_response(user_text))
    }

    fn clear_memory_boxed<'a>(&'a self) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(self.clear_memory())
    }
}

/// Type-erased sales agent for runtime backend selection.
///
/// Since `SalesAgent` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxSalesAgent` provides the same methods and delegates to the
/// inner `SalesAgentDyn` trait object.
pub struct BoxSalesAgent {
    inner: Box<dyn SalesAgentDyn + Send + Sync>,
}

impl BoxSalesAgent {
    /// Wrap a concrete `SalesAgent` in a type-erased box.
    pub fn new<T: SalesAgent + 'static>(agent: T) -> Self {
        Self {
            inner: Box::new(agent),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn has_knowledge_base(&self) -> bool {
        self.inner.has_knowledge_base()
    }

    pub async fn generate_response(&self, user_text: &str) -> Result<String, AgentError> {
        self.inner.generate_response_boxed(user_text).await
    }

    pub async fn clear_memory(&self) {
        self.inner.clear_memory_boxed().await
    }
}

impl std::fmt::Debug for BoxSalesAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxSalesAgent")
            .field("name", &self.name())
            .field("knowledge_base", &self.has_knowledge_base())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::stub::StubAgent;

    #[tokio::test]
    async fn test_box_delegates_to_inner_agent() {
        let stub = StubAgent::replying(["Response A"]).with_knowledge_base(true);
        let calls = stub.calls();
        let agent = BoxSalesAgent::new(stub);

        assert_eq!(agent.name(), "stub");
        assert!(agent.has_knowledge_base());
        assert_eq!(agent.generate_response("hello").await.unwrap(), "Response A");
        agent.clear_memory().await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.prompts, vec!["hello".to_string()]);
        assert_eq!(calls.clears, 1);
    }

    #[tokio::test]
    async fn test_box_propagates_errors() {
        let agent = BoxSalesAgent::new(StubAgent::replying(["ok"]).failing_on("bad input"));
        let err = agent.generate_response("bad input").await.unwrap_err();
        assert!(matches!(err, AgentError::Generation(_)));
    }
}
