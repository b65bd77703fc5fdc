//! Sales agent implementations.

pub mod scripted;

use std::path::Path;

use strasia_core::agent::box_agent::BoxSalesAgent;
use strasia_types::error::AgentError;

use scripted::ScriptedAgent;

/// Build the configured agent.
///
/// Loads the scripted agent from `script` when given, otherwise uses the
/// built-in script.
pub async fn build_agent(script: Option<&Path>) -> Result<BoxSalesAgent, AgentError> {
    let agent = match script {
        Some(path) => ScriptedAgent::load(path).await?,
        None => ScriptedAgent::builtin(),
    };
    Ok(BoxSalesAgent::new(agent))
}
