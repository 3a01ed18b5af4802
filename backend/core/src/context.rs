use serde::{Deserialize, Serialize};

/// Identity of the agent run that invoked a tool.
///
/// Tools pass this through to collaborators (such as a path resolver)
/// without inspecting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub agent_id: Option<u64>,
    pub agent_execution_id: Option<u64>,
    pub session_id: Option<String>,
}

impl ExecutionContext {
    pub fn new(agent_id: u64, agent_execution_id: u64) -> Self {
        Self {
            agent_id: Some(agent_id),
            agent_execution_id: Some(agent_execution_id),
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}
