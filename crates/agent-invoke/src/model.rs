use std::time::Duration;

use crate::session::SessionId;

/// Deadline applied to a whole stream when none is configured.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Remote agent selection: the agent itself and the alias (variant) to invoke.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AgentRef {
    /// Agent identifier.
    pub agent_id: String,
    /// Agent alias identifier.
    pub agent_alias_id: String,
}

impl AgentRef {
    /// Creates an agent reference.
    pub fn new(agent_id: impl Into<String>, agent_alias_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_alias_id: agent_alias_id.into(),
        }
    }
}

/// One agent invocation, built once per call and never mutated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvocationRequest {
    pub agent: AgentRef,
    pub session_id: SessionId,
    pub input_text: String,
}

impl InvocationRequest {
    pub fn new(agent: AgentRef, session_id: SessionId, input_text: impl Into<String>) -> Self {
        Self {
            agent,
            session_id,
            input_text: input_text.into(),
        }
    }
}

/// Per-invoker behavior options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvokeOptions {
    /// Absolute deadline for consuming one stream, measured from the start of
    /// consumption. Not renewed per event.
    pub deadline: Duration,
}

impl Default for InvokeOptions {
    fn default() -> Self {
        Self {
            deadline: DEFAULT_DEADLINE,
        }
    }
}
