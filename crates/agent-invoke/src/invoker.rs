use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::client::InvocationClient;
use crate::errors::InvocationError;
use crate::http::HttpInvocationClient;
use crate::model::{AgentRef, InvocationRequest, InvokeOptions};
use crate::run::{AggregationResult, aggregate};
use crate::session::SessionId;

/// Environment variable holding the agent id.
pub const AGENT_ID_ENV: &str = "BEDROCK_AGENT_ID";
/// Environment variable holding the agent alias id.
pub const AGENT_ALIAS_ENV: &str = "BEDROCK_AGENT_ALIAS";

/// Runs one agent invocation per call and aggregates its stream into text.
#[derive(Clone)]
pub struct AgentInvoker {
    client: Arc<dyn InvocationClient>,
    agent: AgentRef,
    options: InvokeOptions,
}

impl AgentInvoker {
    /// Starts a builder.
    pub fn builder() -> AgentInvokerBuilder {
        AgentInvokerBuilder::default()
    }

    /// Builds an invoker backed by [`HttpInvocationClient`], with agent ids and
    /// credentials taken from the environment.
    pub fn from_env() -> Result<Self, InvocationError> {
        Self::from_env_builder()?.build()
    }

    /// Like [`AgentInvoker::from_env`], but returns the builder so callers can
    /// adjust options such as the deadline before building.
    pub fn from_env_builder() -> Result<AgentInvokerBuilder, InvocationError> {
        Ok(Self::builder()
            .client(Arc::new(HttpInvocationClient::from_env()?))
            .agent(agent_from_env()))
    }

    /// The agent this invoker targets.
    pub fn agent(&self) -> &AgentRef {
        &self.agent
    }

    /// Invokes the agent with `input_text` under a fresh session id.
    ///
    /// Fails only when the stream cannot be opened. A deadline hit is a
    /// successful, truncated result.
    pub async fn run(&self, input_text: &str) -> Result<AggregationResult, InvocationError> {
        let session_id = SessionId::generate();
        debug!(session_id = %session_id, agent_id = %self.agent.agent_id, "starting invocation");
        let request = InvocationRequest::new(self.agent.clone(), session_id.clone(), input_text);
        let source = self.client.invoke(request).await?;
        let result = aggregate(source, self.options.deadline).await;
        info!(
            session_id = %session_id,
            completion = ?result.completion,
            events = result.events,
            text_len = result.text.len() as u64,
            "invocation finished"
        );
        Ok(result)
    }

    /// Invokes the agent and returns only the aggregated text.
    pub async fn run_aggregated_invocation(
        &self,
        input_text: &str,
    ) -> Result<String, InvocationError> {
        Ok(self.run(input_text).await?.text)
    }
}

fn agent_from_env() -> AgentRef {
    let agent_id = std::env::var(AGENT_ID_ENV).unwrap_or_default();
    let agent_alias_id = std::env::var(AGENT_ALIAS_ENV).unwrap_or_default();
    AgentRef::new(agent_id, agent_alias_id)
}

/// Builder for [`AgentInvoker`].
#[derive(Default)]
pub struct AgentInvokerBuilder {
    client: Option<Arc<dyn InvocationClient>>,
    agent: Option<AgentRef>,
    options: InvokeOptions,
}

impl AgentInvokerBuilder {
    /// Sets the client used to open event streams.
    pub fn client(mut self, client: Arc<dyn InvocationClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the agent and alias to invoke.
    pub fn agent(mut self, agent: AgentRef) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Overrides the stream deadline (5 seconds by default).
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.options.deadline = deadline;
        self
    }

    /// Validates and builds the invoker.
    pub fn build(self) -> Result<AgentInvoker, InvocationError> {
        let client = self
            .client
            .ok_or_else(|| InvocationError::config("an invocation client is required"))?;
        let agent = self
            .agent
            .ok_or_else(|| InvocationError::config("an agent reference is required"))?;
        if agent.agent_id.trim().is_empty() {
            return Err(InvocationError::config(format!(
                "agent id must not be empty (set {AGENT_ID_ENV})"
            )));
        }
        if agent.agent_alias_id.trim().is_empty() {
            return Err(InvocationError::config(format!(
                "agent alias id must not be empty (set {AGENT_ALIAS_ENV})"
            )));
        }
        if self.options.deadline.is_zero() {
            return Err(InvocationError::config("deadline must be greater than 0"));
        }
        Ok(AgentInvoker {
            client,
            agent,
            options: self.options,
        })
    }
}
