use std::time::Duration;

use crate::errors::InvocationError;

/// Environment variable holding the relay base URL.
pub const ENDPOINT_ENV: &str = "AGENT_RUNTIME_ENDPOINT";
/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "AGENT_RUNTIME_TOKEN";

/// Configuration for the HTTP invocation client.
///
/// The endpoint is an agent relay that answers invocations with a
/// `text/event-stream` body. There is no default: the native agent runtime
/// streams a binary framing this client does not speak.
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Base URL of the relay.
    pub endpoint: String,
    /// Token used for bearer auth.
    pub bearer_token: String,
    /// Connect timeout. The stream itself is bounded by the invoker deadline.
    pub connect_timeout: Duration,
}

impl HttpClientConfig {
    /// Creates a config for the given relay endpoint.
    pub fn new(endpoint: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bearer_token: bearer_token.into(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Builds a config from the process environment.
    pub fn from_env() -> Result<Self, InvocationError> {
        let endpoint = required_env(ENDPOINT_ENV)?;
        let token = required_env(TOKEN_ENV)?;
        Ok(Self::new(endpoint, token))
    }

    /// Overrides the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub(crate) fn invoke_url(&self, agent_id: &str, alias_id: &str, session_id: &str) -> String {
        format!(
            "{}/agents/{agent_id}/agentAliases/{alias_id}/sessions/{session_id}/text",
            self.endpoint.trim_end_matches('/')
        )
    }
}

fn required_env(key: &str) -> Result<String, InvocationError> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| InvocationError::config(format!("missing {key} for agent relay client")))
}
