/// Hard failure raised while opening an invocation stream.
///
/// Once a stream is open nothing is surfaced through this type any more:
/// unknown events, read failures and deadline expiry all resolve to text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvocationError {
    /// Invalid client or invoker configuration.
    #[error("config error: {0}")]
    Config(String),
    /// The request could not be sent or the connection failed.
    #[error("transport error: {message}")]
    Transport { message: String },
    /// The remote service rejected the request (auth, validation, throttling).
    #[error("service error: {message}")]
    Service {
        message: String,
        status_code: Option<u16>,
    },
}

impl InvocationError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a transport-level error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a service-level error.
    pub fn service(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Service {
            message: message.into(),
            status_code,
        }
    }

    /// Returns the human-readable message for this error.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(message)
            | Self::Transport { message }
            | Self::Service { message, .. } => message,
        }
    }

    /// Returns the HTTP status reported by the service, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Service { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
