use std::pin::Pin;

use futures::Stream;

use crate::errors::InvocationError;
use crate::model::InvocationRequest;

/// One server-sent frame as received, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawEvent {
    /// SSE `event:` name, when the server sent one.
    pub event: Option<String>,
    /// Joined `data:` lines.
    pub data: String,
}

impl RawEvent {
    pub fn new(event: Option<String>, data: impl Into<String>) -> Self {
        Self {
            event,
            data: data.into(),
        }
    }

    /// Frame without an `event:` line.
    pub fn data(data: impl Into<String>) -> Self {
        Self::new(None, data)
    }

    /// Frame with an `event:` line.
    pub fn named(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(Some(event.into()), data)
    }
}

/// Live event source for one invocation.
///
/// Dropping it releases the underlying connection. An `Err` item means the
/// stream could not be read any further.
pub type EventSource = Pin<Box<dyn Stream<Item = Result<RawEvent, InvocationError>> + Send>>;

/// Contract implemented by remote agent-invocation clients.
#[async_trait::async_trait]
pub trait InvocationClient: Send + Sync {
    /// Submits the request and opens its event stream.
    ///
    /// Errors returned here are hard failures and reach the caller unchanged.
    async fn invoke(&self, req: InvocationRequest) -> Result<EventSource, InvocationError>;
}
