//! Streaming agent invocation with a single deadline-bounded text result.
//!
//! An [`AgentInvoker`] opens one remote agent stream per call, classifies each
//! server-sent event, and folds the events into one text buffer until the
//! stream closes or the deadline fires. A deadline hit is not an error: the
//! text gathered so far is returned (with double quotes stripped). Only a
//! failure to open the stream is reported as an [`InvocationError`].
//!
//! ```no_run
//! use agent_invoke::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), InvocationError> {
//! let invoker = AgentInvoker::from_env()?;
//! let text = invoker.run_aggregated_invocation("Summarize the paper").await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

/// Invocation client contract and raw event type.
pub mod client;
/// Public error type.
pub mod errors;
/// HTTP implementation of the invocation client.
pub mod http;
/// Invoker entry point and builder.
pub mod invoker;
/// Agent reference, request, and option types.
pub mod model;
/// Common imports for typical usage.
pub mod prelude;
/// Deadline-bounded stream aggregation.
pub mod run;
/// Quote stripping for truncated output.
pub mod sanitize;
/// Session identifier generation.
pub mod session;
/// Stream event classification.
pub mod stream;

pub use client::{EventSource, InvocationClient, RawEvent};
pub use errors::InvocationError;
pub use http::{HttpClientConfig, HttpInvocationClient};
pub use invoker::{AgentInvoker, AgentInvokerBuilder};
pub use model::{AgentRef, DEFAULT_DEADLINE, InvocationRequest, InvokeOptions};
pub use run::{AggregationResult, Completion, aggregate};
pub use sanitize::sanitize;
pub use session::SessionId;
pub use stream::{StreamEvent, classify};
