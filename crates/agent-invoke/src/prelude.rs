//! Common imports for typical invoker usage.
pub use crate::{
    AgentInvoker, AgentRef, AggregationResult, Completion, HttpClientConfig,
    HttpInvocationClient, InvocationClient, InvocationError,
};
