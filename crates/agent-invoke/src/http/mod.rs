//! HTTP client for an agent relay's streaming invocation endpoint.
//!
//! Requests are sent as JSON; the relay must answer with a
//! `text/event-stream` body, which is handed to the aggregator event by event.
//! Any other content type is rejected before consumption starts.
mod adapter;
mod config;
pub(crate) mod transport;

pub use adapter::HttpInvocationClient;
pub use config::{ENDPOINT_ENV, HttpClientConfig, TOKEN_ENV};
