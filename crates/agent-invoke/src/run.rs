use std::time::Duration;

use futures::StreamExt as _;
use tracing::{debug, info, warn};

use crate::client::EventSource;
use crate::sanitize::sanitize;
use crate::stream::{StreamEvent, classify};

/// How consumption of an event source ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// The source closed before the deadline.
    StreamExhausted,
    /// The deadline fired first; the text is a sanitized prefix.
    DeadlineExceeded,
}

/// Aggregated text of one invocation plus how it ended.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AggregationResult {
    /// Concatenated event text in arrival order.
    pub text: String,
    pub completion: Completion,
    /// Number of events folded into `text`.
    pub events: u64,
}

impl AggregationResult {
    /// Returns `true` when the deadline cut the stream short.
    pub fn is_truncated(&self) -> bool {
        self.completion == Completion::DeadlineExceeded
    }
}

/// Drains `source` into a single text buffer, racing a deadline.
///
/// The deadline is absolute: a single instant fixed when this function is
/// called, never renewed by incoming events. An event that becomes ready at
/// that same instant is not consumed. When it fires the source is dropped (which
/// closes the underlying connection), double quotes are stripped from what was
/// gathered so far, and the partial text is returned. A clean end of stream
/// returns the text unmodified. A read error ends consumption like a clean
/// close.
pub async fn aggregate(mut source: EventSource, deadline: Duration) -> AggregationResult {
    let timer = tokio::time::sleep_until(tokio::time::Instant::now() + deadline);
    tokio::pin!(timer);

    let mut text = String::new();
    let mut seq = 0_u64;
    loop {
        tokio::select! {
            biased;
            () = &mut timer => {
                drop(source);
                let text = sanitize(&text);
                info!(
                    events = seq,
                    text_len = text.len() as u64,
                    deadline_ms = deadline.as_millis() as u64,
                    "deadline exceeded; returning partial output"
                );
                return AggregationResult {
                    text,
                    completion: Completion::DeadlineExceeded,
                    events: seq,
                };
            }
            next = source.next() => {
                match next {
                    Some(Ok(raw)) => {
                        let event = classify(&raw);
                        if event == StreamEvent::Unclassified {
                            warn!(seq, event_name = ?raw.event, data_len = raw.data.len() as u64, "unclassified stream event");
                        } else {
                            debug!(seq, kind = event.kind(), "stream event");
                        }
                        event.render_into(&mut text);
                        seq = seq.saturating_add(1);
                    }
                    Some(Err(err)) => {
                        warn!(seq, error = %err, "event stream read failed; ending consumption");
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    info!(events = seq, text_len = text.len() as u64, "event stream exhausted");
    AggregationResult {
        text,
        completion: Completion::StreamExhausted,
        events: seq,
    }
}
