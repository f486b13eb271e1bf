use std::collections::VecDeque;
use std::pin::Pin;

use futures::StreamExt as _;
use futures::stream;
use tracing::debug;

use crate::client::{EventSource, InvocationClient, RawEvent};
use crate::errors::InvocationError;
use crate::model::InvocationRequest;

use super::config::HttpClientConfig;
use super::transport::SseDecoder;

type ByteStream =
    Pin<Box<dyn futures::Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static>>;

/// Invocation client for an agent relay that streams `text/event-stream`.
pub struct HttpInvocationClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl HttpInvocationClient {
    /// Creates a client from explicit configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self, InvocationError> {
        if config.bearer_token.trim().is_empty() {
            return Err(InvocationError::config(
                "agent relay bearer_token must not be empty",
            ));
        }
        if config.endpoint.trim().is_empty() {
            return Err(InvocationError::config(
                "agent relay endpoint must not be empty",
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| InvocationError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Creates a client from the process environment.
    pub fn from_env() -> Result<Self, InvocationError> {
        Self::new(HttpClientConfig::from_env()?)
    }
}

#[async_trait::async_trait]
impl InvocationClient for HttpInvocationClient {
    async fn invoke(&self, req: InvocationRequest) -> Result<EventSource, InvocationError> {
        let url = self.config.invoke_url(
            &req.agent.agent_id,
            &req.agent.agent_alias_id,
            req.session_id.as_str(),
        );
        debug!(
            session_id = %req.session_id,
            agent_id = %req.agent.agent_id,
            agent_alias_id = %req.agent.agent_alias_id,
            input_len = req.input_text.len() as u64,
            "invoking agent"
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.bearer_token)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&build_request_body(&req))
            .send()
            .await
            .map_err(|e| InvocationError::transport(format!("agent invocation failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InvocationError::service(
                format!("agent invocation failed with status {status}: {body}"),
                Some(status.as_u16()),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        check_content_type(content_type)?;

        let bytes_stream: ByteStream = Box::pin(response.bytes_stream());
        Ok(Box::pin(sse_event_stream(bytes_stream)))
    }
}

pub(crate) fn build_request_body(req: &InvocationRequest) -> serde_json::Value {
    serde_json::json!({
        "inputText": req.input_text,
        "enableTrace": false,
    })
}

/// Rejects bodies that are not server-sent events.
///
/// A binary event-stream body would otherwise decode to zero frames and look
/// like an empty reply. A missing header is accepted.
fn check_content_type(content_type: Option<&str>) -> Result<(), InvocationError> {
    let Some(content_type) = content_type else {
        return Ok(());
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if mime == "text/event-stream" {
        return Ok(());
    }
    Err(InvocationError::service(
        format!("unsupported response content type {content_type:?}; expected text/event-stream"),
        None,
    ))
}

fn sse_event_stream(
    bytes_stream: ByteStream,
) -> impl futures::Stream<Item = Result<RawEvent, InvocationError>> + Send {
    struct State {
        bytes_stream: ByteStream,
        decoder: SseDecoder,
        pending: VecDeque<RawEvent>,
        done: bool,
    }

    stream::try_unfold(
        State {
            bytes_stream,
            decoder: SseDecoder::default(),
            pending: VecDeque::new(),
            done: false,
        },
        |mut state| async move {
            loop {
                if let Some(event) = state.pending.pop_front() {
                    return Ok(Some((event, state)));
                }
                if state.done {
                    return Ok(None);
                }

                match state.bytes_stream.next().await {
                    Some(Ok(chunk)) => {
                        state.pending.extend(state.decoder.push_chunk(&chunk));
                    }
                    Some(Err(e)) => {
                        return Err(InvocationError::transport(format!(
                            "event stream read failed: {e}"
                        )));
                    }
                    None => {
                        state.pending.extend(state.decoder.finish());
                        state.done = true;
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AgentRef;
    use crate::session::SessionId;

    #[test]
    fn request_body_carries_input_text() {
        let req = InvocationRequest::new(
            AgentRef::new("agent", "alias"),
            SessionId::generate(),
            "what is \"rust\"?",
        );
        let body = build_request_body(&req);
        assert_eq!(
            body.get("inputText").and_then(|v| v.as_str()),
            Some("what is \"rust\"?")
        );
        assert_eq!(body.get("enableTrace").and_then(|v| v.as_bool()), Some(false));
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = HttpInvocationClient::new(HttpClientConfig::new("http://relay", "  ")).err();
        assert!(matches!(err, Some(InvocationError::Config(msg)) if msg.contains("bearer_token")));
    }

    #[test]
    fn only_event_stream_bodies_are_accepted() {
        assert!(check_content_type(None).is_ok());
        assert!(check_content_type(Some("text/event-stream")).is_ok());
        assert!(check_content_type(Some("Text/Event-Stream; charset=utf-8")).is_ok());
        let err = check_content_type(Some("application/vnd.amazon.eventstream"))
            .expect_err("binary framing");
        assert!(err.message().contains("vnd.amazon.eventstream"), "{err}");
        assert!(check_content_type(Some("application/json")).is_err());
    }

    #[tokio::test]
    async fn byte_stream_is_decoded_across_chunks() {
        let chunks: Vec<Result<bytes::Bytes, reqwest::Error>> = vec![
            Ok(bytes::Bytes::from_static(b"event: chunk\ndata: {\"by")),
            Ok(bytes::Bytes::from_static(b"tes\":\"aGk=\"}\n\ndata: {\"x\":1}")),
        ];
        let events: Vec<_> = sse_event_stream(Box::pin(stream::iter(chunks)))
            .collect()
            .await;
        assert_eq!(
            events,
            vec![
                Ok(RawEvent::named("chunk", "{\"bytes\":\"aGk=\"}")),
                Ok(RawEvent::data("{\"x\":1}")),
            ]
        );
    }
}
