// End-to-end tests for the HTTP invocation client.
//
// Uses wiremock as the agent relay and drives the real reqwest client,
// SSE decoder, classifier and aggregator.

use std::sync::Arc;

use agent_invoke::{
    AgentInvoker, AgentRef, Completion, HttpClientConfig, HttpInvocationClient, InvocationError,
};
use base64::Engine as _;
use wiremock::matchers::{body_json, header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chunk_frame(text: &str) -> String {
    let bytes = base64::engine::general_purpose::STANDARD.encode(text);
    format!("event: chunk\ndata: {{\"bytes\":\"{bytes}\"}}\n\n")
}

fn invoker_for(server: &MockServer) -> AgentInvoker {
    let config = HttpClientConfig::new(server.uri(), "test-token");
    let client = HttpInvocationClient::new(config).expect("client");
    AgentInvoker::builder()
        .client(Arc::new(client))
        .agent(AgentRef::new("AGENT1", "ALIAS1"))
        .build()
        .expect("invoker")
}

fn sse(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

#[tokio::test]
async fn streamed_chunks_are_aggregated_in_order() {
    let server = MockServer::start().await;
    let body = [
        chunk_frame("Quantum "),
        chunk_frame("\"entanglement\" "),
        chunk_frame("explained."),
    ]
    .concat();

    Mock::given(method("POST"))
        .and(path_regex(
            r"^/agents/AGENT1/agentAliases/ALIAS1/sessions/chat-[0-9]+-[0-9]+/text$",
        ))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({
            "inputText": "explain entanglement",
            "enableTrace": false
        })))
        .respond_with(sse(body))
        .expect(1)
        .mount(&server)
        .await;

    let result = invoker_for(&server)
        .run("explain entanglement")
        .await
        .expect("run");

    assert_eq!(result.text, "Quantum \"entanglement\" explained.");
    assert_eq!(result.completion, Completion::StreamExhausted);
    assert_eq!(result.events, 3);
}

#[tokio::test]
async fn mixed_events_render_their_literals() {
    let server = MockServer::start().await;
    let body = [
        chunk_frame("See attached. "),
        "data: {\"files\":{\"files\":[{\"name\":\"report.pdf\"}]}}\n\n".to_string(),
        ": heartbeat\n\n".to_string(),
        "data: {\"trace\":{\"orchestrationTrace\":{}}}\n\n".to_string(),
        "event: returnControl\ndata: {\"invocationId\":\"abc-123\"}\n\n".to_string(),
    ]
    .concat();

    Mock::given(method("POST"))
        .respond_with(sse(body))
        .mount(&server)
        .await;

    let text = invoker_for(&server)
        .run_aggregated_invocation("hello")
        .await
        .expect("run");

    assert_eq!(
        text,
        "See attached. file: report.pdferrorreturn control: abc-123"
    );
}

#[tokio::test]
async fn empty_body_yields_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(sse(String::new()))
        .mount(&server)
        .await;

    let result = invoker_for(&server).run("hello").await.expect("run");
    assert_eq!(result.text, "");
    assert_eq!(result.completion, Completion::StreamExhausted);
}

#[tokio::test]
async fn rejected_request_is_a_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("access denied"))
        .mount(&server)
        .await;

    let err = invoker_for(&server)
        .run_aggregated_invocation("hello")
        .await
        .expect_err("should fail");

    assert_eq!(err.status_code(), Some(403));
    assert!(err.message().contains("access denied"), "{err}");
}

#[tokio::test]
async fn binary_eventstream_reply_is_rejected_not_emptied() {
    let server = MockServer::start().await;
    // Native runtime framing: length-prefixed binary messages.
    let body: Vec<u8> = vec![0, 0, 0, 0x5a, 0, 0, 0, 0x3c, 0x12, 0x34, 0x56, 0x78];
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "application/vnd.amazon.eventstream"),
        )
        .mount(&server)
        .await;

    let err = invoker_for(&server)
        .run_aggregated_invocation("hello")
        .await
        .expect_err("non-SSE body must fail");

    assert!(matches!(err, InvocationError::Service { .. }), "{err:?}");
    assert!(err.message().contains("application/vnd.amazon.eventstream"), "{err}");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HttpInvocationClient::new(HttpClientConfig::new(uri, "t")).expect("client");
    let err = AgentInvoker::builder()
        .client(Arc::new(client))
        .agent(AgentRef::new("a", "b"))
        .build()
        .expect("invoker")
        .run_aggregated_invocation("hello")
        .await
        .expect_err("should fail");

    assert!(matches!(err, InvocationError::Transport { .. }), "{err:?}");
}
