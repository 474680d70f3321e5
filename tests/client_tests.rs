mod common;

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assisto::client::{ask, AgentApi, AgentEndpoints, HttpAgentClient};
use assisto::error::AssistoError;
use assisto::session::{AgentVariant, FormatPreference, Session};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpAgentClient {
    HttpAgentClient::new(common::endpoints(server)).expect("client")
}

#[tokio::test]
async fn success_updates_thread_id_and_returns_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scm"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "question": "open orders?",
            "thread_id": "T1",
            "format_preference": "natural_language",
            "agent_type": "scm"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "hi",
            "thread_id": "T2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = Session::with_agent(AgentVariant::Scm).with_thread_id("T1");
    let reply = ask(&api, "open orders?", &mut session).await.expect("reply");

    assert_eq!(reply.response, "hi");
    assert_eq!(session.thread_id(), "T2");
}

#[tokio::test]
async fn reply_without_thread_id_keeps_existing_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hcm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = Session::with_agent(AgentVariant::Hcm).with_thread_id("T1");
    let reply = ask(&api, "hello", &mut session).await.expect("reply");

    assert_eq!(reply.response, "ok");
    assert_eq!(reply.thread_id, None);
    assert_eq!(session.thread_id(), "T1");
}

#[tokio::test]
async fn each_variant_has_its_own_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hcm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "hcm" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/scm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "scm" })))
        .expect(0)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session =
        Session::with_agent(AgentVariant::Hcm).with_format_preference(FormatPreference::Table);
    let reply = ask(&api, "headcount", &mut session).await.expect("reply");
    assert_eq!(reply.response, "hcm");
}

#[tokio::test]
async fn server_error_detail_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scm"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = Session::with_agent(AgentVariant::Scm).with_thread_id("T1");
    let err = ask(&api, "hello", &mut session).await.unwrap_err();

    match err {
        AssistoError::Server { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "boom");
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert_eq!(session.thread_id(), "T1");
}

#[tokio::test]
async fn unparsable_error_body_is_unknown_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scm"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = Session::with_agent(AgentVariant::Scm);
    let err = ask(&api, "hello", &mut session).await.unwrap_err();

    assert!(matches!(
        err,
        AssistoError::Server { status: 500, ref detail } if detail == "Unknown error"
    ));
    assert_eq!(err.to_string(), "Server error: 500 - Unknown error");
}

#[tokio::test]
async fn malformed_success_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "wrong key" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = Session::with_agent(AgentVariant::Scm).with_thread_id("T1");
    let err = ask(&api, "hello", &mut session).await.unwrap_err();

    assert!(matches!(err, AssistoError::Transport(_)), "got {err:?}");
    assert_eq!(session.thread_id(), "T1");
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let api = HttpAgentClient::new(AgentEndpoints::under("http://127.0.0.1:1")).expect("client");
    let mut session = Session::with_agent(AgentVariant::Hcm);
    let err = ask(&api, "hello", &mut session).await.unwrap_err();
    assert!(matches!(err, AssistoError::Transport(_)), "got {err:?}");
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

#[tokio::test]
async fn every_failure_is_logged_at_warn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scm"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hcm"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "detail": "down" })))
        .mount(&server)
        .await;
    let api = client(&server);
    let unreachable =
        HttpAgentClient::new(AgentEndpoints::under("http://127.0.0.1:1")).expect("client");

    let (logs, _guard) = capture_logs();

    let mut session = Session::with_agent(AgentVariant::Scm);
    ask(&api, "hello", &mut session).await.unwrap_err();
    let malformed = logs.contents();
    assert!(malformed.contains("WARN"), "{malformed}");
    assert!(malformed.contains("agent request failed"), "{malformed}");
    assert!(malformed.contains("Transport error"), "{malformed}");

    let mut session = Session::with_agent(AgentVariant::Hcm);
    ask(&api, "hello", &mut session).await.unwrap_err();
    assert!(logs.contents().contains("Server error: 503 - down"));

    let before = logs.contents().matches("agent request failed").count();
    ask(&unreachable, "hello", &mut session).await.unwrap_err();
    let after = logs.contents().matches("agent request failed").count();
    assert_eq!(after, before + 1);
}

#[tokio::test]
async fn timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scm"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "late" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let api = HttpAgentClient::with_timeout(common::endpoints(&server), Duration::from_millis(50))
        .expect("client");
    let mut session = Session::with_agent(AgentVariant::Scm);
    let err = ask(&api, "hello", &mut session).await.unwrap_err();
    assert!(matches!(err, AssistoError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn validation_failures_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut unselected = Session::new();
    assert!(ask(&api, "hello", &mut unselected).await.unwrap_err().is_validation());

    let mut session = Session::with_agent(AgentVariant::Scm);
    assert!(ask(&api, "  \n ", &mut session).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn cookies_are_sent_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scm"))
        .and(header("cookie", "sid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "welcome back",
            "thread_id": "T2"
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/scm"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=abc; Path=/")
                .set_body_json(json!({ "response": "hello", "thread_id": "T1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = Session::with_agent(AgentVariant::Scm);
    ask(&api, "first", &mut session).await.expect("first");
    let second = ask(&api, "second", &mut session).await.expect("second");

    assert_eq!(second.response, "welcome back");
    assert_eq!(session.thread_id(), "T2");
}

#[tokio::test]
async fn http_client_is_usable_behind_trait_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hcm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "dyn" })))
        .expect(1)
        .mount(&server)
        .await;

    let api: std::sync::Arc<dyn AgentApi> = std::sync::Arc::new(client(&server));
    let mut session = Session::with_agent(AgentVariant::Hcm);
    let reply = ask(&api, "hi", &mut session).await.expect("reply");
    assert_eq!(reply.response, "dyn");
}
