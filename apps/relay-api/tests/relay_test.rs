//! Integration tests for the relay HTTP surface.
//!
//! Drives the relay router directly with `tower::ServiceExt::oneshot` and
//! forwards to a local fake sink bound on an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;
use tower::ServiceExt;

use bgi_notify::WebhookSink;
use relay_api::routes::{relay_router, RelayState};

const TOKEN: &str = "11111111-2222-3333-4444-555555555555";

/// One request captured by the fake sink.
#[derive(Debug, Clone)]
struct Captured {
    content_type: String,
    body: Vec<u8>,
}

#[derive(Clone, Default)]
struct SinkLog(Arc<Mutex<Vec<Captured>>>);

impl SinkLog {
    fn requests(&self) -> Vec<Captured> {
        self.0.lock().unwrap().clone()
    }
}

async fn capture_handler(
    State(log): State<SinkLog>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    log.0.lock().unwrap().push(Captured {
        content_type,
        body: body.to_vec(),
    });
    StatusCode::NO_CONTENT
}

/// Spawn a fake webhook sink that records requests and answers 204.
async fn spawn_sink(log: SinkLog) -> String {
    let app = Router::new()
        .route("/hook", post(capture_handler))
        .with_state(log);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/hook")
}

/// Spawn a fake sink that always fails with HTTP 500.
async fn spawn_failing_sink() -> String {
    let app = Router::new().route(
        "/hook",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "sink down") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/hook")
}

fn relay_app(sink_url: &str) -> Router {
    let sink = WebhookSink::new(sink_url).unwrap();
    relay_router(TOKEN, RelayState::new(sink))
}

fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_liveness_returns_200_ok() {
    let app = relay_app("http://127.0.0.1:1/unused");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = relay_app("http://127.0.0.1:1/unused");

    let response = app
        .oneshot(post_json("/not-the-token", r#"{"event":"Test"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = relay_app("http://127.0.0.1:1/unused");

    let response = app
        .oneshot(post_json(&format!("/{TOKEN}"), "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_event_is_rejected() {
    let app = relay_app("http://127.0.0.1:1/unused");

    let response = app
        .oneshot(post_json(&format!("/{TOKEN}"), r#"{"event":"Bogus"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_classification_gap_is_a_500_and_never_forwarded() {
    let log = SinkLog::default();
    let sink_url = spawn_sink(log.clone()).await;
    let app = relay_app(&sink_url);

    let response = app
        .oneshot(post_json(
            &format!("/{TOKEN}"),
            r#"{"event":"Domain","action":"Completed","task":{}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "classification_gap");
    assert!(log.requests().is_empty(), "gap must not reach the sink");
}

#[tokio::test]
async fn test_invalid_screenshot_is_a_400_and_never_forwarded() {
    let log = SinkLog::default();
    let sink_url = spawn_sink(log.clone()).await;
    let app = relay_app(&sink_url);

    let response = app
        .oneshot(post_json(
            &format!("/{TOKEN}"),
            r#"{"event":"Domain","action":"Started","screenshot":"!!not base64!!"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(log.requests().is_empty());
}

#[tokio::test]
async fn test_task_notification_is_forwarded_as_json() {
    let log = SinkLog::default();
    let sink_url = spawn_sink(log.clone()).await;
    let app = relay_app(&sink_url);

    let response = app
        .oneshot(post_json(
            &format!("/{TOKEN}"),
            r#"{"event":"Domain","action":"Started","task":{"name":"daily"}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");

    let requests = log.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].content_type.starts_with("application/json"));
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(payload["content"], "🚀 Starting Domain");
}

#[tokio::test]
async fn test_test_ping_is_forwarded() {
    let log = SinkLog::default();
    let sink_url = spawn_sink(log.clone()).await;
    let app = relay_app(&sink_url);

    let response = app
        .oneshot(post_json(&format!("/{TOKEN}"), r#"{"event":"Test"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let requests = log.requests();
    assert_eq!(requests.len(), 1);
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(payload["content"], "Test 🚀");
}

#[tokio::test]
async fn test_screenshot_is_forwarded_as_multipart() {
    let log = SinkLog::default();
    let sink_url = spawn_sink(log.clone()).await;
    let app = relay_app(&sink_url);

    let encoded = BASE64.encode(b"png bytes go here");
    let response = app
        .oneshot(post_json(
            &format!("/{TOKEN}"),
            &format!(r#"{{"event":"GeniusInvocation","conclusion":"Success","screenshot":"{encoded}"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let requests = log.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].content_type.starts_with("multipart/form-data"));
    let raw = String::from_utf8_lossy(&requests[0].body);
    assert!(raw.contains("payload_json"));
    assert!(raw.contains("🎉 GeniusInvocation completed!"));
    assert!(raw.contains("screenshot.png"));
}

#[tokio::test]
async fn test_sink_failure_propagates_as_502() {
    let sink_url = spawn_failing_sink().await;
    let app = relay_app(&sink_url);

    let response = app
        .oneshot(post_json(
            &format!("/{TOKEN}"),
            r#"{"event":"Domain","conclusion":"Cancelled"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "sink_forwarding_failed");
}
