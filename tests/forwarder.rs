// Event forwarder tests against a local stub of the downstream webhook.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

use psbmon::forward::{EventForwarder, EventSink};

#[derive(Debug, Clone)]
struct ReceivedEvent {
    content_type: Option<String>,
    user_agent: Option<String>,
    body: String,
}

#[derive(Clone)]
struct ServerState {
    respond_with: StatusCode,
    received: Arc<Mutex<Vec<ReceivedEvent>>>,
}

async fn event_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let header = |name: axum::http::header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.received.lock().unwrap().push(ReceivedEvent {
        content_type: header(axum::http::header::CONTENT_TYPE),
        user_agent: header(axum::http::header::USER_AGENT),
        body,
    });
    state.respond_with
}

async fn start_test_server(respond_with: StatusCode) -> (String, Arc<Mutex<Vec<ReceivedEvent>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/event", post(event_handler))
        .with_state(ServerState {
            respond_with,
            received: received.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr: SocketAddr = listener.local_addr().expect("listener addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test server");
    });

    (format!("http://{addr}"), received)
}

#[tokio::test]
async fn posts_id_as_json_string() {
    let (host, received) = start_test_server(StatusCode::OK).await;
    let forwarder = EventForwarder::new(&host, Duration::from_secs(5)).unwrap();

    forwarder.forward("aB3xY9").await.unwrap();

    let events = received.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].body, r#""aB3xY9""#);
    assert_eq!(events[0].content_type.as_deref(), Some("application/json"));
    let ua = events[0].user_agent.as_deref().unwrap_or_default();
    assert!(ua.starts_with("psbmon"), "unexpected user agent: {ua}");
}

#[tokio::test]
async fn trailing_slash_on_host_still_hits_event_route() {
    let (host, received) = start_test_server(StatusCode::OK).await;
    let forwarder = EventForwarder::new(&format!("{host}/"), Duration::from_secs(5)).unwrap();

    forwarder.forward("slash").await.unwrap();

    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn error_status_is_not_a_failure() {
    let (host, received) = start_test_server(StatusCode::INTERNAL_SERVER_ERROR).await;
    let forwarder = EventForwarder::new(&host, Duration::from_secs(5)).unwrap();

    forwarder.forward("whatever").await.unwrap();

    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn connection_refused_is_reported_once() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let forwarder = EventForwarder::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    let err = forwarder.forward("lost").await.unwrap_err();

    assert!(err.to_string().contains("lost"), "unexpected error: {err}");
}
