//! Reactive fetch handle behaviour: failures and superseded runs.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use api_gateway_client::gateway::{FetchState, Gateway, RawErrorKind, RequestOptions};
use api_gateway_client::notification::{ChannelSink, NullSink, Severity};
use api_gateway_client::session::{CredentialStore, SessionContext};
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_watch_failure_is_classified_and_notified_once() {
    let addr: SocketAddr = "127.0.0.1:28681".parse().unwrap();
    common::start_recording_backend(addr, "503 Service Unavailable", "text/plain", "down").await;

    let (sink, mut rx) = ChannelSink::new();
    let gateway = Gateway::new(
        &common::client_config(addr),
        Arc::new(SessionContext::new()),
        Arc::new(sink),
    )
    .unwrap();

    let handle = gateway.watch::<Value>("/x", RequestOptions::get());
    let result = handle.ready().await;

    let error = result.error().unwrap();
    assert_eq!(error.kind(), RawErrorKind::Status);
    assert_eq!(error.status(), Some(503));
    assert!(result.data().is_none());

    let note = rx.try_recv().unwrap();
    assert_eq!(
        note.description,
        format!("[GET] \"http://{addr}/x\": 503 Service Unavailable")
    );
    assert_eq!(note.severity, Severity::Error);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_superseded_run_never_reaches_ready() {
    let addr: SocketAddr = "127.0.0.1:28682".parse().unwrap();
    let received =
        common::start_token_echo_backend(addr, "slow", Duration::from_millis(300)).await;

    let session = Arc::new(SessionContext::with_token("slow"));
    let gateway = Gateway::new(
        &common::client_config(addr),
        session.clone(),
        Arc::new(NullSink),
    )
    .unwrap();

    let handle = gateway.watch::<Value>("/me", RequestOptions::get());

    // Wait until the first run has sent its request with the slow token.
    for _ in 0..100 {
        if *received.lock().unwrap() >= 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(*received.lock().unwrap(), 1);

    session.set("fast".into());
    let _ = handle.refresh();
    let _ = handle.refresh();

    let latest = handle.ready().await;
    assert_eq!(latest.data().unwrap(), &json!({"token": "fast"}));

    // Let the slow first run finish; it must not overwrite the newer result.
    tokio::time::sleep(Duration::from_millis(500)).await;
    match handle.state() {
        FetchState::Ready(result) => {
            assert_eq!(result.data().unwrap(), &json!({"token": "fast"}))
        }
        FetchState::Pending => panic!("handle fell back to pending"),
    }
    assert_eq!(*received.lock().unwrap(), 3);
}
