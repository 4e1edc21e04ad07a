//! Webhook probe delivery contract against a mock endpoint.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use miniapp_checkout::config::{TimeoutConfig, WebhookConfig};
use miniapp_checkout::diagnostics::WebhookSender;

mod common;

fn webhook_config(addr: std::net::SocketAddr, secret: Option<&str>) -> WebhookConfig {
    WebhookConfig {
        url: format!("http://{}/api/miniapp/lava-webhook", addr),
        signature_header: "X-Lava-Signature".to_string(),
        secret: secret.map(str::to_string),
    }
}

#[tokio::test]
async fn sends_one_post_with_test_headers() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let (addr, captured) = common::start_capture_backend(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { (200, r#"{"ok":true,"status":"completed"}"#.to_string()) }
    })
    .await;

    let sender = WebhookSender::new(
        &webhook_config(addr, Some("hook-secret")),
        &TimeoutConfig::default(),
    )
    .unwrap();

    let report = sender.send_test_webhook().await.unwrap();
    assert!(report.accepted());
    assert_eq!(report.body, r#"{"ok":true,"status":"completed"}"#);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "exactly one delivery expected");

    let captured = captured.lock().await;
    assert_eq!(captured.len(), 1);
    let request = &captured[0];

    assert!(request
        .request_line()
        .starts_with("POST /api/miniapp/lava-webhook"));
    assert!(request.has_header("X-Test-Mode", "true"));
    assert!(request.has_header("X-Lava-Signature", "test_signature"));
    assert!(request.has_header("X-API-Key", "hook-secret"));
    assert!(request.has_header("X-Webhook-Id", &report.webhook_id.to_string()));
    assert!(request.has_header("Content-Type", "application/json"));

    let body = request.json();
    assert_eq!(body["type"], "payment");
    assert_eq!(body["event"], "payment.success");
    assert_eq!(body["test_mode"], true);
    assert_eq!(body["data"]["currency"], "USD");
    assert_eq!(body["data"]["metadata"]["tokens"], 100);
    assert_eq!(body["id"], report.event_id.as_str());
}

#[tokio::test]
async fn rejection_is_reported_not_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let (addr, _captured) = common::start_capture_backend(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { (503, r#"{"ok":false}"#.to_string()) }
    })
    .await;

    let sender =
        WebhookSender::new(&webhook_config(addr, None), &TimeoutConfig::default()).unwrap();

    let report = sender.send_test_webhook().await.unwrap();
    assert!(!report.accepted());
    assert_eq!(report.status.as_u16(), 503);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "no retry on rejection");
}

#[tokio::test]
async fn secret_header_is_omitted_when_unset() {
    let (addr, captured) = common::start_capture_backend(|| async move {
        (200, r#"{"ok":true}"#.to_string())
    })
    .await;

    let sender =
        WebhookSender::new(&webhook_config(addr, None), &TimeoutConfig::default()).unwrap();
    sender.send_test_webhook().await.unwrap();

    let captured = captured.lock().await;
    assert!(!captured[0].head.to_lowercase().contains("x-api-key"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sender =
        WebhookSender::new(&webhook_config(addr, None), &TimeoutConfig::default()).unwrap();

    let err = sender.send_test_webhook().await.unwrap_err();
    assert!(matches!(
        err,
        miniapp_checkout::diagnostics::ProbeError::Transport(_)
    ));
}
