use super::*;
use serde_json::json;
use voxnav_protocols::{AckValue, MessageKind, PageResponse, TransportError};

use crate::bridge::ContentBridge;
use crate::test_support::{MockBrowser, MockTransport};

fn dispatcher_with(browser: Arc<MockBrowser>, transport: Arc<MockTransport>) -> Dispatcher {
    let bridge = Arc::new(ContentBridge::new(browser.clone(), transport));
    let registry = CommandRegistry::with_defaults(browser, bridge).unwrap();
    Dispatcher::new(Arc::new(registry))
}

fn dispatcher(browser: Arc<MockBrowser>) -> Dispatcher {
    dispatcher_with(browser, Arc::new(MockTransport::answering(PageResponse::ok())))
}

fn assert_ack(response: Option<ProtocolMessage>, id: Value) {
    let response = response.expect("expected a response");
    assert_eq!(response.kind, MessageKind::Ack);
    assert_eq!(response.id.as_value(), &id);
    assert_eq!(response.ok, Some(AckValue::Flag(true)));
}

fn assert_error(response: Option<ProtocolMessage>, id: Value, message: &str) {
    let response = response.expect("expected a response");
    assert_eq!(response.kind, MessageKind::Error);
    assert_eq!(response.id.as_value(), &id);
    assert_eq!(response.message.as_deref(), Some(message));
}

#[tokio::test]
async fn test_ping_pong() {
    let d = dispatcher(Arc::new(MockBrowser::new()));

    let response = d.dispatch(json!({"type": "ping", "id": "p1"})).await.unwrap();

    assert_eq!(
        response.to_value().unwrap(),
        json!({"type": "ack", "id": "p1", "ok": "pong"})
    );
}

#[tokio::test]
async fn test_message_without_type_dropped() {
    let d = dispatcher(Arc::new(MockBrowser::new()));

    assert!(d.dispatch(json!({"id": 1, "name": "back"})).await.is_none());
    assert!(d.dispatch(json!({"type": 5, "id": 1})).await.is_none());
    assert!(d.dispatch(json!("back")).await.is_none());
}

#[tokio::test]
async fn test_command_without_name_dropped() {
    let browser = Arc::new(MockBrowser::with_tabs(1, Some(0)));
    let d = dispatcher(browser.clone());

    assert!(d.dispatch(json!({"type": "command", "id": 3})).await.is_none());
    assert!(browser.calls().is_empty());
}

#[tokio::test]
async fn test_other_types_ignored() {
    let d = dispatcher(Arc::new(MockBrowser::new()));

    for kind in ["ack", "error", "ready"] {
        assert!(d.dispatch(json!({"type": kind, "id": 9})).await.is_none());
    }
}

#[tokio::test]
async fn test_unknown_command() {
    let d = dispatcher(Arc::new(MockBrowser::new()));

    let response = d
        .dispatch(json!({"type": "command", "id": 7, "name": "fly"}))
        .await;

    assert_error(response, json!(7), "Unknown command: fly");
}

#[tokio::test]
async fn test_empty_name_is_unknown_command() {
    let browser = Arc::new(MockBrowser::with_tabs(1, Some(0)));
    let d = dispatcher(browser.clone());

    let response = d
        .dispatch(json!({"type": "command", "id": 11, "name": ""}))
        .await;

    assert_error(response, json!(11), "Unknown command: ");
    assert!(browser.calls().is_empty());
}

#[tokio::test]
async fn test_navigation_is_acked() {
    let browser = Arc::new(MockBrowser::with_tabs(2, Some(0)));
    let d = dispatcher(browser.clone());

    let response = d
        .dispatch(json!({"type": "command", "id": "n1", "name": "back"}))
        .await;

    assert_ack(response, json!("n1"));
    assert_eq!(browser.calls(), vec!["back:T0"]);
}

#[tokio::test]
async fn test_navigation_without_tab_still_acked() {
    let browser = Arc::new(MockBrowser::with_tabs(0, None));
    let d = dispatcher(browser);

    let response = d
        .dispatch(json!({"type": "command", "id": 2, "name": "reload"}))
        .await;

    assert_ack(response, json!(2));
}

#[tokio::test]
async fn test_tab_cycle_through_dispatch() {
    let browser = Arc::new(MockBrowser::with_tabs(3, Some(2)));
    let d = dispatcher(browser.clone());

    d.dispatch(json!({"type": "command", "id": 1, "name": "next_tab"}))
        .await;
    assert_eq!(browser.active_id().as_deref(), Some("T0"));

    d.dispatch(json!({"type": "command", "id": 2, "name": "previous_tab"}))
        .await;
    assert_eq!(browser.active_id().as_deref(), Some("T2"));
}

#[tokio::test]
async fn test_open_url_missing_argument() {
    let browser = Arc::new(MockBrowser::new());
    let d = dispatcher(browser.clone());

    let response = d
        .dispatch(json!({"type": "command", "id": 4, "name": "open_url", "args": {}}))
        .await;

    assert_error(response, json!(4), "URL not provided");
    assert!(browser.calls().is_empty());
}

#[tokio::test]
async fn test_hint_click_missing_label() {
    let browser = Arc::new(MockBrowser::with_tabs(1, Some(0)));
    let transport = Arc::new(MockTransport::answering(PageResponse::ok()));
    let d = dispatcher_with(browser, transport.clone());

    let response = d
        .dispatch(json!({"type": "command", "id": 5, "name": "hint_click"}))
        .await;

    assert_error(response, json!(5), "Hint label not provided");
    assert!(transport.delivered().is_empty());
}

#[tokio::test]
async fn test_page_command_without_tab() {
    let d = dispatcher(Arc::new(MockBrowser::with_tabs(1, None)));

    let response = d
        .dispatch(json!({"type": "command", "id": 6, "name": "scroll_down"}))
        .await;

    assert_error(response, json!(6), "No active tab found");
}

#[tokio::test]
async fn test_page_command_unreachable() {
    let browser = Arc::new(MockBrowser::with_tabs(1, Some(0)));
    let transport = Arc::new(MockTransport::unreachable(TransportError::Closed));
    let d = dispatcher_with(browser, transport);

    let response = d
        .dispatch(json!({"type": "command", "id": 8, "name": "show_hints"}))
        .await
        .unwrap();

    assert_eq!(response.kind, MessageKind::Error);
    let message = response.message.unwrap();
    assert!(message.starts_with("Content script not ready: "), "{}", message);
}

#[tokio::test]
async fn test_hint_click_miss_is_acked() {
    let browser = Arc::new(MockBrowser::with_tabs(1, Some(0)));
    let transport = Arc::new(MockTransport::answering(PageResponse::ok_with("found", false)));
    let d = dispatcher_with(browser, transport);

    let response = d
        .dispatch(json!({"type": "command", "id": "c", "name": "hint_click", "args": {"label": "zz"}}))
        .await;

    assert_ack(response, json!("c"));
}

#[tokio::test]
async fn test_browser_failure_is_reported() {
    let browser = Arc::new(MockBrowser::new());
    browser.fail_next("window closed");
    let d = dispatcher(browser);

    let response = d
        .dispatch(json!({"type": "command", "id": 10, "name": "new_tab"}))
        .await;

    assert_error(response, json!(10), "Browser operation failed: window closed");
}
