use super::*;
use serde_json::json;
use voxnav_protocols::TransportError;

use crate::test_support::{MockBrowser, MockTransport};

fn args(label: &str) -> CommandArgs {
    let mut args = CommandArgs::new();
    args.insert("label".to_string(), json!(label));
    args
}

#[tokio::test]
async fn test_forward_delivers_to_active_tab() {
    let browser = Arc::new(MockBrowser::with_tabs(3, Some(2)));
    let transport = Arc::new(MockTransport::answering(PageResponse::ok_with("hints", 4)));
    let bridge = ContentBridge::new(browser, transport.clone());

    let ack = bridge
        .forward(PageCommand::ShowHints, CommandArgs::new())
        .await
        .unwrap();

    assert_eq!(ack, Ack::Done);
    let delivered = transport.delivered();
    assert_eq!(delivered[0].0.as_str(), "T2");
    assert_eq!(delivered[0].1.command, "show_hints");
}

#[tokio::test]
async fn test_forward_without_active_tab() {
    let browser = Arc::new(MockBrowser::with_tabs(2, None));
    let transport = Arc::new(MockTransport::answering(PageResponse::ok()));
    let bridge = ContentBridge::new(browser, transport.clone());

    let err = bridge
        .forward(PageCommand::ScrollDown, CommandArgs::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CommandError::NoActiveTab));
    assert_eq!(err.to_string(), "No active tab found");
    assert!(transport.delivered().is_empty());
}

#[tokio::test]
async fn test_forward_unreachable_page() {
    let browser = Arc::new(MockBrowser::with_tabs(1, Some(0)));
    let transport = Arc::new(MockTransport::unreachable(TransportError::NoListener(
        "T0".to_string(),
    )));
    let bridge = ContentBridge::new(browser, transport);

    let err = bridge
        .forward(PageCommand::HintClick, args("A"))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Content script not ready: "));
}

#[tokio::test]
async fn test_page_rejection_is_acknowledged() {
    let browser = Arc::new(MockBrowser::with_tabs(1, Some(0)));
    let transport = Arc::new(MockTransport::answering(PageResponse::rejected(
        "Unknown command",
    )));
    let bridge = ContentBridge::new(browser, transport);

    let ack = bridge
        .forward(PageCommand::JumpTop, CommandArgs::new())
        .await
        .unwrap();

    assert_eq!(ack, Ack::Done);
}
