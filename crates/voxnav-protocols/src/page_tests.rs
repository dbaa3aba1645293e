use super::*;
use serde_json::json;

#[test]
fn test_page_request_wire_shape() {
    let mut args = CommandArgs::new();
    args.insert("label".to_string(), json!("AB"));
    let req = PageRequest::new(PageCommand::HintClick, args);
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value, json!({"command": "hint_click", "args": {"label": "AB"}}));
}

#[test]
fn test_page_request_missing_args() {
    let req: PageRequest = serde_json::from_value(json!({"command": "jump_top"})).unwrap();
    assert!(req.args.is_empty());
}

#[test]
fn test_page_response_ok_shape() {
    let value = serde_json::to_value(PageResponse::ok_with("hints", 3)).unwrap();
    assert_eq!(value, json!({"ok": true, "hints": 3}));
}

#[test]
fn test_page_response_rejected_round_trip() {
    let resp: PageResponse = serde_json::from_value(json!({"error": "Unknown command"})).unwrap();
    assert_eq!(resp, PageResponse::rejected("Unknown command"));
    assert!(!resp.is_ok());
}

#[test]
fn test_page_response_ok_parse() {
    let resp: PageResponse = serde_json::from_value(json!({"ok": true})).unwrap();
    assert!(resp.is_ok());
}
