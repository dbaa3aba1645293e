use super::*;
use serde_json::json;

#[test]
fn test_page_command_names_round_trip() {
    for cmd in PageCommand::ALL {
        assert_eq!(PageCommand::from_name(cmd.as_str()), Some(cmd));
    }
}

#[test]
fn test_page_command_unknown() {
    assert_eq!(PageCommand::from_name("back"), None);
    assert_eq!(PageCommand::from_name("SCROLL_UP"), None);
}

#[test]
fn test_page_command_serde_matches_name() {
    let json = serde_json::to_string(&PageCommand::HintClick).unwrap();
    assert_eq!(json, "\"hint_click\"");
}

#[test]
fn test_string_arg() {
    let args = json!({"url": "https://example.com", "blank": "  ", "n": 3});
    let args = args.as_object().unwrap();
    assert_eq!(string_arg(args, "url"), Some("https://example.com"));
    assert_eq!(string_arg(args, "blank"), None);
    assert_eq!(string_arg(args, "n"), None);
    assert_eq!(string_arg(args, "missing"), None);
}

#[test]
fn test_scope_serialization() {
    assert_eq!(serde_json::to_string(&CommandScope::Page).unwrap(), "\"page\"");
}
