use super::*;

#[test]
fn emitted_notices_arrive_in_order() {
    let (tx, mut rx) = channel();
    tx.emit(Notice::CanvasCleared);
    tx.emit(Notice::ToolUnavailable { tool: Tool::Circle });
    assert_eq!(rx.try_recv().unwrap(), Notice::CanvasCleared);
    assert_eq!(rx.try_recv().unwrap(), Notice::ToolUnavailable { tool: Tool::Circle });
    assert!(rx.try_recv().is_err());
}

#[test]
fn emit_after_receiver_dropped_does_not_fail() {
    let (tx, rx) = channel();
    drop(rx);
    tx.emit(Notice::CanvasCleared);
}

#[test]
fn unavailable_tool_notice_names_the_tool() {
    let notice = Notice::ToolUnavailable { tool: Tool::Rectangle };
    assert_eq!(notice.title(), "Rectangle isn't available yet");
    assert!(!notice.description().is_empty());
}

#[test]
fn export_notice_mentions_file_name() {
    let notice = Notice::ExportCompleted { file_name: "art.png".into() };
    assert!(notice.description().contains("art.png"));
}

#[test]
fn notices_serialize_with_kind_tag() {
    let json = serde_json::to_value(Notice::ToolUnavailable { tool: Tool::Circle }).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "tool_unavailable", "tool": "circle" }));
    let json = serde_json::to_value(Notice::CanvasCleared).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "canvas_cleared" }));
}
