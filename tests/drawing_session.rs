//! End-to-end session behavior through the public API, the way a host UI
//! drives it: mount, feed events, read snapshots, drain notices, tear down.

use sketchboard::geom::Size;
use sketchboard::input::{Event, PointerEvent};
use sketchboard::notice::Notice;
use sketchboard::style::{Tool, ToolChange};
use sketchboard::{Session, SessionConfig};

fn config() -> SessionConfig {
    SessionConfig { presence_seed: Some(2024), ..SessionConfig::default() }
}

#[tokio::test(start_paused = true)]
async fn whiteboard_round_trip() {
    let (mut session, mut notices) = Session::mount(&config(), Size::new(120, 80)).unwrap();

    // Host wiring: DOM events arrive as JSON from the page.
    let events = [
        r#"{"type":"down","x":10,"y":10}"#,
        r#"{"type":"move","x":60,"y":40}"#,
        r#"{"type":"move","x":110,"y":70}"#,
        r#"{"type":"up","x":110,"y":70}"#,
    ];
    for raw in events {
        let event: PointerEvent = serde_json::from_str(raw).unwrap();
        session.dispatch(Event::Pointer(event));
    }
    assert!(!session.surface().is_blank());
    assert!(!session.snapshot().drawing);

    // Shape tools are offered but do nothing beyond a notice.
    assert_eq!(session.select_tool(Tool::Rectangle), ToolChange::Unavailable(Tool::Rectangle));
    assert_eq!(session.snapshot().tool, Tool::Pen);
    assert!(matches!(notices.try_recv().unwrap(), Notice::ToolUnavailable { tool: Tool::Rectangle }));

    let export = session.export_raster().unwrap();
    assert_eq!(export.file_name, "whiteboard-creation.png");
    assert!(matches!(notices.try_recv().unwrap(), Notice::ExportCompleted { .. }));

    session.clear().unwrap();
    assert!(session.surface().is_blank());
    assert_eq!(notices.try_recv().unwrap(), Notice::CanvasCleared);

    // Presence keeps ticking on its own.
    let mut presence = session.subscribe_presence();
    for _ in 0..10 {
        presence.changed().await.unwrap();
        assert!(presence.borrow().user_count >= 1);
    }

    session.teardown();
    assert!(presence.changed().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn window_resize_discards_the_drawing() {
    let (mut session, _notices) = Session::mount(&config(), Size::new(100, 100)).unwrap();
    session.on_pointer_down(10.0, 50.0);
    session.on_pointer_move(90.0, 50.0);
    session.on_pointer_up(90.0, 50.0);
    assert!(!session.surface().is_blank());

    session.on_resize(Size::new(200, 150));
    assert!(session.surface().is_blank());
    let snap = session.snapshot();
    assert_eq!((snap.width, snap.height), (200, 150));
}
