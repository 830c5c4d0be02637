use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = SessionConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, SessionConfig::default());
    assert_eq!(cfg.color.to_hex(), "#3b82f6");
    assert_eq!(cfg.brush_size, 3);
    assert_eq!(cfg.presence_interval, Duration::from_secs(3));
    assert_eq!(cfg.initial_users, 3);
    assert_eq!(cfg.presence_seed, None);
    assert_eq!(cfg.export_file_name, "whiteboard-creation.png");
}

#[test]
fn overrides_are_applied() {
    let cfg = SessionConfig::from_lookup(lookup(&[
        ("SKETCHBOARD_COLOR", "#ef4444"),
        ("SKETCHBOARD_BRUSH_SIZE", "12"),
        ("SKETCHBOARD_PRESENCE_INTERVAL_MS", "500"),
        ("SKETCHBOARD_INITIAL_USERS", "8"),
        ("SKETCHBOARD_PRESENCE_SEED", "1234"),
        ("SKETCHBOARD_EXPORT_FILE_NAME", " sketch.png "),
    ]))
    .unwrap();
    assert_eq!(cfg.color, Color::rgb(0xef, 0x44, 0x44));
    assert_eq!(cfg.brush_size, 12);
    assert_eq!(cfg.presence_interval, Duration::from_millis(500));
    assert_eq!(cfg.initial_users, 8);
    assert_eq!(cfg.presence_seed, Some(1234));
    assert_eq!(cfg.export_file_name, "sketch.png");
}

#[test]
fn brush_size_is_clamped() {
    let cfg = SessionConfig::from_lookup(lookup(&[("SKETCHBOARD_BRUSH_SIZE", "45")])).unwrap();
    assert_eq!(cfg.brush_size, 30);
    let cfg = SessionConfig::from_lookup(lookup(&[("SKETCHBOARD_BRUSH_SIZE", "-3")])).unwrap();
    assert_eq!(cfg.brush_size, 1);
}

#[test]
fn unparseable_numbers_fall_back_to_defaults() {
    let cfg = SessionConfig::from_lookup(lookup(&[
        ("SKETCHBOARD_BRUSH_SIZE", "big"),
        ("SKETCHBOARD_PRESENCE_INTERVAL_MS", "soon"),
        ("SKETCHBOARD_INITIAL_USERS", "-2"),
        ("SKETCHBOARD_PRESENCE_SEED", "random"),
    ]))
    .unwrap();
    assert_eq!(cfg.brush_size, 3);
    assert_eq!(cfg.presence_interval, Duration::from_secs(3));
    assert_eq!(cfg.initial_users, 3);
    assert_eq!(cfg.presence_seed, None);
}

#[test]
fn zero_initial_users_becomes_one() {
    let cfg = SessionConfig::from_lookup(lookup(&[("SKETCHBOARD_INITIAL_USERS", "0")])).unwrap();
    assert_eq!(cfg.initial_users, 1);
}

#[test]
fn malformed_color_is_an_error() {
    let err = SessionConfig::from_lookup(lookup(&[("SKETCHBOARD_COLOR", "teal")])).unwrap_err();
    assert!(matches!(err, ConfigError::Color(_)));
}

#[test]
fn zero_interval_is_an_error() {
    let err = SessionConfig::from_lookup(lookup(&[("SKETCHBOARD_PRESENCE_INTERVAL_MS", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroInterval));
}

#[test]
fn blank_file_name_is_an_error() {
    let err = SessionConfig::from_lookup(lookup(&[("SKETCHBOARD_EXPORT_FILE_NAME", "  ")])).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyFileName));
}

#[test]
fn style_and_presence_follow_config() {
    let cfg = SessionConfig { brush_size: 9, initial_users: 4, presence_seed: Some(2), ..SessionConfig::default() };
    let style = cfg.style();
    assert_eq!(style.brush_size(), 9);
    assert_eq!(style.color(), cfg.color);
    let presence = cfg.presence();
    assert_eq!(presence.initial, PresenceState::new(4));
    assert_eq!(presence.seed, Some(2));
    assert_eq!(presence.interval, cfg.presence_interval);
}
