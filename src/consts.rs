//! Shared constants for the sketchboard crate.

use std::time::Duration;

// ── Brush ───────────────────────────────────────────────────────

/// Smallest brush diameter in pixels.
pub const MIN_BRUSH_SIZE: u32 = 1;

/// Largest brush diameter in pixels.
pub const MAX_BRUSH_SIZE: u32 = 30;

/// Brush diameter a fresh session starts with.
pub const DEFAULT_BRUSH_SIZE: u32 = 3;

/// Eraser strokes are this many times wider than the pen at the same size.
pub const ERASER_WIDTH_FACTOR: f64 = 2.0;

/// Quick-pick sizes offered next to the free slider.
pub const BRUSH_PRESETS: [u32; 8] = [1, 2, 3, 5, 8, 12, 16, 20];

// ── Color ───────────────────────────────────────────────────────

/// Stroke color a fresh session starts with.
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// Preset swatches, in toolbar order.
pub const PALETTE: [&str; 12] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16", "#f97316", "#6366f1",
    "#14b8a6", "#eab308",
];

// ── Rendering ───────────────────────────────────────────────────

/// Width in pixels of the soft edge around every stroke.
pub const ANTIALIAS_PX: f64 = 1.0;

// ── Presence ────────────────────────────────────────────────────

/// Period between presence simulator ticks.
pub const PRESENCE_INTERVAL: Duration = Duration::from_millis(3000);

/// Collaborator count shown when a session mounts.
pub const DEFAULT_USER_COUNT: u32 = 3;

/// A tick reports "connected" when a uniform sample exceeds this.
pub const DISCONNECT_THRESHOLD: f64 = 0.1;

// ── Export ──────────────────────────────────────────────────────

/// File name suggested to the host when saving an export.
pub const EXPORT_FILE_NAME: &str = "whiteboard-creation.png";
