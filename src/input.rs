//! Input model: host events and the stroke-capture state machine's states.
//!
//! This module defines the types consumed by the drawing engine. `Event` is
//! everything the host can feed into the transition function: pointer events
//! carrying surface-relative coordinates, and the layout-change notification.
//! `InputState` is the gesture tracked between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Size};

/// Pointer event kinds, each carrying a surface-relative coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Button pressed over the surface.
    Down { x: f64, y: f64 },
    /// Pointer moved over the surface.
    Move { x: f64, y: f64 },
    /// Button released.
    Up { x: f64, y: f64 },
    /// Pointer left the surface.
    Leave { x: f64, y: f64 },
}

impl PointerEvent {
    /// The event's surface-relative position.
    #[must_use]
    pub fn point(self) -> Point {
        match self {
            Self::Down { x, y } | Self::Move { x, y } | Self::Up { x, y } | Self::Leave { x, y } => Point::new(x, y),
        }
    }
}

/// Everything the drawing engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Pointer(PointerEvent),
    /// The hosting container changed size.
    Resize(Size),
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

/// State of the stroke-capture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No stroke in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A stroke is in progress.
    Drawing {
        /// End of the path so far; the next move draws from here.
        last: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}
