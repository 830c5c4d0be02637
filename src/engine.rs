//! Drawing engine: the stroke-capture state machine and its rendering policy.
//!
//! The transition function [`transition`] is pure: given the current
//! [`InputState`], an [`Event`], and the active [`StyleState`], it returns the
//! next state and the [`Action`]s to perform. [`EngineCore`] applies those
//! actions to a [`SurfaceManager`], so the state machine can be tested without
//! a surface and the surface without a state machine.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};

use crate::consts::ERASER_WIDTH_FACTOR;
use crate::geom::{Point, Rect, Size};
use crate::input::{Event, InputState, PointerEvent};
use crate::style::{StyleState, Tool};
use crate::surface::{Blend, Stroke, SurfaceError, SurfaceManager};

/// Side effects requested by [`transition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Render one incremental segment of the current path.
    StrokeSegment { from: Point, to: Point, stroke: Stroke },
    /// Reallocate the surface at the new container size.
    ResizeSurface(Size),
}

/// Stroke parameters for the active tool, or `None` if it does not draw.
#[must_use]
pub fn stroke_for(style: &StyleState) -> Option<Stroke> {
    let width = f64::from(style.brush_size());
    match style.tool() {
        Tool::Pen => Some(Stroke { color: style.color(), width, blend: Blend::SourceOver }),
        Tool::Eraser => Some(Stroke { color: style.color(), width: width * ERASER_WIDTH_FACTOR, blend: Blend::DestinationOut }),
        Tool::Rectangle | Tool::Circle => None,
    }
}

/// Advance the state machine by one event.
#[must_use]
pub fn transition(state: InputState, event: Event, style: &StyleState) -> (InputState, Vec<Action>) {
    match (state, event) {
        // A fresh down always starts a new path, even mid-stroke.
        (_, Event::Pointer(PointerEvent::Down { x, y })) => (InputState::Drawing { last: Point::new(x, y) }, vec![]),

        (InputState::Drawing { last }, Event::Pointer(PointerEvent::Move { x, y })) => {
            let to = Point::new(x, y);
            let actions = stroke_for(style)
                .map(|stroke| vec![Action::StrokeSegment { from: last, to, stroke }])
                .unwrap_or_default();
            (InputState::Drawing { last: to }, actions)
        }

        (InputState::Idle, Event::Pointer(PointerEvent::Move { .. })) => (InputState::Idle, vec![]),

        (_, Event::Pointer(PointerEvent::Up { .. } | PointerEvent::Leave { .. })) => (InputState::Idle, vec![]),

        // Resizing leaves the gesture alone; the path just loses its pixels.
        (state, Event::Resize(size)) => (state, vec![Action::ResizeSurface(size)]),
    }
}

/// Engine state that owns style, surface, and the active gesture.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub style: StyleState,
    pub surface: SurfaceManager,
    pub input: InputState,
}

impl EngineCore {
    #[must_use]
    pub fn new(style: StyleState) -> Self {
        Self { style, surface: SurfaceManager::new(), input: InputState::Idle }
    }

    /// Run one event through the state machine and apply its actions.
    ///
    /// Returns the surface areas that changed. Actions that hit an
    /// uninitialized surface are dropped.
    pub fn dispatch(&mut self, event: Event) -> Vec<Rect> {
        let (next, actions) = transition(self.input, event, &self.style);
        self.input = next;
        actions.into_iter().filter_map(|action| self.apply(action)).collect()
    }

    fn apply(&mut self, action: Action) -> Option<Rect> {
        let result = match action {
            Action::StrokeSegment { from, to, stroke } => self.surface.stroke_segment(from, to, stroke),
            Action::ResizeSurface(size) => self
                .surface
                .resize(size)
                .map(|()| Rect::covering(Point::new(0.0, 0.0), Point::new(f64::from(size.width), f64::from(size.height)), size)),
        };
        match result {
            Ok(damage) => damage,
            Err(SurfaceError::Uninitialized) => {
                debug!(?action, "surface not initialized; action dropped");
                None
            }
            Err(e) => {
                warn!(error = %e, ?action, "surface action failed");
                None
            }
        }
    }

    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Rect> {
        self.dispatch(PointerEvent::Down { x: pt.x, y: pt.y }.into())
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Rect> {
        self.dispatch(PointerEvent::Move { x: pt.x, y: pt.y }.into())
    }

    pub fn on_pointer_up(&mut self, pt: Point) -> Vec<Rect> {
        self.dispatch(PointerEvent::Up { x: pt.x, y: pt.y }.into())
    }

    pub fn on_pointer_leave(&mut self, pt: Point) -> Vec<Rect> {
        self.dispatch(PointerEvent::Leave { x: pt.x, y: pt.y }.into())
    }

    pub fn on_resize(&mut self, size: Size) -> Vec<Rect> {
        self.dispatch(Event::Resize(size))
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }
}
