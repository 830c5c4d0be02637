//! Drawing session: the explicit owner of style, surface, gesture, notices,
//! and the presence simulator.
//!
//! ARCHITECTURE
//! ============
//! The hosting component mounts one `Session` and routes every UI callback
//! (pointer events, layout changes, toolbar clicks) into it. There is no
//! ambient global state; everything a callback touches hangs off `self`.
//!
//! LIFECYCLE
//! =========
//! `mount` allocates the surface and starts the presence timer on the current
//! tokio runtime. `teardown` (or drop) stops the timer and releases the
//! buffer. After teardown, drawing is a no-op and clear/export report an
//! uninitialized surface.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use crate::color::{Color, ColorError};
use crate::config::SessionConfig;
use crate::engine::EngineCore;
use crate::geom::{Point, Rect, Size};
use crate::input::Event;
use crate::notice::{self, Notice, NoticeReceiver, NoticeSender};
use crate::presence::{PresenceSimulator, PresenceState};
use crate::style::{Tool, ToolChange};
use crate::surface::{SurfaceError, SurfaceManager};

/// Errors raised by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// `mount` was called outside a tokio runtime.
    #[error("no tokio runtime available to run the presence timer: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// An encoded snapshot ready for the host to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    /// PNG-encoded pixels.
    pub bytes: Vec<u8>,
}

/// Read-only view for toolbar and status UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub tool: Tool,
    pub color: Color,
    pub brush_size: u32,
    pub connected: bool,
    pub user_count: u32,
    pub drawing: bool,
    pub width: u32,
    pub height: u32,
}

pub struct Session {
    id: Uuid,
    core: EngineCore,
    notices: NoticeSender,
    presence: PresenceSimulator,
    export_file_name: String,
    mounted: bool,
}

impl Session {
    /// Mount a session on the current tokio runtime.
    ///
    /// Returns the session and the receiving end of its notice channel.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoRuntime`] outside a runtime, or
    /// [`SessionError::Surface`] if the surface cannot be allocated.
    pub fn mount(config: &SessionConfig, container: Size) -> Result<(Self, NoticeReceiver), SessionError> {
        let runtime = Handle::try_current()?;
        Self::mount_on(&runtime, config, container)
    }

    /// Mount a session whose presence timer runs on `runtime`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Surface`] if the surface cannot be allocated.
    pub fn mount_on(
        runtime: &Handle,
        config: &SessionConfig,
        container: Size,
    ) -> Result<(Self, NoticeReceiver), SessionError> {
        let id = Uuid::new_v4();
        let mut core = EngineCore::new(config.style());
        core.surface.initialize(container)?;

        let (notices, rx) = notice::channel();
        let presence = PresenceSimulator::spawn(runtime, config.presence());
        info!(session_id = %id, width = container.width, height = container.height, "session mounted");

        let session =
            Self { id, core, notices, presence, export_file_name: config.export_file_name.clone(), mounted: true };
        Ok((session, rx))
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    // --- Input events ---

    /// Feed one event through the drawing state machine; returns damaged areas.
    pub fn dispatch(&mut self, event: Event) -> Vec<Rect> {
        self.core.dispatch(event)
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> Vec<Rect> {
        self.core.on_pointer_down(Point::new(x, y))
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Vec<Rect> {
        self.core.on_pointer_move(Point::new(x, y))
    }

    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> Vec<Rect> {
        self.core.on_pointer_up(Point::new(x, y))
    }

    pub fn on_pointer_leave(&mut self, x: f64, y: f64) -> Vec<Rect> {
        self.core.on_pointer_leave(Point::new(x, y))
    }

    /// Layout-change notification from the host.
    pub fn on_resize(&mut self, size: Size) -> Vec<Rect> {
        self.core.on_resize(size)
    }

    // --- Style ---

    /// Toolbar click. Unavailable tools emit a notice and change nothing.
    pub fn select_tool(&mut self, tool: Tool) -> ToolChange {
        let change = self.core.style.set_tool(tool);
        match change {
            ToolChange::Unavailable(tool) => {
                debug!(session_id = %self.id, ?tool, "tool unavailable");
                self.notices.emit(Notice::ToolUnavailable { tool });
            }
            ToolChange::Changed { from, to } => debug!(session_id = %self.id, ?from, ?to, "tool changed"),
            ToolChange::Unchanged => {}
        }
        change
    }

    /// Color from the free-form picker.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] for malformed input; the color is unchanged.
    pub fn set_color(&mut self, raw: &str) -> Result<Color, ColorError> {
        self.core.style.set_color(raw)
    }

    /// Color from a palette swatch.
    pub fn set_color_value(&mut self, color: Color) {
        self.core.style.set_color_value(color);
    }

    /// Returns the stored (clamped) size.
    pub fn set_brush_size(&mut self, size: i64) -> u32 {
        self.core.style.set_brush_size(size)
    }

    // --- Surface ---

    /// Wipe the surface and tell the user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Surface`] after teardown.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.core.surface.clear()?;
        debug!(session_id = %self.id, "canvas cleared");
        self.notices.emit(Notice::CanvasCleared);
        Ok(())
    }

    /// Encode the current pixels for saving and tell the user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Surface`] after teardown, for a zero-sized
    /// surface, or when encoding fails.
    pub fn export_raster(&self) -> Result<Export, SessionError> {
        let bytes = self.core.surface.export_png()?;
        debug!(session_id = %self.id, bytes = bytes.len(), "canvas exported");
        self.notices.emit(Notice::ExportCompleted { file_name: self.export_file_name.clone() });
        Ok(Export { file_name: self.export_file_name.clone(), bytes })
    }

    #[must_use]
    pub fn surface(&self) -> &SurfaceManager {
        &self.core.surface
    }

    // --- Queries ---

    #[must_use]
    pub fn presence(&self) -> PresenceState {
        self.presence.snapshot()
    }

    /// Receiver that wakes whenever presence changes.
    #[must_use]
    pub fn subscribe_presence(&self) -> watch::Receiver<PresenceState> {
        self.presence.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let presence = self.presence.snapshot();
        let size = self.core.surface.size().unwrap_or_default();
        SessionSnapshot {
            session_id: self.id,
            tool: self.core.style.tool(),
            color: self.core.style.color(),
            brush_size: self.core.style.brush_size(),
            connected: presence.connected,
            user_count: presence.user_count,
            drawing: self.core.is_drawing(),
            width: size.width,
            height: size.height,
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Stop the presence timer and release the surface. Idempotent.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.presence.stop();
        self.core.surface.release();
        self.mounted = false;
        info!(session_id = %self.id, "session torn down");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}
