//! Notice channel: ephemeral, human-readable messages for the host UI.
//!
//! DESIGN
//! ======
//! Fire-and-forget. The session pushes into an unbounded queue and never
//! waits; a host that dropped its receiver simply stops seeing notices.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::style::Tool;

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The surface was wiped.
    CanvasCleared,
    /// An export finished and is ready to save.
    ExportCompleted { file_name: String },
    /// The user picked a tool that does not draw yet.
    ToolUnavailable { tool: Tool },
}

impl Notice {
    /// Short headline for a toast.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::CanvasCleared => "Canvas cleared".into(),
            Self::ExportCompleted { .. } => "Downloaded".into(),
            Self::ToolUnavailable { tool } => format!("{} isn't available yet", tool.label()),
        }
    }

    /// Longer body text for a toast.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CanvasCleared => "Your whiteboard is clean and ready for new ideas.".into(),
            Self::ExportCompleted { file_name } => format!("Saved {file_name} to your device."),
            Self::ToolUnavailable { .. } => "Pen and eraser are the only drawing tools for now.".into(),
        }
    }
}

/// Sending half of the notice channel.
#[derive(Debug, Clone)]
pub struct NoticeSender {
    tx: mpsc::UnboundedSender<Notice>,
}

/// Receiving half of the notice channel, held by the host UI.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Create a connected notice sender/receiver pair.
#[must_use]
pub fn channel() -> (NoticeSender, NoticeReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NoticeSender { tx }, rx)
}

impl NoticeSender {
    /// Queue a notice. Never blocks and never fails.
    pub fn emit(&self, notice: Notice) {
        if let Err(mpsc::error::SendError(notice)) = self.tx.send(notice) {
            debug!(?notice, "notice receiver dropped; notice discarded");
        }
    }
}
