//! Style state: the active tool, stroke color, and brush size.
//!
//! DESIGN
//! ======
//! A plain value owned by the session and mutated only through setters.
//! Shape tools are recognized so the toolbar can offer them, but the tool
//! setter refuses to store them: the active tool is always pen or eraser.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorError};
use crate::consts::{DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};

/// Every tool the toolbar knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand painting (default).
    #[default]
    Pen,
    /// Freehand erasing.
    Eraser,
    /// Rectangle shape (not available).
    Rectangle,
    /// Circle shape (not available).
    Circle,
}

impl Tool {
    /// Toolbar order.
    pub const ALL: [Tool; 4] = [Tool::Pen, Tool::Eraser, Tool::Rectangle, Tool::Circle];

    /// Whether selecting this tool changes drawing behavior.
    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Pen | Self::Eraser)
    }

    /// Human-readable toolbar label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Eraser => "Eraser",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
        }
    }
}

/// Outcome of [`StyleState::set_tool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolChange {
    /// The requested tool is now active.
    Changed { from: Tool, to: Tool },
    /// The requested tool was already active.
    Unchanged,
    /// The requested tool is not available; the previous tool stays active.
    Unavailable(Tool),
}

/// Current tool, color, and brush size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleState {
    tool: Tool,
    color: Color,
    brush_size: u32,
}

impl Default for StyleState {
    fn default() -> Self {
        Self { tool: Tool::Pen, color: Color::rgb(0x3b, 0x82, 0xf6), brush_size: DEFAULT_BRUSH_SIZE }
    }
}

impl StyleState {
    /// Build a style with the given color and brush size (clamped).
    #[must_use]
    pub fn new(color: Color, brush_size: i64) -> Self {
        Self { tool: Tool::Pen, color, brush_size: clamp_brush_size(brush_size) }
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Make `tool` active. Unavailable tools leave the current tool in place.
    pub fn set_tool(&mut self, tool: Tool) -> ToolChange {
        if !tool.is_available() {
            return ToolChange::Unavailable(tool);
        }
        if tool == self.tool {
            return ToolChange::Unchanged;
        }
        let from = self.tool;
        self.tool = tool;
        ToolChange::Changed { from, to: tool }
    }

    /// Parse and store a color. Malformed input leaves the color unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] if `raw` is not a well-formed color.
    pub fn set_color(&mut self, raw: &str) -> Result<Color, ColorError> {
        let color = raw.parse::<Color>()?;
        self.color = color;
        Ok(color)
    }

    /// Store an already-parsed color (palette swatches).
    pub fn set_color_value(&mut self, color: Color) {
        self.color = color;
    }

    /// Store a brush size clamped to the supported range; returns the stored value.
    pub fn set_brush_size(&mut self, size: i64) -> u32 {
        self.brush_size = clamp_brush_size(size);
        self.brush_size
    }
}

/// Clamp an arbitrary integer to `[MIN_BRUSH_SIZE, MAX_BRUSH_SIZE]`.
#[must_use]
pub fn clamp_brush_size(size: i64) -> u32 {
    let clamped = size.clamp(i64::from(MIN_BRUSH_SIZE), i64::from(MAX_BRUSH_SIZE));
    u32::try_from(clamped).unwrap_or(MIN_BRUSH_SIZE)
}

/// Diameter of the brush preview dot on the toolbar button.
#[must_use]
pub fn toolbar_indicator_px(brush_size: u32) -> u32 {
    (brush_size * 2).clamp(4, 16)
}

/// Diameter of the dot drawn next to a preset in the size picker.
#[must_use]
pub fn preset_dot_px(size: u32) -> u32 {
    size.clamp(2, 12)
}
