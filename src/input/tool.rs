//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines which gesture a pointer-down starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand polyline committed segment by segment
    #[default]
    Line,
    /// Rectangle from corner to corner
    #[serde(alias = "rect")]
    Rectangle,
    /// Circle centered on the press position
    Circle,
    /// Axis-aligned ellipse centered on the press position
    Ellipse,
}

impl Tool {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Ellipse => "Ellipse",
        }
    }
}
