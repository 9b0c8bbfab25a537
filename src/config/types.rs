//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool and style in effect when the drawing surface first
/// becomes ready. Users change them at runtime through palette events.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool selected at startup (line, rectangle, circle, ellipse)
    #[serde(default)]
    pub default_tool: Tool,

    /// Stroke color - a palette name ("Neon Purple") or its hex value
    #[serde(default = "default_stroke_color")]
    pub default_stroke_color: ColorSpec,

    /// Fill color - a palette name, its hex value, or "none"
    #[serde(default = "default_fill_color")]
    pub default_fill_color: ColorSpec,

    /// Stroke width in pixels (one of 5, 10, 15, 20; other values are snapped)
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: u32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: Tool::default(),
            default_stroke_color: default_stroke_color(),
            default_fill_color: default_fill_color(),
            default_stroke_width: default_stroke_width(),
        }
    }
}

/// Canvas settings for the headless host.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Initial viewport width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Initial viewport height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Background painted under the drawing when exporting PNGs
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_stroke_color() -> ColorSpec {
    ColorSpec::Name("Neon Purple".to_string())
}

fn default_fill_color() -> ColorSpec {
    ColorSpec::Name("none".to_string())
}

fn default_stroke_width() -> u32 {
    5
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}
