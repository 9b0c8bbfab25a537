//! Stroke width and the per-call drawing style.

use super::color::{Color, FillColor, NamedColor};
use thiserror::Error;

/// Stroke width restricted to the discrete set offered by the width picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrokeWidth(u32);

/// Returned when a width outside [`StrokeWidth::ALLOWED`] is requested.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("stroke width {0} is not one of 5, 10, 15, 20")]
pub struct StrokeWidthError(pub u32);

impl StrokeWidth {
    pub const ALLOWED: [u32; 4] = [5, 10, 15, 20];

    /// Creates a stroke width, rejecting values outside the allowed set.
    pub fn new(width: u32) -> Result<Self, StrokeWidthError> {
        if Self::ALLOWED.contains(&width) {
            Ok(Self(width))
        } else {
            Err(StrokeWidthError(width))
        }
    }

    /// Snaps an arbitrary value to the closest allowed width (ties go to the smaller one).
    pub fn nearest(width: u32) -> Self {
        let mut best = Self::ALLOWED[0];
        for candidate in Self::ALLOWED {
            if candidate.abs_diff(width) < best.abs_diff(width) {
                best = candidate;
            }
        }
        Self(best)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl Default for StrokeWidth {
    fn default() -> Self {
        Self(Self::ALLOWED[0])
    }
}

impl TryFrom<u32> for StrokeWidth {
    type Error = StrokeWidthError;

    fn try_from(width: u32) -> Result<Self, Self::Error> {
        Self::new(width)
    }
}

/// Everything a primitive needs to paint: stroke, optional fill, and width.
///
/// Primitives apply the whole style inside one saved/restored Cairo state,
/// so a style never leaks into the next call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub stroke: Color,
    pub fill: Option<Color>,
    pub width: f64,
}

impl DrawStyle {
    pub fn new(stroke: NamedColor, fill: FillColor, width: StrokeWidth) -> Self {
        Self {
            stroke: stroke.color,
            fill: fill.color(),
            width: width.as_f64(),
        }
    }
}
