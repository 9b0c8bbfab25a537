//! Utility functions for coordinate mapping, rectangles, and palette lookup.
//!
//! This module provides:
//! - Pointer-to-surface coordinate mapping that corrects for display scaling
//! - Rectangle normalization for corner-to-corner drags
//! - Name/hex lookup into the stroke and fill palettes

use crate::draw::color::{FillColor, NamedColor, PALETTE};

// ============================================================================
// Geometry Utilities
// ============================================================================

/// A 2D point.
///
/// Pointer events carry device-space points; the engine converts them to
/// surface-local (backing pixel) points with [`to_surface_coords`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport (window drawable area) size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// On-screen placement of a surface, in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds covering a whole viewport anchored at the origin.
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self::new(0.0, 0.0, viewport.width as f64, viewport.height as f64)
    }
}

/// Backing resolution of a surface together with where it is shown on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub backing_width: i32,
    pub backing_height: i32,
    pub bounds: ScreenRect,
}

/// Maps a device-space pointer position to surface-local coordinates.
///
/// The surface's backing store may be larger or smaller than its on-screen
/// size (HiDPI scaling, CSS-style stretching), so the offset from the surface
/// origin is scaled by `backing / displayed` on each axis. A zero-sized
/// on-screen extent leaves that axis unscaled.
pub fn to_surface_coords(position: Point, geometry: &SurfaceGeometry) -> Point {
    let bounds = geometry.bounds;
    let scale_x = if bounds.width > 0.0 {
        geometry.backing_width as f64 / bounds.width
    } else {
        1.0
    };
    let scale_y = if bounds.height > 0.0 {
        geometry.backing_height as f64 / bounds.height
    } else {
        1.0
    };

    Point::new(
        (position.x - bounds.left) * scale_x,
        (position.y - bounds.top) * scale_y,
    )
}

/// Axis-aligned rectangle with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Normalizes an origin plus signed extents (as produced by dragging in
    /// any direction) into a rectangle with non-negative width and height.
    pub fn normalized(x: f64, y: f64, w: f64, h: f64) -> Self {
        let (x, width) = if w >= 0.0 { (x, w) } else { (x + w, -w) };
        let (y, height) = if h >= 0.0 { (y, h) } else { (y + h, -h) };
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// ============================================================================
// Palette Lookup
// ============================================================================

/// Maps a palette name or hex string to a stroke palette entry.
///
/// Matching is case-insensitive for both names ("Andes Sky") and hex
/// values ("#71dbd4").
pub fn name_to_color(name: &str) -> Option<NamedColor> {
    let needle = name.trim();
    PALETTE
        .iter()
        .find(|entry| {
            entry.name.eq_ignore_ascii_case(needle) || entry.hex.eq_ignore_ascii_case(needle)
        })
        .copied()
}

/// Maps a fill name to a fill palette entry.
///
/// `"none"`, `"No fill"` and `"transparent"` select the no-fill sentinel;
/// everything else is looked up in the stroke palette.
pub fn name_to_fill(name: &str) -> Option<FillColor> {
    let needle = name.trim();
    if needle.eq_ignore_ascii_case("none")
        || needle.eq_ignore_ascii_case(FillColor::NO_FILL_NAME)
        || needle.eq_ignore_ascii_case(FillColor::NO_FILL_HEX)
    {
        return Some(FillColor::NoFill);
    }
    name_to_color(needle).map(FillColor::Solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{ANDES_SKY, NEON_PURPLE};

    fn geometry(backing: (i32, i32), bounds: ScreenRect) -> SurfaceGeometry {
        SurfaceGeometry {
            backing_width: backing.0,
            backing_height: backing.1,
            bounds,
        }
    }

    #[test]
    fn surface_coords_identity_when_unscaled() {
        let geo = geometry((800, 600), ScreenRect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(
            to_surface_coords(Point::new(10.0, 20.0), &geo),
            Point::new(10.0, 20.0)
        );
    }

    #[test]
    fn surface_coords_correct_for_offset_and_scale() {
        // Backing store twice the displayed size, shown at (100, 50)
        let geo = geometry((800, 600), ScreenRect::new(100.0, 50.0, 400.0, 300.0));
        assert_eq!(
            to_surface_coords(Point::new(110.0, 60.0), &geo),
            Point::new(20.0, 20.0)
        );
    }

    #[test]
    fn surface_coords_ignore_zero_sized_bounds() {
        let geo = geometry((800, 600), ScreenRect::new(5.0, 5.0, 0.0, 0.0));
        assert_eq!(
            to_surface_coords(Point::new(15.0, 25.0), &geo),
            Point::new(10.0, 20.0)
        );
    }

    #[test]
    fn rect_normalizes_negative_extents() {
        let rect = Rect::normalized(50.0, 30.0, -50.0, -30.0);
        assert_eq!(rect, Rect::normalized(0.0, 0.0, 50.0, 30.0));
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0.0, 0.0, 50.0, 30.0));
    }

    #[test]
    fn palette_lookup_by_name_and_hex() {
        assert_eq!(name_to_color("andes sky"), Some(ANDES_SKY));
        assert_eq!(name_to_color("#c724b1"), Some(NEON_PURPLE));
        assert!(name_to_color("chartreuse").is_none());
    }

    #[test]
    fn fill_lookup_handles_sentinel() {
        assert_eq!(name_to_fill("none"), Some(FillColor::NoFill));
        assert_eq!(name_to_fill("No fill"), Some(FillColor::NoFill));
        assert_eq!(name_to_fill("transparent"), Some(FillColor::NoFill));
        assert_eq!(name_to_fill("Neon Purple"), Some(FillColor::Solid(NEON_PURPLE)));
        assert!(name_to_fill("chartreuse").is_none());
    }
}
