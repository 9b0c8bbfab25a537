//! Rendering primitives, surfaces, and snapshot history (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`], [`NamedColor`], [`FillColor`]: palette colors and the no-fill sentinel
//! - [`Shape`]: geometry produced by each tool from a drag
//! - [`DrawingSurface`]: committed + preview raster surfaces with snapshot/restore
//! - [`History`]: bounded snapshot stack used for undo

pub mod color;
pub mod history;
pub mod render;
pub mod shape;
pub mod style;
pub mod surface;

// Re-export commonly used types at module level
pub use color::{Color, FillColor, NamedColor, PALETTE};
pub use history::{HISTORY_CAPACITY, History};
pub use render::render_shape;
pub use shape::{Shape, circle_radius};
pub use style::{DrawStyle, StrokeWidth, StrokeWidthError};
pub use surface::{DrawingSurface, Layer, Snapshot, SurfaceError};
