//! Committed and preview raster surfaces.
//!
//! [`DrawingSurface`] owns two equally-sized ARGB32 Cairo image surfaces:
//! the committed surface holds finished drawing output, the preview surface
//! holds the in-progress shape of the current gesture. The host composites
//! preview over committed when presenting.

use super::color::Color;
use super::shape::Shape;
use super::style::DrawStyle;
use super::render::render_shape;
use crate::util::{Point, ScreenRect, SurfaceGeometry, Viewport};
use cairo::{Context, Format, ImageSurface, Operator};
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by surface allocation, drawing, and pixel transfer.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface pixels unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error(
        "Committed ({committed_width}x{committed_height}) and preview \
         ({preview_width}x{preview_height}) sizes differ"
    )]
    SizeMismatch {
        committed_width: i32,
        committed_height: i32,
        preview_width: i32,
        preview_height: i32,
    },

    #[error("Unsupported surface format {0:?}, expected ARGB32")]
    UnsupportedFormat(Format),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
}

/// Which of the two surfaces a primitive targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Committed,
    Preview,
}

/// Immutable capture of the committed surface's pixels.
///
/// The buffer is shared, so cloning a snapshot never copies pixel data and
/// no holder can mutate it after capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: i32,
    height: i32,
    stride: i32,
    data: Arc<[u8]>,
}

impl Snapshot {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the premultiplied ARGB32 value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride as usize + x as usize * 4;
        let bytes = self.data.get(offset..offset + 4)?;
        Some(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Returns true when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|byte| *byte == 0)
    }
}

/// The pair of raster surfaces the engine draws on.
#[derive(Debug)]
pub struct DrawingSurface {
    committed: ImageSurface,
    preview: ImageSurface,
    bounds: ScreenRect,
}

impl DrawingSurface {
    /// Allocates a committed/preview pair shown unscaled at the origin.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        let (committed, preview) = allocate_pair(width, height)?;
        Ok(Self {
            committed,
            preview,
            bounds: ScreenRect::new(0.0, 0.0, width as f64, height as f64),
        })
    }

    /// Wraps surfaces provided by a host, validating that they can be paired.
    pub fn from_surfaces(
        committed: ImageSurface,
        preview: ImageSurface,
        bounds: ScreenRect,
    ) -> Result<Self, SurfaceError> {
        for surface in [&committed, &preview] {
            if surface.format() != Format::ARgb32 {
                return Err(SurfaceError::UnsupportedFormat(surface.format()));
            }
        }

        if committed.width() != preview.width() || committed.height() != preview.height() {
            return Err(SurfaceError::SizeMismatch {
                committed_width: committed.width(),
                committed_height: committed.height(),
                preview_width: preview.width(),
                preview_height: preview.height(),
            });
        }

        if committed.width() <= 0 || committed.height() <= 0 {
            return Err(SurfaceError::InvalidSize {
                width: committed.width(),
                height: committed.height(),
            });
        }

        Ok(Self {
            committed,
            preview,
            bounds,
        })
    }

    /// Backing width in pixels.
    pub fn width(&self) -> i32 {
        self.committed.width()
    }

    /// Backing height in pixels.
    pub fn height(&self) -> i32 {
        self.committed.height()
    }

    pub fn committed(&self) -> &ImageSurface {
        &self.committed
    }

    pub fn preview(&self) -> &ImageSurface {
        &self.preview
    }

    /// Where the surface is shown on screen.
    pub fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: ScreenRect) {
        self.bounds = bounds;
    }

    /// Backing size plus on-screen bounds, for pointer coordinate mapping.
    pub fn geometry(&self) -> SurfaceGeometry {
        SurfaceGeometry {
            backing_width: self.width(),
            backing_height: self.height(),
            bounds: self.bounds,
        }
    }

    fn target(&self, layer: Layer) -> &ImageSurface {
        match layer {
            Layer::Committed => &self.committed,
            Layer::Preview => &self.preview,
        }
    }

    /// Draws any shape onto the requested layer.
    pub fn draw_shape(
        &self,
        shape: &Shape,
        style: &DrawStyle,
        layer: Layer,
    ) -> Result<(), SurfaceError> {
        let ctx = Context::new(self.target(layer))?;
        render_shape(&ctx, shape, style)?;
        Ok(())
    }

    pub fn draw_line(
        &self,
        anchor: Point,
        point: Point,
        style: &DrawStyle,
        layer: Layer,
    ) -> Result<(), SurfaceError> {
        self.draw_shape(&Shape::line(anchor, point), style, layer)
    }

    pub fn draw_rect(
        &self,
        anchor: Point,
        point: Point,
        style: &DrawStyle,
        layer: Layer,
    ) -> Result<(), SurfaceError> {
        self.draw_shape(&Shape::rect(anchor, point), style, layer)
    }

    pub fn draw_circle(
        &self,
        anchor: Point,
        point: Point,
        style: &DrawStyle,
        layer: Layer,
    ) -> Result<(), SurfaceError> {
        self.draw_shape(&Shape::circle(anchor, point), style, layer)
    }

    pub fn draw_ellipse(
        &self,
        anchor: Point,
        point: Point,
        style: &DrawStyle,
        layer: Layer,
    ) -> Result<(), SurfaceError> {
        self.draw_shape(&Shape::ellipse(anchor, point), style, layer)
    }

    /// Erases the preview surface to full transparency.
    pub fn clear_preview(&self) -> Result<(), SurfaceError> {
        let ctx = Context::new(&self.preview)?;
        ctx.set_operator(Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Captures the committed surface's full pixel buffer.
    pub fn snapshot(&self) -> Result<Snapshot, SurfaceError> {
        self.capture(Layer::Committed)
    }

    /// Captures either layer's full pixel buffer.
    pub fn capture(&self, layer: Layer) -> Result<Snapshot, SurfaceError> {
        let surface = self.target(layer);
        let mut bytes = Vec::new();
        surface.with_data(|data| bytes.extend_from_slice(data))?;

        Ok(Snapshot {
            width: surface.width(),
            height: surface.height(),
            stride: surface.stride(),
            data: bytes.into(),
        })
    }

    /// Replaces the committed surface's pixels with a snapshot.
    ///
    /// The snapshot is placed at the origin; area outside it becomes
    /// transparent, which matters after a resize to a larger size.
    pub fn restore(&self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        let source = ImageSurface::create_for_data(
            snapshot.data.to_vec(),
            Format::ARgb32,
            snapshot.width,
            snapshot.height,
            snapshot.stride,
        )?;

        let ctx = Context::new(&self.committed)?;
        ctx.set_operator(Operator::Source);
        ctx.set_source_surface(&source, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Reallocates both surfaces at a new size.
    ///
    /// Destructive: previous content of both surfaces is gone afterwards.
    /// Callers that need the drawing must follow up with [`restore`](Self::restore).
    /// On allocation failure the current surfaces are kept untouched.
    pub fn resize_to(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        let (committed, preview) = allocate_pair(width, height)?;
        self.committed = committed;
        self.preview = preview;
        log::debug!("Reallocated drawing surfaces at {}x{}", width, height);
        Ok(())
    }

    /// Flattens background, committed, and preview into a new surface.
    pub fn composite(&self, background: Color) -> Result<ImageSurface, SurfaceError> {
        let output = ImageSurface::create(Format::ARgb32, self.width(), self.height())?;
        {
            let ctx = Context::new(&output)?;
            ctx.set_source_rgba(background.r, background.g, background.b, background.a);
            ctx.paint()?;
            for layer in [&self.committed, &self.preview] {
                ctx.set_source_surface(layer, 0.0, 0.0)?;
                ctx.paint()?;
            }
        }
        Ok(output)
    }

    /// Writes the composited surfaces as PNG.
    pub fn write_png<W: Write>(
        &self,
        writer: &mut W,
        background: Color,
    ) -> Result<(), SurfaceError> {
        let output = self.composite(background)?;
        output.write_to_png(writer)?;
        Ok(())
    }
}

/// Sizes a surface pair from window dimensions.
impl TryFrom<Viewport> for DrawingSurface {
    type Error = SurfaceError;

    fn try_from(viewport: Viewport) -> Result<Self, Self::Error> {
        Self::new(to_dimension(viewport.width), to_dimension(viewport.height))
    }
}

/// Clamps a viewport dimension into Cairo's `i32` range.
pub(crate) fn to_dimension(value: u32) -> i32 {
    value.min(i32::MAX as u32) as i32
}

fn allocate_pair(width: i32, height: i32) -> Result<(ImageSurface, ImageSurface), SurfaceError> {
    if width <= 0 || height <= 0 {
        return Err(SurfaceError::InvalidSize { width, height });
    }
    let committed = ImageSurface::create(Format::ARgb32, width, height)?;
    let preview = ImageSurface::create(Format::ARgb32, width, height)?;
    Ok((committed, preview))
}
