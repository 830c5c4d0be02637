//! Canvas surface manager: owns the raster buffer and its pixel operations.
//!
//! DESIGN
//! ======
//! The buffer is an `image::RgbaImage` of straight (non-premultiplied) RGBA.
//! It does not exist until [`SurfaceManager::initialize`] runs; every pixel
//! operation before that fails fast with [`SurfaceError::Uninitialized`]
//! rather than touching an unallocated buffer.
//!
//! Resizing reallocates from scratch. Prior pixel content is discarded, which
//! is the observable behavior hosts rely on.
//!
//! Strokes are rasterized one segment at a time as round-capped capsules, so
//! consecutive segments of a freehand path meet with round joins.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use crate::color::Color;
use crate::consts::ANTIALIAS_PX;
use crate::geom::{Point, Rect, Size};

/// Errors raised by surface operations.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// An operation ran before `initialize` allocated the buffer.
    #[error("surface is not initialized")]
    Uninitialized,
    /// The requested dimensions overflow the addressable buffer size.
    #[error("surface of {width}x{height} pixels is too large to allocate")]
    TooLarge { width: u32, height: u32 },
    /// PNG cannot represent a surface with a zero dimension.
    #[error("cannot encode an empty {width}x{height} surface")]
    EmptySurface { width: u32, height: u32 },
    /// The PNG encoder failed.
    #[error("failed to encode surface: {0}")]
    Encode(#[from] image::ImageError),
}

/// How stroke pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    /// Paint over existing content.
    SourceOver,
    /// Remove existing content under the stroke.
    DestinationOut,
}

/// Everything needed to rasterize one stroke segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Full stroke width in pixels.
    pub width: f64,
    pub blend: Blend,
}

/// Owns the raster surface.
#[derive(Debug, Default)]
pub struct SurfaceManager {
    buffer: Option<RgbaImage>,
}

impl SurfaceManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a transparent buffer matching the container.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::TooLarge`] if the buffer cannot be addressed.
    pub fn initialize(&mut self, container: Size) -> Result<(), SurfaceError> {
        self.buffer = Some(allocate(container)?);
        debug!(width = container.width, height = container.height, "surface initialized");
        Ok(())
    }

    /// Reallocate the buffer at `size`, discarding existing content.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Uninitialized`] before `initialize`, or
    /// [`SurfaceError::TooLarge`] if the buffer cannot be addressed.
    pub fn resize(&mut self, size: Size) -> Result<(), SurfaceError> {
        let Some(buffer) = self.buffer.as_mut() else {
            return Err(SurfaceError::Uninitialized);
        };
        *buffer = allocate(size)?;
        debug!(width = size.width, height = size.height, "surface resized; content discarded");
        Ok(())
    }

    /// Reset every pixel to fully transparent.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Uninitialized`] before `initialize`.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        let buffer = self.buffer.as_mut().ok_or(SurfaceError::Uninitialized)?;
        buffer.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
        Ok(())
    }

    /// Encode the current pixels as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Uninitialized`] before `initialize`,
    /// [`SurfaceError::EmptySurface`] for a zero-sized surface, or
    /// [`SurfaceError::Encode`] if the encoder fails.
    pub fn export_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let buffer = self.buffer.as_ref().ok_or(SurfaceError::Uninitialized)?;
        if buffer.width() == 0 || buffer.height() == 0 {
            return Err(SurfaceError::EmptySurface { width: buffer.width(), height: buffer.height() });
        }
        let mut out = Cursor::new(Vec::new());
        buffer.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    /// Rasterize the segment `from -> to` and return the damaged area.
    ///
    /// Returns `Ok(None)` when the segment falls entirely off the surface.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Uninitialized`] before `initialize`.
    pub fn stroke_segment(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<Option<Rect>, SurfaceError> {
        let buffer = self.buffer.as_mut().ok_or(SurfaceError::Uninitialized)?;
        let bounds = Size::new(buffer.width(), buffer.height());
        let reach = stroke.width / 2.0 + ANTIALIAS_PX;
        let min = Point::new(from.x.min(to.x) - reach, from.y.min(to.y) - reach);
        let max = Point::new(from.x.max(to.x) + reach, from.y.max(to.y) + reach);
        let Some(damage) = Rect::covering(min, max, bounds) else {
            return Ok(None);
        };

        for y in damage.y..damage.bottom() {
            for x in damage.x..damage.right() {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let coverage = capsule_coverage(center, from, to, stroke.width / 2.0);
                if coverage <= 0.0 {
                    continue;
                }
                let pixel = buffer.get_pixel_mut(x, y);
                match stroke.blend {
                    Blend::SourceOver => source_over(pixel, stroke.color, coverage),
                    Blend::DestinationOut => destination_out(pixel, coverage),
                }
            }
        }
        Ok(Some(damage))
    }

    /// Current dimensions, if initialized.
    #[must_use]
    pub fn size(&self) -> Option<Size> {
        self.buffer.as_ref().map(|b| Size::new(b.width(), b.height()))
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.buffer.is_some()
    }

    /// RGBA at `(x, y)`; `None` when uninitialized or out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let buffer = self.buffer.as_ref()?;
        if x >= buffer.width() || y >= buffer.height() {
            return None;
        }
        Some(buffer.get_pixel(x, y).0)
    }

    /// Whether every pixel is fully transparent. `false` when uninitialized.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.buffer.as_ref().is_some_and(|b| b.pixels().all(|p| p.0[3] == 0))
    }

    /// Drop the buffer. Subsequent operations behave as before `initialize`.
    pub fn release(&mut self) {
        if self.buffer.take().is_some() {
            debug!("surface released");
        }
    }
}

fn allocate(size: Size) -> Result<RgbaImage, SurfaceError> {
    let too_large = || SurfaceError::TooLarge { width: size.width, height: size.height };
    let bytes = usize::try_from(size.width)
        .map_err(|_| too_large())?
        .checked_mul(usize::try_from(size.height).map_err(|_| too_large())?)
        .and_then(|px| px.checked_mul(4))
        .ok_or_else(too_large)?;
    if isize::try_from(bytes).is_err() {
        return Err(too_large());
    }
    Ok(RgbaImage::new(size.width, size.height))
}

/// Fraction of the pixel at `p` covered by a capsule of `radius` around `a -> b`.
fn capsule_coverage(p: Point, a: Point, b: Point, radius: f64) -> f64 {
    let d = distance_to_segment(p, a, b);
    ((radius + ANTIALIAS_PX / 2.0 - d) / ANTIALIAS_PX).clamp(0.0, 1.0)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f64) -> u8 {
    // Inputs are blends of values already in [0, 255].
    v.round().clamp(0.0, 255.0) as u8
}

fn source_over(pixel: &mut Rgba<u8>, color: Color, coverage: f64) {
    let dst_a = f64::from(pixel.0[3]) / 255.0;
    let out_a = coverage + dst_a * (1.0 - coverage);
    if out_a <= 0.0 {
        return;
    }
    let mix = |src: u8, dst: u8| (f64::from(src) * coverage + f64::from(dst) * dst_a * (1.0 - coverage)) / out_a;
    let [r, g, b, _] = pixel.0;
    *pixel = Rgba([
        to_channel(mix(color.r, r)),
        to_channel(mix(color.g, g)),
        to_channel(mix(color.b, b)),
        to_channel(out_a * 255.0),
    ]);
}

fn destination_out(pixel: &mut Rgba<u8>, coverage: f64) {
    let alpha = to_channel(f64::from(pixel.0[3]) * (1.0 - coverage));
    if alpha == 0 {
        *pixel = Rgba([0, 0, 0, 0]);
    } else {
        pixel.0[3] = alpha;
    }
}
