use std::fmt;

use crate::foundation::error::{AlphablendError, AlphablendResult};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Straight (non-premultiplied) RGBA8 color.
///
/// Four independent 8-bit channels; the type itself is the "always four channels" invariant.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// `(0, 0, 0, 0)`.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    // Callers hand in `chunks_exact(4)` slots.
    pub(crate) fn read(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(px: [u8; 4]) -> Self {
        Self::from_array(px)
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

impl From<(u8, u8, u8, u8)> for Rgba8 {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba8> for (u8, u8, u8, u8) {
    fn from(c: Rgba8) -> Self {
        (c.r, c.g, c.b, c.a)
    }
}

/// Which input buffer a validation failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferRole {
    Source,
    Destination,
}

impl fmt::Display for BufferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Destination => "destination",
        })
    }
}

/// Declared dimensions of a packed RGBA8 surface (stride = `width * 4`, no row padding).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row stride in bytes.
    pub const fn stride(self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Required buffer length, `width * height * 4`.
    ///
    /// Fails with [`AlphablendError::Validation`] if the product does not fit in `usize`.
    pub fn byte_len(self) -> AlphablendResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| {
                AlphablendError::validation(format!("surface size overflow for {self}"))
            })
    }

    /// Byte offset of pixel `(x, y)`: `(y * width + x) * 4`.
    ///
    /// Only meaningful for coordinates already validated against this surface.
    pub const fn offset(self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Whether `rect` lies entirely inside this surface. Overflow-safe.
    pub fn contains(self, rect: &PixelRect) -> bool {
        rect.right() <= u64::from(self.width) && rect.bottom() <= u64::from(self.height)
    }

    /// The full-surface rect.
    pub const fn bounds(self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }
}

impl fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned sub-region in pixel units: origin `(x, y)`, size `(width, height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, widened so `x + width` never overflows.
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge, widened so `y + height` never overflows.
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Same size, moved to origin `(x, y)`.
    pub const fn moved_to(&self, x: u32, y: u32) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// Whether pixel `(px, py)` lies inside the rect.
    pub const fn contains_point(&self, px: u32, py: u32) -> bool {
        px >= self.x && py >= self.y && (px as u64) < self.right() && (py as u64) < self.bottom()
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
