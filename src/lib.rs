//! alphablend composites packed RGBA8 pixel buffers with the Porter-Duff "over" operator.
//!
//! Inputs are straight-alpha bytes (`R, G, B, A`, 4 bytes per pixel, row-major, stride =
//! `width * 4`). The blend runs on premultiplied values internally, so half-transparent edges do
//! not pick up the dark fringe that naive straight-alpha lerping produces.
//!
//! # Entry points
//!
//! 1. [`blend_pixel`]: one color over another. Total, never fails.
//! 2. [`blend_surface`]: two equal-sized buffers, pixel by pixel.
//! 3. [`blend_rect`]: a sub-rect of one surface onto a copy of another at an offset.
//! 4. [`blend_rect_clipped`]: like [`blend_rect`] with signed origins, clipped instead of rejected.
//!
//! Every buffer entry point validates all of its inputs first and then returns a freshly
//! allocated buffer; caller buffers are never written. Per-pixel work is independent, so large
//! blends are spread over rayon workers according to [`BlendThreading`] without changing a
//! single output byte.
#![forbid(unsafe_code)]

mod composite;
mod foundation;
mod geometry;

pub use composite::pixel::{blend_pixel, blend_pixel_bytes};
pub use composite::rect::{
    blend_rect, blend_rect_clipped, blend_rect_clipped_with, blend_rect_with,
};
pub use composite::surface::{blend_surface, blend_surface_with};
pub use composite::threading::BlendThreading;
pub use foundation::core::{BYTES_PER_PIXEL, BufferRole, PixelRect, Rgba8, SurfaceSize};
pub use foundation::error::{AlphablendError, AlphablendResult};
pub use geometry::clip::{ClipRequest, clip_region};
pub use geometry::validate::{RectPlacement, validate_buffer, validate_placement};
