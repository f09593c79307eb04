use std::ops::Range;

use rayon::prelude::*;

use crate::composite::pixel::over_span;
use crate::composite::threading::BlendThreading;
use crate::foundation::core::{BYTES_PER_PIXEL, BufferRole, PixelRect, SurfaceSize};
use crate::foundation::error::AlphablendResult;
use crate::geometry::clip::{ClipRequest, clip_region};
use crate::geometry::validate::{RectPlacement, validate_buffer, validate_placement};

/// Blend `src_rect` of the source surface onto a copy of the destination at `(dst_x, dst_y)`.
///
/// Checks, in order: source length, destination length, source rect inside the source
/// surface, placement inside the destination surface. The result has the destination's length
/// and every pixel outside the placed rect is byte-identical to `dst`.
pub fn blend_rect(
    src: &[u8],
    src_size: SurfaceSize,
    src_rect: PixelRect,
    dst: &[u8],
    dst_size: SurfaceSize,
    dst_x: u32,
    dst_y: u32,
) -> AlphablendResult<Vec<u8>> {
    blend_rect_with(
        src,
        src_size,
        src_rect,
        dst,
        dst_size,
        (dst_x, dst_y),
        &BlendThreading::default(),
    )
}

/// [`blend_rect`] with an explicit execution strategy.
#[tracing::instrument(level = "debug", skip(src, dst, threading))]
pub fn blend_rect_with(
    src: &[u8],
    src_size: SurfaceSize,
    src_rect: PixelRect,
    dst: &[u8],
    dst_size: SurfaceSize,
    dst_origin: (u32, u32),
    threading: &BlendThreading,
) -> AlphablendResult<Vec<u8>> {
    let (dst_x, dst_y) = dst_origin;
    validate_buffer(BufferRole::Source, src, src_size)?;
    validate_buffer(BufferRole::Destination, dst, dst_size)?;
    let placement = validate_placement(src_size, src_rect, dst_size, dst_x, dst_y)?;
    threading.validate()?;

    composite_placement(src, src_size, dst, dst_size, placement, threading)
}

/// Copy-blend with signed origins; the region is clipped to both surfaces instead of rejected.
///
/// Buffer lengths are still validated. When nothing survives clipping the result is an exact
/// copy of `dst`.
pub fn blend_rect_clipped(
    src: &[u8],
    src_size: SurfaceSize,
    dst: &[u8],
    dst_size: SurfaceSize,
    req: ClipRequest,
) -> AlphablendResult<Vec<u8>> {
    blend_rect_clipped_with(
        src,
        src_size,
        dst,
        dst_size,
        req,
        &BlendThreading::default(),
    )
}

/// [`blend_rect_clipped`] with an explicit execution strategy.
#[tracing::instrument(level = "debug", skip(src, dst, threading))]
pub fn blend_rect_clipped_with(
    src: &[u8],
    src_size: SurfaceSize,
    dst: &[u8],
    dst_size: SurfaceSize,
    req: ClipRequest,
    threading: &BlendThreading,
) -> AlphablendResult<Vec<u8>> {
    validate_buffer(BufferRole::Source, src, src_size)?;
    validate_buffer(BufferRole::Destination, dst, dst_size)?;
    threading.validate()?;

    match clip_region(src_size, dst_size, req) {
        Some(placement) => {
            composite_placement(src, src_size, dst, dst_size, placement, threading)
        }
        None => {
            tracing::debug!("region clipped away");
            Ok(dst.to_vec())
        }
    }
}

/// Byte ranges of row `j` of a placement: `(source span, destination span)`.
fn row_spans(
    src_size: SurfaceSize,
    dst_size: SurfaceSize,
    placement: &RectPlacement,
    j: u32,
) -> (Range<usize>, Range<usize>) {
    let span_len = placement.src.width as usize * BYTES_PER_PIXEL;
    let s = src_size.offset(placement.src.x, placement.src.y + j);
    let d = dst_size.offset(placement.dst.x, placement.dst.y + j);
    (s..s + span_len, d..d + span_len)
}

// Inputs validated by the caller.
fn composite_placement(
    src: &[u8],
    src_size: SurfaceSize,
    dst: &[u8],
    dst_size: SurfaceSize,
    placement: RectPlacement,
    threading: &BlendThreading,
) -> AlphablendResult<Vec<u8>> {
    let mut out = dst.to_vec();
    if placement.dst.is_empty() {
        return Ok(out);
    }

    if !threading.wants_parallel(placement.dst.pixel_count()) {
        for j in 0..placement.dst.height {
            let (s, d) = row_spans(src_size, dst_size, &placement, j);
            over_span(&mut out[d], &src[s]);
        }
        return Ok(out);
    }

    tracing::debug!(rows = placement.dst.height, "blending rect in parallel");
    let stride = dst_size.stride();
    let first_row = placement.dst.y as usize;
    threading.install(|| {
        out.par_chunks_mut(stride)
            .enumerate()
            .skip(first_row)
            .take(placement.dst.height as usize)
            .with_min_len(threading.rows_per_chunk())
            .for_each(|(row, line)| {
                let j = (row - first_row) as u32;
                let (s, d) = row_spans(src_size, dst_size, &placement, j);
                let row_start = row * stride;
                over_span(&mut line[d.start - row_start..d.end - row_start], &src[s]);
            });
    })?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/rect.rs"]
mod tests;
