use rayon::prelude::*;

use crate::composite::pixel::over_span;
use crate::composite::threading::BlendThreading;
use crate::foundation::core::{BYTES_PER_PIXEL, BufferRole, SurfaceSize};
use crate::foundation::error::AlphablendResult;
use crate::geometry::validate::validate_buffer;

/// Blend every pixel of `src` over the matching pixel of `dst`.
///
/// Both buffers must hold exactly `width * height * 4` bytes (source is checked first). The
/// returned buffer has that same length; pixel `i` is `blend_pixel(src[i], dst[i])`.
/// A zero-sized surface with empty buffers yields an empty buffer.
///
/// Large surfaces are split across rayon workers with [`BlendThreading::default`]; use
/// [`blend_surface_with`] to pick the strategy.
pub fn blend_surface(src: &[u8], dst: &[u8], width: u32, height: u32) -> AlphablendResult<Vec<u8>> {
    blend_surface_with(
        src,
        dst,
        SurfaceSize::new(width, height),
        &BlendThreading::default(),
    )
}

/// [`blend_surface`] with an explicit execution strategy. Output bytes do not depend on it.
#[tracing::instrument(level = "debug", skip(src, dst, threading), fields(parallel = threading.parallel))]
pub fn blend_surface_with(
    src: &[u8],
    dst: &[u8],
    size: SurfaceSize,
    threading: &BlendThreading,
) -> AlphablendResult<Vec<u8>> {
    validate_buffer(BufferRole::Source, src, size)?;
    validate_buffer(BufferRole::Destination, dst, size)?;
    threading.validate()?;

    let mut out = dst.to_vec();
    if out.is_empty() {
        return Ok(out);
    }

    let pixels = (out.len() / BYTES_PER_PIXEL) as u64;
    if !threading.wants_parallel(pixels) {
        over_span(&mut out, src);
        return Ok(out);
    }

    let chunk_len = size.stride().saturating_mul(threading.rows_per_chunk());
    tracing::debug!(pixels, chunk_len, "blending surface in parallel");
    threading.install(|| {
        out.par_chunks_mut(chunk_len)
            .zip(src.par_chunks(chunk_len))
            .for_each(|(d, s)| over_span(d, s));
    })?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/surface.rs"]
mod tests;
