use crate::foundation::core::{BufferRole, PixelRect, SurfaceSize};
use crate::foundation::error::{AlphablendError, AlphablendResult};

/// A source rect paired with its destination placement, both known to be in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RectPlacement {
    /// Region read from the source surface.
    pub src: PixelRect,
    /// Region written in the destination surface. Same size as `src`.
    pub dst: PixelRect,
}

/// Check that `buf` holds exactly `size.width * size.height * 4` bytes.
///
/// Returns the validated length.
pub fn validate_buffer(role: BufferRole, buf: &[u8], size: SurfaceSize) -> AlphablendResult<usize> {
    let expected = size.byte_len()?;
    if buf.len() != expected {
        return Err(AlphablendError::size_mismatch(role, expected, buf.len()));
    }
    Ok(expected)
}

/// Check that `src_rect` fits the source surface and that the same-sized region at
/// `(dst_x, dst_y)` fits the destination surface. Source is checked first.
pub fn validate_placement(
    src_size: SurfaceSize,
    src_rect: PixelRect,
    dst_size: SurfaceSize,
    dst_x: u32,
    dst_y: u32,
) -> AlphablendResult<RectPlacement> {
    if !src_size.contains(&src_rect) {
        return Err(AlphablendError::SourceRectOutOfBounds {
            rect: src_rect,
            surface: src_size,
        });
    }

    let dst_rect = src_rect.moved_to(dst_x, dst_y);
    if !dst_size.contains(&dst_rect) {
        return Err(AlphablendError::DestinationRectOutOfBounds {
            rect: dst_rect,
            surface: dst_size,
        });
    }

    Ok(RectPlacement {
        src: src_rect,
        dst: dst_rect,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/validate.rs"]
mod tests;
