use crate::foundation::core::{PixelRect, SurfaceSize};
use crate::geometry::validate::RectPlacement;

/// Copy-blend request with signed origins, clipped against both surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClipRequest {
    /// Source origin, may lie outside the source surface.
    pub src_x: i32,
    pub src_y: i32,
    /// Requested region size before clipping.
    pub width: u32,
    pub height: u32,
    /// Destination origin, may lie outside the destination surface.
    pub dst_x: i32,
    pub dst_y: i32,
}

/// Shrink `req` to the part that is inside both surfaces.
///
/// Returns `None` when nothing survives. Clipping one side shifts the other side's origin by
/// the same amount, so source and destination pixels stay paired.
pub fn clip_region(
    src_size: SurfaceSize,
    dst_size: SurfaceSize,
    req: ClipRequest,
) -> Option<RectPlacement> {
    let (src_w, src_h) = (i64::from(src_size.width), i64::from(src_size.height));
    let (dst_w, dst_h) = (i64::from(dst_size.width), i64::from(dst_size.height));

    let (mut sx, mut sy) = (i64::from(req.src_x), i64::from(req.src_y));
    let (mut dx, mut dy) = (i64::from(req.dst_x), i64::from(req.dst_y));
    let (mut w, mut h) = (i64::from(req.width), i64::from(req.height));

    if sx < 0 {
        dx -= sx;
        w += sx;
        sx = 0;
    }
    if sy < 0 {
        dy -= sy;
        h += sy;
        sy = 0;
    }
    w = w.min(src_w - sx);
    h = h.min(src_h - sy);

    if dx < 0 {
        sx -= dx;
        w += dx;
        dx = 0;
    }
    if dy < 0 {
        sy -= dy;
        h += dy;
        dy = 0;
    }
    w = w.min(dst_w - dx);
    h = h.min(dst_h - dy);

    if w <= 0 || h <= 0 {
        return None;
    }

    let to_u32 = |v: i64| u32::try_from(v).ok();
    let src = PixelRect::new(to_u32(sx)?, to_u32(sy)?, to_u32(w)?, to_u32(h)?);
    let dst = src.moved_to(to_u32(dx)?, to_u32(dy)?);
    debug_assert!(src_size.contains(&src) && dst_size.contains(&dst));
    Some(RectPlacement { src, dst })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/clip.rs"]
mod tests;
