use crate::foundation::core::{BYTES_PER_PIXEL, Rgba8};
use crate::foundation::math::PremulF32;

/// Composite `src` over `dst` (Porter-Duff "over").
///
/// Inputs are straight alpha; the blend itself runs on premultiplied values and the result is
/// converted back to straight alpha, so partially transparent edges keep their color instead of
/// darkening toward black.
///
/// - opaque `src` returns `src` unchanged
/// - transparent `src` returns `dst` unchanged, unless `dst` is transparent too
/// - zero output coverage returns `(0, 0, 0, 0)`
pub fn blend_pixel(src: Rgba8, dst: Rgba8) -> Rgba8 {
    if src.is_opaque() {
        return src;
    }
    if src.is_transparent() {
        return if dst.is_transparent() {
            Rgba8::TRANSPARENT
        } else {
            dst
        };
    }
    PremulF32::from_straight(src)
        .over(PremulF32::from_straight(dst))
        .to_straight()
}

/// [`blend_pixel`] on raw `[r, g, b, a]` arrays.
pub fn blend_pixel_bytes(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    blend_pixel(Rgba8::from_array(src), Rgba8::from_array(dst)).to_array()
}

/// Blend each pixel of `src` over the matching pixel of `dst`, writing into `dst`.
///
/// `dst` is a span of a freshly allocated output buffer. Both slices hold the same number of
/// whole pixels.
pub(crate) fn over_span(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(src.chunks_exact(BYTES_PER_PIXEL))
    {
        let out = blend_pixel(Rgba8::read(s), Rgba8::read(d));
        d.copy_from_slice(&out.to_array());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/pixel.rs"]
mod tests;
