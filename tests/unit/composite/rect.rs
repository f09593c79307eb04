use super::*;
use crate::composite::pixel::blend_pixel;
use crate::foundation::core::Rgba8;
use crate::foundation::error::AlphablendError;

fn solid(size: SurfaceSize, px: [u8; 4]) -> Vec<u8> {
    px.repeat((size.width * size.height) as usize)
}

fn checkered(size: SurfaceSize) -> Vec<u8> {
    let mut out = Vec::new();
    for y in 0..size.height {
        for x in 0..size.width {
            if (x + y) % 2 == 0 {
                out.extend_from_slice(&[255, 255, 255, 255]);
            } else {
                out.extend_from_slice(&[0, 0, 0, 255]);
            }
        }
    }
    out
}

fn noise(size: SurfaceSize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let mut out = Vec::new();
    for _ in 0..size.width * size.height * 4 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        out.push((state >> 24) as u8);
    }
    out
}

fn pixel(buf: &[u8], size: SurfaceSize, x: u32, y: u32) -> Rgba8 {
    let off = size.offset(x, y);
    Rgba8::read(&buf[off..off + 4])
}

#[test]
fn partial_rect_blend_touches_only_the_target() {
    let size = SurfaceSize::new(8, 8);
    let red = solid(size, [255, 0, 0, 128]);
    let blue = solid(size, [0, 0, 255, 255]);

    let out = blend_rect(&red, size, PixelRect::new(2, 2, 4, 4), &blue, size, 2, 2).unwrap();
    assert_eq!(out.len(), blue.len());

    assert_eq!(pixel(&out, size, 0, 0), Rgba8::new(0, 0, 255, 255));
    assert_eq!(pixel(&out, size, 7, 7), Rgba8::new(0, 0, 255, 255));
    assert_eq!(pixel(&out, size, 1, 4), Rgba8::new(0, 0, 255, 255));

    let center = pixel(&out, size, 4, 4);
    assert!(center.r > 100 && center.b > 100);
    assert_eq!(center.a, 255);
}

#[test]
fn source_rect_past_edge_is_rejected() {
    let size = SurfaceSize::new(4, 4);
    let surface = checkered(size);
    let err = blend_rect(&surface, size, PixelRect::new(2, 2, 4, 4), &surface, size, 0, 0)
        .unwrap_err();
    assert!(matches!(err, AlphablendError::SourceRectOutOfBounds { .. }));
    assert!(err.to_string().starts_with("source rect out of bounds"));
}

#[test]
fn destination_placement_past_edge_is_rejected() {
    let size = SurfaceSize::new(4, 4);
    let surface = checkered(size);
    let err = blend_rect(&surface, size, PixelRect::new(0, 0, 2, 2), &surface, size, 0, 3)
        .unwrap_err();
    assert!(matches!(
        err,
        AlphablendError::DestinationRectOutOfBounds { .. }
    ));
    assert!(err.to_string().starts_with("destination rect out of bounds"));
}

#[test]
fn buffer_sizes_are_checked_before_bounds() {
    let size = SurfaceSize::new(4, 4);
    let surface = checkered(size);
    let err = blend_rect(
        &surface[..8],
        size,
        PixelRect::new(3, 3, 9, 9),
        &surface,
        size,
        0,
        0,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AlphablendError::SizeMismatch {
            role: BufferRole::Source,
            ..
        }
    ));

    let err = blend_rect(
        &surface,
        size,
        PixelRect::new(3, 3, 9, 9),
        &surface[..8],
        size,
        0,
        0,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AlphablendError::SizeMismatch {
            role: BufferRole::Destination,
            expected: 64,
            actual: 8,
        }
    ));
}

#[test]
fn inside_pixels_blend_and_outside_pixels_are_untouched() {
    let src_size = SurfaceSize::new(7, 5);
    let dst_size = SurfaceSize::new(9, 6);
    let src = noise(src_size, 1);
    let dst = noise(dst_size, 2);
    let src_rect = PixelRect::new(1, 2, 5, 3);
    let (dx, dy) = (3, 1);

    let out = blend_rect(&src, src_size, src_rect, &dst, dst_size, dx, dy).unwrap();
    let target = src_rect.moved_to(dx, dy);

    for y in 0..dst_size.height {
        for x in 0..dst_size.width {
            let got = pixel(&out, dst_size, x, y);
            let orig = pixel(&dst, dst_size, x, y);
            if target.contains_point(x, y) {
                let s = pixel(&src, src_size, src_rect.x + x - dx, src_rect.y + y - dy);
                assert_eq!(got, blend_pixel(s, orig), "inside ({x}, {y})");
            } else {
                assert_eq!(got, orig, "outside ({x}, {y})");
            }
        }
    }
}

#[test]
fn empty_rect_returns_destination_copy() {
    let size = SurfaceSize::new(3, 3);
    let src = noise(size, 5);
    let dst = noise(size, 6);
    let out = blend_rect(&src, size, PixelRect::new(1, 1, 0, 2), &dst, size, 3, 0).unwrap();
    assert_eq!(out, dst);
}

#[test]
fn zero_width_destination_accepts_empty_rect() {
    let src_size = SurfaceSize::new(2, 2);
    let dst_size = SurfaceSize::new(0, 5);
    let src = noise(src_size, 7);
    let out = blend_rect(&src, src_size, PixelRect::new(0, 0, 0, 0), &[], dst_size, 0, 0).unwrap();
    assert!(out.is_empty());
}

#[test]
fn parallel_rows_match_sequential() {
    let src_size = SurfaceSize::new(40, 30);
    let dst_size = SurfaceSize::new(50, 45);
    let src = noise(src_size, 11);
    let dst = noise(dst_size, 12);
    let src_rect = PixelRect::new(3, 4, 31, 25);

    let seq = blend_rect_with(
        &src,
        src_size,
        src_rect,
        &dst,
        dst_size,
        (10, 17),
        &BlendThreading::sequential(),
    )
    .unwrap();
    let par = blend_rect_with(
        &src,
        src_size,
        src_rect,
        &dst,
        dst_size,
        (10, 17),
        &BlendThreading {
            threads: Some(4),
            min_parallel_pixels: 1,
            rows_per_chunk: 3,
            ..BlendThreading::default()
        },
    )
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn clipped_matches_unclipped_when_in_bounds() {
    let size = SurfaceSize::new(8, 8);
    let src = noise(size, 21);
    let dst = noise(size, 22);

    let plain = blend_rect(&src, size, PixelRect::new(1, 2, 3, 4), &dst, size, 4, 3).unwrap();
    let clipped = blend_rect_clipped(
        &src,
        size,
        &dst,
        size,
        ClipRequest {
            src_x: 1,
            src_y: 2,
            width: 3,
            height: 4,
            dst_x: 4,
            dst_y: 3,
        },
    )
    .unwrap();
    assert_eq!(plain, clipped);
}

#[test]
fn clipped_negative_origin_blends_overlap_only() {
    let size = SurfaceSize::new(4, 4);
    let src = solid(size, [255, 255, 255, 255]);
    let dst = solid(size, [0, 0, 0, 255]);

    let out = blend_rect_clipped(
        &src,
        size,
        &dst,
        size,
        ClipRequest {
            src_x: 0,
            src_y: 0,
            width: 4,
            height: 4,
            dst_x: -2,
            dst_y: -3,
        },
    )
    .unwrap();

    for y in 0..4 {
        for x in 0..4 {
            let want = if x < 2 && y < 1 {
                Rgba8::new(255, 255, 255, 255)
            } else {
                Rgba8::new(0, 0, 0, 255)
            };
            assert_eq!(pixel(&out, size, x, y), want, "({x}, {y})");
        }
    }
}

#[test]
fn clipped_away_region_returns_destination() {
    let size = SurfaceSize::new(4, 4);
    let src = noise(size, 31);
    let dst = noise(size, 32);
    let out = blend_rect_clipped(
        &src,
        size,
        &dst,
        size,
        ClipRequest {
            src_x: 0,
            src_y: 0,
            width: 2,
            height: 2,
            dst_x: 10,
            dst_y: 0,
        },
    )
    .unwrap();
    assert_eq!(out, dst);
}

#[test]
fn clipped_still_validates_buffer_sizes() {
    let size = SurfaceSize::new(4, 4);
    let src = noise(size, 41);
    let err = blend_rect_clipped(&src, size, &src[..4], size, ClipRequest::default())
        .unwrap_err();
    assert!(matches!(
        err,
        AlphablendError::SizeMismatch {
            role: BufferRole::Destination,
            ..
        }
    ));
}

#[test]
fn oversized_row_chunks_match_sequential() {
    let size = SurfaceSize::new(12, 10);
    let src = noise(size, 51);
    let dst = noise(size, 52);
    let rect = PixelRect::new(2, 1, 7, 6);
    let seq = blend_rect_with(
        &src,
        size,
        rect,
        &dst,
        size,
        (3, 4),
        &BlendThreading::sequential(),
    )
    .unwrap();
    let par = blend_rect_with(
        &src,
        size,
        rect,
        &dst,
        size,
        (3, 4),
        &BlendThreading {
            min_parallel_pixels: 1,
            rows_per_chunk: usize::MAX,
            ..BlendThreading::default()
        },
    )
    .unwrap();
    assert_eq!(seq, par);
}
