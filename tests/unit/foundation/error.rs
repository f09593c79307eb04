use super::*;

#[test]
fn display_prefixes_are_stable() {
    let surface = SurfaceSize::new(4, 4);
    let rect = PixelRect::new(2, 2, 4, 4);

    assert!(
        AlphablendError::size_mismatch(BufferRole::Source, 64, 5)
            .to_string()
            .starts_with("buffer size mismatch:")
    );
    assert!(
        AlphablendError::SourceRectOutOfBounds { rect, surface }
            .to_string()
            .starts_with("source rect out of bounds")
    );
    assert!(
        AlphablendError::DestinationRectOutOfBounds { rect, surface }
            .to_string()
            .starts_with("destination rect out of bounds")
    );
    assert!(
        AlphablendError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AlphablendError::threading("x")
            .to_string()
            .contains("threading error:")
    );
}

#[test]
fn size_mismatch_names_buffer_and_lengths() {
    let msg = AlphablendError::size_mismatch(BufferRole::Destination, 40_000, 10).to_string();
    assert!(msg.contains("destination"));
    assert!(msg.contains("40000"));
    assert!(msg.contains("10"));
}

#[test]
fn rect_errors_describe_geometry() {
    let err = AlphablendError::SourceRectOutOfBounds {
        rect: PixelRect::new(2, 3, 4, 5),
        surface: SurfaceSize::new(4, 4),
    };
    let msg = err.to_string();
    assert!(msg.contains("4x5 at (2, 3)"), "{msg}");
    assert!(msg.contains("4x4"), "{msg}");
}
