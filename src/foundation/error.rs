use crate::foundation::core::{BufferRole, PixelRect, SurfaceSize};

/// Convenience result type used across alphablend.
pub type AlphablendResult<T> = Result<T, AlphablendError>;

/// Error taxonomy for the blending entry points.
///
/// Every variant is produced during validation, before any pixel is touched, so a caller that
/// receives an error never observes a partially blended buffer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphablendError {
    /// A buffer's length does not equal `width * height * 4` for its stated dimensions.
    #[error("buffer size mismatch: {role} buffer expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Which input buffer was rejected.
        role: BufferRole,
        /// Length implied by the declared dimensions.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// The requested source rect extends past the source surface.
    #[error("source rect out of bounds: {rect} does not fit in {surface} surface")]
    SourceRectOutOfBounds {
        /// Offending rect, in source pixel coordinates.
        rect: PixelRect,
        /// Declared source dimensions.
        surface: SurfaceSize,
    },

    /// The requested destination placement extends past the destination surface.
    #[error("destination rect out of bounds: {rect} does not fit in {surface} surface")]
    DestinationRectOutOfBounds {
        /// Offending placement, in destination pixel coordinates.
        rect: PixelRect,
        /// Declared destination dimensions.
        surface: SurfaceSize,
    },

    /// Invalid caller-provided geometry or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The worker pool for parallel blending could not be built.
    #[error("threading error: {0}")]
    Threading(String),
}

impl AlphablendError {
    /// Build a [`AlphablendError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AlphablendError::Threading`] value.
    pub fn threading(msg: impl Into<String>) -> Self {
        Self::Threading(msg.into())
    }

    /// Build a [`AlphablendError::SizeMismatch`] value.
    pub fn size_mismatch(role: BufferRole, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            role,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
