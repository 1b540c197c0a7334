//! Unified error type for the halftone-core public API.
//!
//! [`ImageError`] covers every failure a producing operation can report, so
//! application code can propagate all of them with `?`.

use thiserror::Error;

/// Unified error type for the halftone-core public API.
///
/// Out-of-range samples are not errors: writing a sample above an image's
/// declared maximum is logged as a warning and the value is kept.
///
/// # Example
///
/// ```
/// use halftone_core::{GrayscaleImage, ImageError};
///
/// let err = GrayscaleImage::new(0, 4, 255).unwrap_err();
/// assert!(matches!(err, ImageError::InvalidDimensions { width: 0, height: 4 }));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImageError {
    /// Width or height is zero.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// The output buffer could not be allocated.
    #[error("out of memory allocating {bytes} bytes")]
    Allocation { bytes: usize },

    /// Grayscale maximum outside `1..=65535`.
    #[error("max gray value {0} out of range 1..=65535")]
    InvalidMaxGray(u32),

    /// A supplied buffer does not match the image dimensions.
    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// A bilevel sample other than 0 or 1.
    #[error("bilevel sample {value} at index {index} is not 0 or 1")]
    InvalidBilevelSample { index: usize, value: u8 },

    /// A threshold map value outside `0.0..=1.0`.
    #[error("threshold value {value} at index {index} outside 0..=1")]
    InvalidThreshold { index: usize, value: f64 },

    /// A summed-area query rectangle that is inverted or leaves the table.
    #[error(
        "region ({tlx},{tly})-({brx},{bry}) out of bounds for {width}x{height} table"
    )]
    RegionOutOfBounds {
        tlx: usize,
        tly: usize,
        brx: usize,
        bry: usize,
        width: usize,
        height: usize,
    },

    /// Two images that must share dimensions do not.
    #[error("dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ImageError>;
