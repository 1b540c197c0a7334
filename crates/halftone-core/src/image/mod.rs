//! Pixel buffer types.
//!
//! Three dense, row-major containers share one lifecycle: a single
//! allocation, one producing operation, read-only afterwards apart from
//! the per-pixel `set` helpers.
//!
//! - [`TrueColorImage`]: 8-bit RGB triples, max sample fixed at 255
//! - [`GrayscaleImage`]: one sample per pixel, 1 or 2 bytes wide depending on
//!   the declared maximum
//! - [`BilevelImage`]: one byte per pixel holding 0 (background) or 1 (ink)

mod bilevel;
mod grayscale;
mod truecolor;

pub use bilevel::BilevelImage;
pub use grayscale::{GraySamples, GrayscaleImage};
pub use truecolor::{Rgb, TrueColorImage, MAX_COLOR};

use crate::api::{ImageError, Result};

/// Validate dimensions and return the pixel count.
pub(crate) fn pixel_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ImageError::Allocation { bytes: usize::MAX })
}

/// Allocate a filled buffer, reporting out-of-memory instead of aborting.
pub(crate) fn try_alloc<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ImageError::Allocation {
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    buf.resize(len, fill);
    Ok(buf)
}
