//! Bilevel (1 bit per pixel) image.
//!
//! [`BilevelImage`] is the output of every dithering strategy. It stores one
//! byte per pixel for ease of access; packing to 1 bit per pixel is left to
//! the file encoder.

use rayon::prelude::*;

use super::{pixel_count, try_alloc, GrayscaleImage};
use crate::api::{ImageError, Result};

/// A bilevel image.
///
/// Each sample is `0` (white, background) or `1` (black, ink). This is the
/// inverse of grayscale semantics, where larger values are brighter.
///
/// # Example
///
/// ```
/// use halftone_core::BilevelImage;
///
/// let image = BilevelImage::from_bits(2, 2, vec![0, 1, 1, 0]).unwrap();
/// assert_eq!(image.ink_count(), 2);
///
/// // Expanding to grayscale flips the polarity: ink becomes 0.
/// let gray = image.to_grayscale().unwrap();
/// assert_eq!(gray.max_gray(), 1);
/// assert_eq!(gray.to_vec(), vec![1, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BilevelImage {
    /// Bits, one `u8` per pixel, row-major order.
    bits: Vec<u8>,
    width: usize,
    height: usize,
}

impl BilevelImage {
    /// Allocate an all-white image.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let count = pixel_count(width, height)?;
        Ok(Self {
            bits: try_alloc(count, 0u8)?,
            width,
            height,
        })
    }

    /// Wrap a bit buffer, rejecting any sample other than 0 or 1.
    pub fn from_bits(width: usize, height: usize, bits: Vec<u8>) -> Result<Self> {
        let count = pixel_count(width, height)?;
        if bits.len() != count {
            return Err(ImageError::BufferLength {
                expected: count,
                actual: bits.len(),
            });
        }
        if let Some((index, &value)) = bits.iter().enumerate().find(|&(_, &b)| b > 1) {
            return Err(ImageError::InvalidBilevelSample { index, value });
        }
        Ok(Self {
            bits,
            width,
            height,
        })
    }

    /// Wrap bits produced by a dithering pass.
    pub(crate) fn from_raw(width: usize, height: usize, bits: Vec<u8>) -> Self {
        debug_assert_eq!(
            bits.len(),
            width * height,
            "bits length ({}) must match width * height ({}x{}={})",
            bits.len(),
            width,
            height,
            width * height,
        );
        debug_assert!(bits.iter().all(|&b| b <= 1));
        Self {
            bits,
            width,
            height,
        }
    }

    /// Returns the bits as a slice.
    #[inline]
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bit at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "pixel ({x},{y}) outside image");
        self.bits[y * self.width + x]
    }

    /// Set `(x, y)` to ink (`true`) or background (`false`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, ink: bool) {
        assert!(x < self.width && y < self.height, "pixel ({x},{y}) outside image");
        self.bits[y * self.width + x] = u8::from(ink);
    }

    /// Number of ink (1) pixels.
    pub fn ink_count(&self) -> usize {
        self.bits.par_iter().filter(|&&b| b == 1).count()
    }

    /// Expand to a grayscale image with `max_gray = 1`.
    ///
    /// Each sample is the logical inverse of the bit, so ink becomes black
    /// (0) and background becomes white (1).
    pub fn to_grayscale(&self) -> Result<GrayscaleImage> {
        GrayscaleImage::generate(self.width, self.height, 1, |i| {
            u16::from(self.bits[i] == 0)
        })
    }
}
