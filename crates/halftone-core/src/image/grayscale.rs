//! Grayscale image with variable sample width.
//!
//! Storage is one byte per sample when `max_gray <= 255` and two bytes
//! otherwise. [`GraySamples`] makes the choice explicit instead of
//! reinterpreting a raw byte buffer.

use rayon::prelude::*;

use super::{pixel_count, try_alloc};
use crate::api::{ImageError, Result};

/// Sample storage of a [`GrayscaleImage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraySamples {
    /// One byte per sample (`max_gray <= 255`).
    Narrow(Vec<u8>),
    /// Two bytes per sample (`max_gray > 255`).
    Wide(Vec<u16>),
}

impl GraySamples {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            GraySamples::Narrow(s) => s.len(),
            GraySamples::Wide(s) => s.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> u16 {
        match self {
            GraySamples::Narrow(s) => s[index] as u16,
            GraySamples::Wide(s) => s[index],
        }
    }

    /// Store `value`, truncating to the low byte for narrow storage.
    #[inline]
    fn set(&mut self, index: usize, value: u16) {
        match self {
            GraySamples::Narrow(s) => s[index] = value as u8,
            GraySamples::Wide(s) => s[index] = value,
        }
    }
}

/// A grayscale image with a declared maximum sample value.
///
/// Samples above `max_gray` are tolerated: they are stored and a warning is
/// logged, so slightly out-of-range source data still loads.
///
/// # Example
///
/// ```
/// use halftone_core::GrayscaleImage;
///
/// let image = GrayscaleImage::from_samples(2, 2, 1023, &[0, 256, 512, 1023]).unwrap();
/// assert!(image.is_wide());
/// assert_eq!(image.get(1, 1), 1023);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleImage {
    width: usize,
    height: usize,
    max_gray: u16,
    samples: GraySamples,
}

fn check_max_gray(max_gray: u16) -> Result<()> {
    if max_gray == 0 {
        return Err(ImageError::InvalidMaxGray(0));
    }
    Ok(())
}

fn warn_out_of_range(count: usize, max_gray: u16) {
    if count > 0 {
        tracing::warn!(count, max_gray, "samples exceed max gray value");
    }
}

impl GrayscaleImage {
    /// Allocate an all-zero image.
    pub fn new(width: usize, height: usize, max_gray: u16) -> Result<Self> {
        let count = pixel_count(width, height)?;
        check_max_gray(max_gray)?;
        let samples = if max_gray > 255 {
            GraySamples::Wide(try_alloc(count, 0u16)?)
        } else {
            GraySamples::Narrow(try_alloc(count, 0u8)?)
        };
        Ok(Self {
            width,
            height,
            max_gray,
            samples,
        })
    }

    /// Copy samples into a new image, choosing storage width from `max_gray`.
    pub fn from_samples(width: usize, height: usize, max_gray: u16, samples: &[u16]) -> Result<Self> {
        let count = pixel_count(width, height)?;
        if samples.len() != count {
            return Err(ImageError::BufferLength {
                expected: count,
                actual: samples.len(),
            });
        }
        Self::generate(width, height, max_gray, |i| samples[i])
    }

    /// Produce an image by evaluating `f` for every row-major index in parallel.
    pub(crate) fn generate<F>(width: usize, height: usize, max_gray: u16, f: F) -> Result<Self>
    where
        F: Fn(usize) -> u16 + Sync,
    {
        let count = pixel_count(width, height)?;
        check_max_gray(max_gray)?;
        let (samples, out_of_range) = if max_gray > 255 {
            let mut buf = try_alloc(count, 0u16)?;
            let over: usize = buf
                .par_iter_mut()
                .enumerate()
                .map(|(i, s)| {
                    *s = f(i);
                    usize::from(*s > max_gray)
                })
                .sum();
            (GraySamples::Wide(buf), over)
        } else {
            let mut buf = try_alloc(count, 0u8)?;
            let over: usize = buf
                .par_iter_mut()
                .enumerate()
                .map(|(i, s)| {
                    let v = f(i);
                    *s = v as u8;
                    usize::from(v > max_gray)
                })
                .sum();
            (GraySamples::Narrow(buf), over)
        };
        warn_out_of_range(out_of_range, max_gray);
        Ok(Self {
            width,
            height,
            max_gray,
            samples,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn max_gray(&self) -> u16 {
        self.max_gray
    }

    #[inline]
    pub fn samples(&self) -> &GraySamples {
        &self.samples
    }

    /// True when samples are stored two bytes wide.
    #[inline]
    pub fn is_wide(&self) -> bool {
        matches!(self.samples, GraySamples::Wide(_))
    }

    /// Sample at row-major `index`.
    #[inline]
    pub fn sample(&self, index: usize) -> u16 {
        self.samples.get(index)
    }

    /// Sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        assert!(x < self.width && y < self.height, "pixel ({x},{y}) outside image");
        self.samples.get(y * self.width + x)
    }

    /// Overwrite the sample at `(x, y)`.
    ///
    /// A value above `max_gray` is still stored (truncated to a byte for
    /// narrow storage) and logged as a warning.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    pub fn set(&mut self, x: usize, y: usize, value: u16) {
        assert!(x < self.width && y < self.height, "pixel ({x},{y}) outside image");
        if value > self.max_gray {
            tracing::warn!(
                value,
                max_gray = self.max_gray,
                "pixel value greater than max gray value"
            );
        }
        self.samples.set(y * self.width + x, value);
    }

    /// Iterate samples in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.samples.len()).map(move |i| self.samples.get(i))
    }

    /// Samples widened to `u16`.
    pub fn to_vec(&self) -> Vec<u16> {
        self.iter().collect()
    }

    /// Number of stored samples above `max_gray`.
    pub fn count_out_of_range(&self) -> usize {
        self.iter().filter(|&v| v > self.max_gray).count()
    }

    /// Sample at `index` normalized to `0.0..=1.0`.
    #[inline]
    pub(crate) fn normalized(&self, index: usize) -> f32 {
        self.samples.get(index) as f32 / self.max_gray as f32
    }
}
