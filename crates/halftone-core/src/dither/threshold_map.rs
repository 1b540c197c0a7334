//! Threshold maps for ordered dithering.
//!
//! A [`ThresholdMap`] is a small matrix of normalized thresholds tiled over
//! the image with modulo indexing. Maps are either synthesized (Bayer) or
//! derived from a grayscale texture such as a blue-noise pattern.

use crate::api::{ImageError, Result};
use crate::image::{pixel_count, try_alloc, GrayscaleImage};

/// Size of a synthesized Bayer matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BayerSize {
    /// 2x2
    Two,
    /// 4x4
    Four,
    /// 8x8
    Eight,
    /// 16x16
    Sixteen,
}

impl BayerSize {
    /// Side length in pixels.
    #[inline]
    pub fn side(self) -> usize {
        match self {
            BayerSize::Two => 2,
            BayerSize::Four => 4,
            BayerSize::Eight => 8,
            BayerSize::Sixteen => 16,
        }
    }
}

/// An immutable matrix of thresholds in `0.0..=1.0`.
///
/// # Example
///
/// ```
/// use halftone_core::{BayerSize, ThresholdMap};
///
/// let map = ThresholdMap::bayer(BayerSize::Two);
/// assert_eq!(map.width(), 2);
/// // Thresholds tile across the image.
/// assert_eq!(map.threshold(3, 5), map.get(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMap {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

/// Recursive Bayer index matrix: M(2n) = 4 M(n) + M(2) per quadrant.
fn bayer_indices(side: usize) -> Vec<u32> {
    const BASE: [[u32; 2]; 2] = [[0, 2], [3, 1]];
    let mut matrix = vec![0u32];
    let mut n = 1;
    while n < side {
        let next = n * 2;
        let mut out = vec![0u32; next * next];
        for y in 0..next {
            for x in 0..next {
                out[y * next + x] = 4 * matrix[(y % n) * n + x % n] + BASE[y / n][x / n];
            }
        }
        matrix = out;
        n = next;
    }
    matrix
}

impl ThresholdMap {
    /// Build a map from row-major normalized values.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        let count = pixel_count(width, height)?;
        if values.len() != count {
            return Err(ImageError::BufferLength {
                expected: count,
                actual: values.len(),
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|&(_, v)| !(0.0..=1.0).contains(v))
        {
            return Err(ImageError::InvalidThreshold { index, value });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Synthesize a Bayer matrix.
    ///
    /// Index `k` of an `n x n` matrix maps to `(k + 0.5) / n²`, so a fully
    /// black sample (0.0) is always below every threshold and a fully white
    /// sample (1.0) is never below any.
    pub fn bayer(size: BayerSize) -> Self {
        let side = size.side();
        let cells = (side * side) as f64;
        let values = bayer_indices(side)
            .into_iter()
            .map(|k| (k as f64 + 0.5) / cells)
            .collect();
        Self {
            width: side,
            height: side,
            values,
        }
    }

    /// Normalize a grayscale texture (e.g. blue noise) into a map by
    /// dividing every sample by the texture's `max_gray`.
    ///
    /// Samples above `max_gray` are clamped to 1.0 with a warning.
    pub fn from_grayscale(texture: &GrayscaleImage) -> Result<Self> {
        let over = texture.count_out_of_range();
        if over > 0 {
            tracing::warn!(
                count = over,
                max_gray = texture.max_gray(),
                "threshold texture samples above max_gray clamped to 1.0"
            );
        }
        let max = texture.max_gray() as f64;
        let mut values = try_alloc(texture.width() * texture.height(), 0.0f64)?;
        for (i, v) in values.iter_mut().enumerate() {
            *v = (texture.sample(i) as f64 / max).min(1.0);
        }
        tracing::debug!(
            width = texture.width(),
            height = texture.height(),
            "threshold map from grayscale texture"
        );
        Ok(Self {
            width: texture.width(),
            height: texture.height(),
            values,
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

    /// Threshold at map coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the map.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.width && y < self.height, "({x},{y}) outside threshold map");
        self.values[y * self.width + x]
    }

    /// Threshold for image coordinates, tiling the map.
    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> f64 {
        self.values[(y % self.height) * self.width + x % self.width]
    }
}
