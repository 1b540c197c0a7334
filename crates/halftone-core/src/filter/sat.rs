//! Summed-area table over a grayscale image.

use rayon::prelude::*;

use crate::api::{ImageError, Result};
use crate::image::{try_alloc, GrayscaleImage};

/// Inclusive 2-D prefix sums.
///
/// `get(x, y)` is the sum of every source sample at `x' <= x, y' <= y`, so
/// any axis-aligned rectangle sum is four lookups. Cells are 64-bit: a
/// 65535-valued image needs more than 2^32 pixels to overflow.
///
/// # Example
///
/// ```
/// use halftone_core::{GrayscaleImage, SummedAreaTable};
///
/// let image = GrayscaleImage::from_samples(4, 4, 255, &[1; 16]).unwrap();
/// let sat = SummedAreaTable::build(&image).unwrap();
/// assert_eq!(sat.get(3, 3), 16);
/// assert_eq!(sat.query(1, 1, 2, 2).unwrap(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummedAreaTable {
    width: usize,
    height: usize,
    max_gray: u16,
    cells: Vec<u64>,
}

impl SummedAreaTable {
    /// Build the table in two passes.
    ///
    /// The column pass adds the row above into each row (rows in order,
    /// columns within a row in parallel). The row pass then prefix-sums each
    /// row independently.
    pub fn build(image: &GrayscaleImage) -> Result<Self> {
        let width = image.width();
        let height = image.height();
        let mut cells = try_alloc(width * height, 0u64)?;
        cells
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, cell)| *cell = image.sample(i) as u64);

        for y in 1..height {
            let (done, rest) = cells.split_at_mut(y * width);
            let above = &done[(y - 1) * width..];
            rest[..width]
                .par_iter_mut()
                .zip(above.par_iter())
                .for_each(|(cell, &up)| *cell += up);
        }

        cells.par_chunks_mut(width).for_each(|row| {
            let mut acc = 0u64;
            for cell in row.iter_mut() {
                acc += *cell;
                *cell = acc;
            }
        });

        tracing::debug!(width, height, "summed-area table built");
        Ok(Self {
            width,
            height,
            max_gray: image.max_gray(),
            cells,
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

    /// `max_gray` of the source image.
    #[inline]
    pub fn max_gray(&self) -> u16 {
        self.max_gray
    }

    /// Prefix sum at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the table.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u64 {
        assert!(x < self.width && y < self.height, "cell ({x},{y}) outside table");
        self.cells[y * self.width + x]
    }

    /// Sum over the inclusive rectangle `(tlx, tly)..=(brx, bry)`.
    ///
    /// The rectangle must satisfy `tlx <= brx < width` and
    /// `tly <= bry < height`; anything else is rejected rather than clamped.
    pub fn query(&self, tlx: usize, tly: usize, brx: usize, bry: usize) -> Result<u64> {
        if tlx > brx || tly > bry || brx >= self.width || bry >= self.height {
            return Err(ImageError::RegionOutOfBounds {
                tlx,
                tly,
                brx,
                bry,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.region_sum(tlx, tly, brx, bry))
    }

    /// Inclusion-exclusion without bounds checks beyond slice indexing.
    #[inline]
    pub(crate) fn region_sum(&self, tlx: usize, tly: usize, brx: usize, bry: usize) -> u64 {
        let at = |x: usize, y: usize| self.cells[y * self.width + x];
        let corner = if tlx > 0 && tly > 0 { at(tlx - 1, tly - 1) } else { 0 };
        let left = if tlx > 0 { at(tlx - 1, bry) } else { 0 };
        let top = if tly > 0 { at(brx, tly - 1) } else { 0 };
        // Add before subtracting; unsigned cells.
        at(brx, bry) + corner - left - top
    }
}
