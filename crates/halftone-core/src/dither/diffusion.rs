//! Shared error diffusion loop.
//!
//! Pixels are visited strictly in raster order (left to right, top to
//! bottom). Later pixels read error accumulated from earlier ones, so the
//! loop is sequential by construction.

use super::DiffusionTable;
use crate::api::Result;
use crate::image::{try_alloc, BilevelImage, GrayscaleImage};

/// Pending error for the rows a table can still reach.
///
/// Row `y` lives in slot `y % slots`. A slot is cleared once its row has
/// been quantized, ready to collect error for row `y + slots`.
struct PendingError {
    cells: Vec<f32>,
    width: usize,
    slots: usize,
}

impl PendingError {
    fn new(width: usize, reach: usize) -> Result<Self> {
        let slots = reach + 1;
        Ok(Self {
            cells: try_alloc(width * slots, 0.0f32)?,
            width,
            slots,
        })
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y % self.slots) * self.width + x
    }

    #[inline]
    fn take(&self, x: usize, y: usize) -> f32 {
        self.cells[self.offset(x, y)]
    }

    #[inline]
    fn push(&mut self, x: usize, y: usize, error: f32) {
        let i = self.offset(x, y);
        self.cells[i] += error;
    }

    fn finish_row(&mut self, y: usize) {
        let start = self.offset(0, y);
        self.cells[start..start + self.width].fill(0.0);
    }
}

/// Quantize `image` by error diffusion with `table`.
///
/// For each pixel the normalized sample plus pending error is rounded
/// to 0 or 1; a rounded 0 is emitted as ink (bit 1). The signed error
/// `value - rounded` is spread over the table's taps. Taps outside
/// `[0, width) x [0, height)` are skipped, so their share is lost and error
/// piles up along the right and bottom borders.
pub(crate) fn diffuse(image: &GrayscaleImage, table: &DiffusionTable) -> Result<BilevelImage> {
    let width = image.width();
    let height = image.height();
    let mut bits = try_alloc(width * height, 0u8)?;
    let mut pending = PendingError::new(width, table.reach())?;
    let denominator = table.denominator as f32;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let value = image.normalized(idx) + pending.take(x, y);
            let rounded = if value >= 0.5 { 1.0 } else { 0.0 };
            bits[idx] = u8::from(rounded == 0.0);

            let error = value - rounded;
            for t in table.taps {
                let nx = x as i64 + t.dx as i64;
                let ny = y + t.dy as usize;
                if nx < 0 || nx >= width as i64 || ny >= height {
                    continue;
                }
                pending.push(nx as usize, ny, error * t.weight as f32 / denominator);
            }
        }
        pending.finish_row(y);
    }

    Ok(BilevelImage::from_raw(width, height, bits))
}
