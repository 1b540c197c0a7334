//! Ordered dithering against a tiled threshold map.

use rand::RngCore;
use rayon::prelude::*;

use super::{Dither, ThresholdMap};
use crate::api::Result;
use crate::image::{try_alloc, BilevelImage, GrayscaleImage};

/// Ordered (matrix) threshold dithering.
///
/// Each sample is normalized to `0.0..=1.0` and compared with the map value
/// at `(x mod map.width, y mod map.height)`. Output is periodic with the map
/// size and fully deterministic, so rows are processed in parallel.
#[derive(Debug, Clone, Copy)]
pub struct OrderedDither<'a> {
    map: &'a ThresholdMap,
}

impl<'a> OrderedDither<'a> {
    pub fn new(map: &'a ThresholdMap) -> Self {
        Self { map }
    }
}

impl Dither for OrderedDither<'_> {
    fn dither(&self, image: &GrayscaleImage, _rng: &mut dyn RngCore) -> Result<BilevelImage> {
        let width = image.width();
        let max = image.max_gray() as f64;
        let mut bits = try_alloc(width * image.height(), 0u8)?;
        bits.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            for (x, bit) in row.iter_mut().enumerate() {
                let value = image.sample(y * width + x) as f64 / max;
                *bit = u8::from(value < self.map.threshold(x, y));
            }
        });
        Ok(BilevelImage::from_raw(width, image.height(), bits))
    }
}
