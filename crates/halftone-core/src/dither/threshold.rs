//! Per-pixel threshold dithering.
//!
//! Every pixel is compared against a threshold on its own; no state carries
//! between pixels. Ink is emitted when the sample is strictly below the
//! threshold.

use rand::{Rng, RngCore};
use rayon::prelude::*;

use super::Dither;
use crate::api::Result;
use crate::image::{try_alloc, BilevelImage, GrayscaleImage};

/// Constant threshold at a fraction of `max_gray`.
///
/// The fraction is scaled by the image's `max_gray`, so `0.5` splits an
/// 8-bit image between 127 (ink) and 128 (background).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedThreshold(pub f64);

impl FixedThreshold {
    /// Conventional half-way threshold.
    pub const MIDDLE: FixedThreshold = FixedThreshold(0.5);

    /// Threshold in sample units for an image with the given maximum.
    #[inline]
    pub fn level(&self, max_gray: u16) -> f64 {
        self.0 * max_gray as f64
    }
}

impl Default for FixedThreshold {
    fn default() -> Self {
        Self::MIDDLE
    }
}

impl Dither for FixedThreshold {
    fn dither(&self, image: &GrayscaleImage, _rng: &mut dyn RngCore) -> Result<BilevelImage> {
        let level = self.level(image.max_gray());
        let mut bits = try_alloc(image.width() * image.height(), 0u8)?;
        bits.par_iter_mut()
            .enumerate()
            .for_each(|(i, bit)| *bit = u8::from((image.sample(i) as f64) < level));
        Ok(BilevelImage::from_raw(image.width(), image.height(), bits))
    }
}

/// Threshold drawn uniformly from `0..=max_gray` for every pixel.
///
/// Draws happen in raster order from the supplied generator, so a seeded
/// generator reproduces the same output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomThreshold;

impl Dither for RandomThreshold {
    fn dither(&self, image: &GrayscaleImage, rng: &mut dyn RngCore) -> Result<BilevelImage> {
        let max_gray = image.max_gray();
        let mut bits = try_alloc(image.width() * image.height(), 0u8)?;
        for (i, bit) in bits.iter_mut().enumerate() {
            let threshold: u16 = rng.gen_range(0..=max_gray);
            *bit = u8::from(image.sample(i) < threshold);
        }
        Ok(BilevelImage::from_raw(image.width(), image.height(), bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_middle_is_strict() {
        let image = GrayscaleImage::from_samples(4, 1, 255, &[0, 127, 128, 255]).unwrap();
        let result = FixedThreshold::MIDDLE
            .dither(&image, &mut StepRng::new(0, 1))
            .unwrap();
        assert_eq!(result.bits(), &[1, 1, 0, 0]);
    }

    #[test]
    fn test_fixed_scales_with_max_gray() {
        let image = GrayscaleImage::from_samples(3, 1, 1000, &[100, 249, 250]).unwrap();
        let result = FixedThreshold(0.25)
            .dither(&image, &mut StepRng::new(0, 1))
            .unwrap();
        assert_eq!(result.bits(), &[1, 1, 0]);
    }

    #[test]
    fn test_random_threshold_same_pixel_both_outcomes() {
        let image = GrayscaleImage::from_samples(1, 1, 255, &[128]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 4000;
        let ink: usize = (0..trials)
            .map(|_| RandomThreshold.dither(&image, &mut rng).unwrap().ink_count())
            .sum();

        // P(128 < U{0..=255}) = 127/256
        let ratio = ink as f64 / trials as f64;
        assert!((0.45..0.55).contains(&ratio), "ink ratio {ratio}");
    }

    #[test]
    fn test_random_threshold_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        // Nothing is strictly below a threshold of 0, so a white image can
        // never pick up ink.
        let white = GrayscaleImage::from_samples(8, 8, 255, &[255; 64]).unwrap();
        assert_eq!(RandomThreshold.dither(&white, &mut rng).unwrap().ink_count(), 0);
    }

    #[test]
    fn test_random_threshold_seed_reproducible() {
        let samples: Vec<u16> = (0..100).map(|i| (i * 5 % 256) as u16).collect();
        let image = GrayscaleImage::from_samples(10, 10, 255, &samples).unwrap();
        let a = RandomThreshold
            .dither(&image, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = RandomThreshold
            .dither(&image, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }
}
