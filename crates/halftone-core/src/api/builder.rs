//! Ditherer builder -- the ergonomic entry point for quantization.
//!
//! [`Ditherer`] pairs a [`DitherStrategy`] with a random source policy so
//! callers do not have to manage a generator for deterministic strategies.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::Result;
use crate::dither::{quantize, DitherStrategy};
use crate::image::{BilevelImage, GrayscaleImage};

/// High-level bilevel quantizer.
///
/// # Design
///
/// - Constructor requires a [`DitherStrategy`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`quantize()`](Self::quantize) takes `&self` so the builder is
///   reusable across images
/// - Without a seed, every call to `quantize` draws a fresh entropy seed;
///   with one, every call replays the same random stream
///
/// # Example
///
/// ```
/// use halftone_core::{DitherStrategy, Ditherer, GrayscaleImage};
///
/// let image = GrayscaleImage::from_samples(2, 2, 255, &[10, 100, 150, 250]).unwrap();
/// let ditherer = Ditherer::new(DitherStrategy::RandomThreshold).seed(7);
///
/// let a = ditherer.quantize(&image).unwrap();
/// let b = ditherer.quantize(&image).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Ditherer {
    strategy: DitherStrategy,
    seed: Option<u64>,
}

impl Ditherer {
    pub fn new(strategy: DitherStrategy) -> Self {
        Self {
            strategy,
            seed: None,
        }
    }

    /// Fix the random seed used by randomized strategies.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the strategy.
    #[inline]
    pub fn strategy(mut self, strategy: DitherStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Quantize with a generator derived from the configured seed.
    pub fn quantize(&self, image: &GrayscaleImage) -> Result<BilevelImage> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.quantize_with_rng(image, &mut rng)
    }

    /// Quantize drawing from a caller-supplied generator.
    pub fn quantize_with_rng(
        &self,
        image: &GrayscaleImage,
        rng: &mut dyn RngCore,
    ) -> Result<BilevelImage> {
        quantize(image, &self.strategy, rng)
    }
}

impl Default for Ditherer {
    fn default() -> Self {
        Self::new(DitherStrategy::default())
    }
}
