//! Bilevel quantization.
//!
//! This module turns a [`GrayscaleImage`] into a [`BilevelImage`] using one
//! of six strategies.
//!
//! # Algorithms
//!
//! - **Fixed threshold**: constant cut at a fraction of `max_gray`
//! - **Random threshold**: uniformly drawn cut per pixel
//! - **Ordered**: tiled [`ThresholdMap`] (Bayer or blue noise)
//! - **Floyd-Steinberg**: classic error diffusion, 100% propagation
//! - **Atkinson**: error diffusion with 75% propagation
//! - **Jarvis-Judice-Ninke**: ten-tap error diffusion over 3 rows
//!
//! # Architecture
//!
//! Every algorithm implements the [`Dither`] trait. [`DitherStrategy`] is the
//! runtime selection, dispatched by [`quantize`]. The random source is passed
//! in explicitly; only [`RandomThreshold`] reads from it.
//!
//! # Example
//!
//! ```
//! use halftone_core::{quantize, DitherStrategy, GrayscaleImage};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let image = GrayscaleImage::from_samples(2, 2, 255, &[0, 64, 192, 255]).unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//! let bits = quantize(&image, &DitherStrategy::FloydSteinberg, &mut rng).unwrap();
//! assert_eq!(bits.get(0, 0), 1);
//! assert_eq!(bits.get(1, 1), 0);
//! ```

mod atkinson;
mod diffusion;
mod floyd_steinberg;
mod jjn;
mod kernel;
mod ordered;
mod threshold;
mod threshold_map;

pub use atkinson::Atkinson;
pub use floyd_steinberg::FloydSteinberg;
pub use jjn::JarvisJudiceNinke;
pub use ordered::OrderedDither;
pub use threshold::{FixedThreshold, RandomThreshold};
pub use threshold_map::{BayerSize, ThresholdMap};

pub(crate) use diffusion::diffuse;
pub(crate) use kernel::{DiffusionTable, ATKINSON, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE};

use rand::RngCore;

use crate::api::Result;
use crate::image::{BilevelImage, GrayscaleImage};

/// Trait for bilevel quantization algorithms.
///
/// Implementors read the source image and produce a new bilevel image of
/// the same size; the source is never modified. Output bit 1 is ink.
pub trait Dither {
    /// Quantize `image` to one bit per pixel.
    ///
    /// `rng` is the random source for randomized strategies; deterministic
    /// strategies ignore it.
    fn dither(&self, image: &GrayscaleImage, rng: &mut dyn RngCore) -> Result<BilevelImage>;
}

/// Dither algorithm selection.
#[derive(Debug, Clone, PartialEq)]
pub enum DitherStrategy {
    /// Constant threshold at a fraction of `max_gray`.
    FixedThreshold(FixedThreshold),

    /// Uniform random threshold per pixel.
    RandomThreshold,

    /// Tiled threshold map.
    OrderedThreshold(ThresholdMap),

    /// Floyd-Steinberg error diffusion (100% propagation).
    FloydSteinberg,

    /// Atkinson error diffusion (75% propagation).
    Atkinson,

    /// Jarvis-Judice-Ninke error diffusion (10 taps, 44/48 handed on).
    JarvisJudiceNinke,
}

impl DitherStrategy {
    /// Fixed threshold at half of `max_gray`.
    pub fn middle() -> Self {
        DitherStrategy::FixedThreshold(FixedThreshold::MIDDLE)
    }

    /// Ordered dithering with a synthesized Bayer matrix.
    pub fn bayer(size: BayerSize) -> Self {
        DitherStrategy::OrderedThreshold(ThresholdMap::bayer(size))
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            DitherStrategy::FixedThreshold(_) => "threshold",
            DitherStrategy::RandomThreshold => "random",
            DitherStrategy::OrderedThreshold(_) => "ordered",
            DitherStrategy::FloydSteinberg => "floyd-steinberg",
            DitherStrategy::Atkinson => "atkinson",
            DitherStrategy::JarvisJudiceNinke => "jarvis-judice-ninke",
        }
    }
}

impl Default for DitherStrategy {
    fn default() -> Self {
        Self::middle()
    }
}

/// Quantize `image` with `strategy`, drawing randomness from `rng`.
pub fn quantize(
    image: &GrayscaleImage,
    strategy: &DitherStrategy,
    rng: &mut dyn RngCore,
) -> Result<BilevelImage> {
    let result = match strategy {
        DitherStrategy::FixedThreshold(t) => t.dither(image, rng),
        DitherStrategy::RandomThreshold => RandomThreshold.dither(image, rng),
        DitherStrategy::OrderedThreshold(map) => OrderedDither::new(map).dither(image, rng),
        DitherStrategy::FloydSteinberg => FloydSteinberg.dither(image, rng),
        DitherStrategy::Atkinson => Atkinson.dither(image, rng),
        DitherStrategy::JarvisJudiceNinke => JarvisJudiceNinke.dither(image, rng),
    }?;
    tracing::debug!(
        strategy = strategy.name(),
        width = result.width(),
        height = result.height(),
        ink = result.ink_count(),
        "quantized"
    );
    Ok(result)
}
