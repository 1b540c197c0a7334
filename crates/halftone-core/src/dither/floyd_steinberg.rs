//! Floyd-Steinberg error diffusion dithering algorithm.
//!
//! Floyd-Steinberg is the most widely known error diffusion algorithm.
//! It distributes 100% of the quantization error to 4 neighbors.

use rand::RngCore;

use super::{diffuse, Dither, FLOYD_STEINBERG};
use crate::api::Result;
use crate::image::{BilevelImage, GrayscaleImage};

/// Floyd-Steinberg error diffusion dithering.
///
/// # Algorithm
///
/// The Floyd-Steinberg kernel distributes error to 4 neighbors:
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
/// Total: 16/16 = 100% error propagation.
///
/// Every row is scanned left to right.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, image: &GrayscaleImage, _rng: &mut dyn RngCore) -> Result<BilevelImage> {
        diffuse(image, &FLOYD_STEINBERG)
    }
}
