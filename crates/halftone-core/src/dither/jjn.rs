//! Jarvis-Judice-Ninke error diffusion dithering algorithm.
//!
//! JJN spreads error over ten neighbors across 3 rows, producing smoother
//! gradients than Floyd-Steinberg.

use rand::RngCore;

use super::{diffuse, Dither, JARVIS_JUDICE_NINKE};
use crate::api::Result;
use crate::image::{BilevelImage, GrayscaleImage};

/// Jarvis-Judice-Ninke error diffusion dithering.
///
/// # Algorithm
///
/// Error goes to ten neighbors, each weight over 48:
///
/// ```text
///        X   7   5
///    3   5   7   5
///    1   3   5   3
/// ```
///
/// The weights add up to 44, so 4/48 of every pixel's error is not
/// handed on. Pending error is kept for the current row and two below.
#[derive(Debug, Clone, Copy, Default)]
pub struct JarvisJudiceNinke;

impl Dither for JarvisJudiceNinke {
    fn dither(&self, image: &GrayscaleImage, _rng: &mut dyn RngCore) -> Result<BilevelImage> {
        diffuse(image, &JARVIS_JUDICE_NINKE)
    }
}
