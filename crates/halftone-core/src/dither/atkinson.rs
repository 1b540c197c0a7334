//! Atkinson error diffusion dithering algorithm.
//!
//! Atkinson dithering distributes only 75% of the quantization error (6/8).
//! The remaining quarter is dropped on every pixel, which keeps highlights
//! and shadows clean at the cost of some tonal accuracy.

use rand::RngCore;

use super::{diffuse, Dither, ATKINSON};
use crate::api::Result;
use crate::image::{BilevelImage, GrayscaleImage};

/// Atkinson error diffusion dithering.
///
/// # Algorithm
///
/// The Atkinson kernel distributes error to 6 neighbors:
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Each neighbor receives 1/8 of the error, for a total of 6/8 = 75%.
///
/// # Example
///
/// ```
/// use halftone_core::{Atkinson, Dither, GrayscaleImage};
///
/// let image = GrayscaleImage::from_samples(4, 1, 255, &[0, 85, 170, 255]).unwrap();
/// let bits = Atkinson.dither(&image, &mut rand::thread_rng()).unwrap();
/// assert_eq!(bits.get(0, 0), 1);
/// assert_eq!(bits.get(3, 0), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Atkinson;

impl Dither for Atkinson {
    fn dither(&self, image: &GrayscaleImage, _rng: &mut dyn RngCore) -> Result<BilevelImage> {
        diffuse(image, &ATKINSON)
    }
}
