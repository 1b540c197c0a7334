//! Whole-image statistics and comparison.
//!
//! Sums run sequentially in raster order so floating point results are
//! reproducible.

use crate::api::{ImageError, Result};
use crate::image::GrayscaleImage;

/// Per-pixel absolute difference `|a - b|`.
///
/// The result keeps `a`'s `max_gray`.
pub fn difference(a: &GrayscaleImage, b: &GrayscaleImage) -> Result<GrayscaleImage> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(ImageError::DimensionMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        });
    }
    GrayscaleImage::generate(a.width(), a.height(), a.max_gray(), |i| {
        a.sample(i).abs_diff(b.sample(i))
    })
}

/// Sum of every sample raised to `p`.
pub fn power_sum(image: &GrayscaleImage, p: f64) -> f64 {
    image.iter().map(|s| (s as f64).powf(p)).sum()
}

/// Arithmetic mean of the samples.
pub fn mean(image: &GrayscaleImage) -> f64 {
    power_sum(image, 1.0) / (image.width() * image.height()) as f64
}

/// Population variance of the samples.
pub fn variance(image: &GrayscaleImage) -> f64 {
    let mean = mean(image);
    let squares: f64 = image
        .iter()
        .map(|s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum();
    squares / (image.width() * image.height()) as f64
}
