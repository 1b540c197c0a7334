//! Luminance reduction from truecolor to grayscale.

use crate::api::Result;
use crate::image::{GrayscaleImage, Rgb, TrueColorImage};

/// Channel weighting used to collapse RGB into one brightness value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Luminance {
    /// 0.299 R + 0.587 G + 0.114 B
    Linear,
    /// 0.2126 R + 0.7152 G + 0.0722 B
    #[default]
    Srgb,
}

impl Luminance {
    /// `[r, g, b]` weights.
    #[inline]
    pub fn weights(self) -> [f64; 3] {
        match self {
            Luminance::Linear => [0.299, 0.587, 0.114],
            Luminance::Srgb => [0.2126, 0.7152, 0.0722],
        }
    }

    /// Weighted brightness of a pixel, not yet truncated.
    #[inline]
    pub fn of(self, pixel: Rgb) -> f64 {
        let [wr, wg, wb] = self.weights();
        wr * pixel.r as f64 + wg * pixel.g as f64 + wb * pixel.b as f64
    }
}

/// Reduce a truecolor image to grayscale.
///
/// The output's `max_gray` equals the input's max color (255) and each
/// sample is the weighted sum truncated toward zero.
///
/// # Example
///
/// ```
/// use halftone_core::{reduce, Luminance, Rgb, TrueColorImage};
///
/// let image = TrueColorImage::from_pixels(1, 1, vec![Rgb::new(100, 0, 0)]).unwrap();
/// let gray = reduce(&image, Luminance::Linear).unwrap();
/// assert_eq!(gray.get(0, 0), 29); // 29.9 truncated
/// ```
pub fn reduce(image: &TrueColorImage, luminance: Luminance) -> Result<GrayscaleImage> {
    let pixels = image.pixels();
    let gray = GrayscaleImage::generate(image.width(), image.height(), image.max_color(), |i| {
        luminance.of(pixels[i]) as u16
    })?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        ?luminance,
        "reduced to grayscale"
    );
    Ok(gray)
}
