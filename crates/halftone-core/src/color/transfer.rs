//! sRGB <-> linear transfer conversion over truecolor images.

use rayon::prelude::*;

use super::lut::{linear_to_srgb_u8, srgb_to_linear_u8};
use crate::api::Result;
use crate::image::{try_alloc, Rgb, TrueColorImage};

/// IEC 61966-2-1 exact formula: sRGB to linear, both normalized to 0..=1.
#[inline]
pub fn srgb_to_linear(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 exact formula: linear to sRGB, both normalized to 0..=1.
#[inline]
pub fn linear_to_srgb(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Direction of a transfer conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transfer {
    /// Decode sRGB-encoded samples to linear light.
    ToLinear,
    /// Encode linear-light samples with the sRGB curve.
    ToSrgb,
}

impl Transfer {
    /// Convert one 8-bit sample.
    ///
    /// The sample is divided by 255, transformed, multiplied by 255 and
    /// truncated. Truncation makes the conversion lossy: a round trip
    /// through both directions generally does not return the input.
    #[inline]
    pub fn apply(self, sample: u8) -> u8 {
        match self {
            Transfer::ToLinear => srgb_to_linear_u8(sample),
            Transfer::ToSrgb => linear_to_srgb_u8(sample),
        }
    }

    /// Convert every channel of a pixel independently.
    #[inline]
    pub fn apply_pixel(self, pixel: Rgb) -> Rgb {
        pixel.map(|c| self.apply(c))
    }
}

/// Produce a new image with `transfer` applied to every channel.
///
/// # Example
///
/// ```
/// use halftone_core::{convert, Rgb, Transfer, TrueColorImage};
///
/// let image = TrueColorImage::from_pixels(1, 1, vec![Rgb::gray(128)]).unwrap();
/// let linear = convert(&image, Transfer::ToLinear).unwrap();
/// assert_eq!(linear.get(0, 0), Rgb::gray(55));
/// ```
pub fn convert(image: &TrueColorImage, transfer: Transfer) -> Result<TrueColorImage> {
    let mut pixels = try_alloc(image.pixels().len(), Rgb::default())?;
    pixels
        .par_iter_mut()
        .zip(image.pixels().par_iter())
        .for_each(|(out, &src)| *out = transfer.apply_pixel(src));

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        ?transfer,
        "converted transfer function"
    );
    TrueColorImage::from_pixels(image.width(), image.height(), pixels)
}
