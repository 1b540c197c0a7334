//! Color conversion utilities
//!
//! Two pointwise transformations feed the grayscale pipeline:
//!
//! - [`convert`]: sRGB <-> linear transfer function over a truecolor image
//! - [`reduce`]: weighted luminance from truecolor to grayscale
//!
//! # Example
//!
//! ```
//! use halftone_core::{convert, reduce, Luminance, Rgb, Transfer, TrueColorImage};
//!
//! let image = TrueColorImage::from_pixels(1, 1, vec![Rgb::new(200, 120, 40)]).unwrap();
//! let linear = convert(&image, Transfer::ToLinear).unwrap();
//! let gray = reduce(&linear, Luminance::Linear).unwrap();
//! assert_eq!(gray.max_gray(), 255);
//! ```

mod lut;
mod luminance;
mod transfer;

pub use luminance::{reduce, Luminance};
pub use transfer::{convert, linear_to_srgb, srgb_to_linear, Transfer};
