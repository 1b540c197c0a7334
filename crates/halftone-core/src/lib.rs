//! halftone-core: pixel-domain transformations for netpbm-style bitmaps
//!
//! This library converts truecolor images to grayscale, quantizes grayscale
//! to one bit per pixel, and blurs grayscale with a summed-area table. It
//! works on in-memory buffers only; file formats live in the application
//! crate.
//!
//! # Quick Start
//!
//! ```
//! use halftone_core::{
//!     convert, reduce, DitherStrategy, Ditherer, Luminance, Rgb, Transfer, TrueColorImage,
//! };
//!
//! let pixels = vec![Rgb::new(200, 120, 40); 16];
//! let image = TrueColorImage::from_pixels(4, 4, pixels).unwrap();
//!
//! let linear = convert(&image, Transfer::ToLinear).unwrap();
//! let gray = reduce(&linear, Luminance::Linear).unwrap();
//! let bits = Ditherer::new(DitherStrategy::Atkinson).quantize(&gray).unwrap();
//!
//! assert_eq!(bits.width(), 4);
//! assert_eq!(bits.height(), 4);
//! ```
//!
//! # Data Flow
//!
//! ```text
//! TrueColorImage
//!     |
//!     v
//! [convert]                (optional sRGB <-> linear transfer)
//!     |
//!     v
//! [reduce]                 (weighted luminance)
//!     |
//!     v
//! GrayscaleImage ---------------------+
//!     |                               |
//!     v                               v
//! [quantize]                  [SummedAreaTable::build]
//!     |                               |
//!     v                               v
//! BilevelImage                   [box_blur] -> GrayscaleImage
//! ```
//!
//! # Dithering Algorithms
//!
//! Six strategies are available via [`DitherStrategy`]:
//!
//! - Fixed threshold (strict `sample < t * max_gray`)
//! - Random threshold (uniform in `0..=max_gray`, seeded or from entropy)
//! - Ordered threshold with a Bayer 2/4/8/16 matrix or a blue-noise texture
//! - Floyd-Steinberg, Atkinson and Jarvis-Judice-Ninke error diffusion
//!
//! Error diffusion is strictly raster ordered and therefore single
//! threaded. Every other pass is a pointwise map and runs on rayon.
//!
//! # Bilevel Polarity
//!
//! A [`BilevelImage`] stores 1 for ink (black) and 0 for background
//! (white), the opposite of grayscale where larger means brighter.

pub mod api;
pub mod color;
pub mod dither;
pub mod filter;
pub mod image;


pub use api::{Ditherer, ImageError, Result};
pub use color::{convert, linear_to_srgb, reduce, srgb_to_linear, Luminance, Transfer};
pub use dither::{
    quantize, Atkinson, BayerSize, Dither, DitherStrategy, FixedThreshold, FloydSteinberg,
    JarvisJudiceNinke, OrderedDither, RandomThreshold, ThresholdMap,
};
pub use filter::{
    blur, box_blur, difference, mean, power_sum, variance, windowed_average, BlurMethod,
    SummedAreaTable,
};
pub use image::{BilevelImage, GraySamples, GrayscaleImage, Rgb, TrueColorImage, MAX_COLOR};
