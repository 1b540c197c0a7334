//! Truecolor (8 bits per channel) image.

use super::{pixel_count, try_alloc};
use crate::api::{ImageError, Result};

/// Maximum sample value of every truecolor channel.
pub const MAX_COLOR: u16 = 255;

/// One truecolor pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral pixel with all three channels set to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Apply `f` to each channel independently.
    #[inline]
    pub fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }
}

/// A truecolor image: `width * height` RGB triples in row-major order.
///
/// # Example
///
/// ```
/// use halftone_core::{Rgb, TrueColorImage};
///
/// let mut image = TrueColorImage::new(2, 1).unwrap();
/// image.set(1, 0, Rgb::new(255, 0, 0));
/// assert_eq!(image.to_bytes(), vec![0, 0, 0, 255, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrueColorImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl TrueColorImage {
    /// Allocate a black image.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let count = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: try_alloc(count, Rgb::default())?,
        })
    }

    /// Wrap an existing pixel buffer.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self> {
        let count = pixel_count(width, height)?;
        if pixels.len() != count {
            return Err(ImageError::BufferLength {
                expected: count,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from interleaved `[R, G, B, R, G, B, ...]` bytes.
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let count = pixel_count(width, height)?;
        let expected = count.checked_mul(3).ok_or(ImageError::Allocation {
            bytes: usize::MAX,
        })?;
        if bytes.len() != expected {
            return Err(ImageError::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        let mut pixels = try_alloc(count, Rgb::default())?;
        for (pixel, chunk) in pixels.iter_mut().zip(bytes.chunks_exact(3)) {
            *pixel = Rgb::new(chunk[0], chunk[1], chunk[2]);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Always [`MAX_COLOR`].
    #[inline]
    pub fn max_color(&self) -> u16 {
        MAX_COLOR
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel ({x},{y}) outside image");
        self.pixels[y * self.width + x]
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: Rgb) {
        assert!(x < self.width && y < self.height, "pixel ({x},{y}) outside image");
        self.pixels[y * self.width + x] = pixel;
    }

    /// Interleaved bytes; length is always `width * height * 3`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            bytes.extend_from_slice(&[p.r, p.g, p.b]);
        }
        bytes
    }
}
