//! Test fixtures and constants.

use std::path::{Path, PathBuf};

use halftone::netpbm;
use halftone_core::{GrayscaleImage, Rgb, TrueColorImage};

/// Fixed seed for random-threshold runs
pub const SEED: u64 = 0x5eed;

/// Small images with known content
pub mod images {
    use super::*;

    /// Horizontal red-to-blue ramp with a green component varying by row.
    pub fn color_ramp(width: usize, height: usize) -> TrueColorImage {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let r = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
                let g = (y * 255 / height.max(2).saturating_sub(1)).min(255) as u8;
                pixels.push(Rgb::new(r, g, 255 - r));
            }
        }
        TrueColorImage::from_pixels(width, height, pixels).unwrap()
    }

    /// Grayscale ramp from 0 to `max_gray` left to right.
    pub fn gray_ramp(width: usize, height: usize, max_gray: u16) -> GrayscaleImage {
        let denom = width.max(2) - 1;
        let samples: Vec<u16> = (0..width * height)
            .map(|i| ((i % width) * max_gray as usize / denom) as u16)
            .collect();
        GrayscaleImage::from_samples(width, height, max_gray, &samples).unwrap()
    }

    /// Uniform gray image.
    pub fn flat_gray(width: usize, height: usize, max_gray: u16, value: u16) -> GrayscaleImage {
        GrayscaleImage::from_samples(width, height, max_gray, &vec![value; width * height])
            .unwrap()
    }

    /// 4x4 P5 texture with every level 0..16 once, as a blue-noise stand-in.
    pub fn noise_texture() -> GrayscaleImage {
        let samples = [0, 8, 2, 10, 12, 4, 14, 6, 3, 11, 1, 9, 15, 7, 13, 5];
        GrayscaleImage::from_samples(4, 4, 15, &samples).unwrap()
    }
}

/// Write `image` into `dir` as `name` and return the full path.
pub fn write_image<T: netpbm::NetpbmFormat>(dir: &Path, name: &str, image: &T) -> PathBuf {
    let path = dir.join(name);
    netpbm::save(image, &path).unwrap();
    path
}

/// Write a pipeline YAML file into `dir`.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("halftone.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
