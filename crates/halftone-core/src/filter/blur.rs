//! Box blur.
//!
//! Two interchangeable implementations of the same mean filter: a direct
//! neighborhood scan and a summed-area table lookup. Windows are clipped at
//! the image edges and averaged over the in-bounds pixels only; the
//! quotient is truncated. Both produce identical output for any radius.

use super::SummedAreaTable;
use crate::api::Result;
use crate::image::GrayscaleImage;

/// Blur implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlurMethod {
    /// Direct scan of the `(2r+1)²` window, O(r²) per pixel.
    Naive,
    /// Summed-area table lookup, O(1) per pixel.
    #[default]
    SummedArea,
}

/// Inclusive window around `(x, y)` clipped to `width x height`.
#[inline]
fn window(
    x: usize,
    y: usize,
    radius: usize,
    width: usize,
    height: usize,
) -> (usize, usize, usize, usize) {
    (
        x.saturating_sub(radius),
        y.saturating_sub(radius),
        x.saturating_add(radius).min(width - 1),
        y.saturating_add(radius).min(height - 1),
    )
}

/// Blur `image` with the given radius and method.
pub fn blur(image: &GrayscaleImage, radius: usize, method: BlurMethod) -> Result<GrayscaleImage> {
    let out = match method {
        BlurMethod::Naive => windowed_average(image, radius),
        BlurMethod::SummedArea => box_blur(&SummedAreaTable::build(image)?, radius),
    }?;
    tracing::debug!(radius, ?method, width = out.width(), height = out.height(), "blurred");
    Ok(out)
}

/// Mean of each pixel's clipped `(2r+1)²` neighborhood, by direct scan.
pub fn windowed_average(image: &GrayscaleImage, radius: usize) -> Result<GrayscaleImage> {
    let width = image.width();
    let height = image.height();
    GrayscaleImage::generate(width, height, image.max_gray(), |i| {
        let (tlx, tly, brx, bry) = window(i % width, i / width, radius, width, height);
        let mut sum = 0u64;
        for y in tly..=bry {
            for x in tlx..=brx {
                sum += image.sample(y * width + x) as u64;
            }
        }
        let count = ((brx - tlx + 1) * (bry - tly + 1)) as u64;
        (sum / count) as u16
    })
}

/// Mean of each pixel's clipped `(2r+1)²` neighborhood, from a prebuilt
/// summed-area table.
pub fn box_blur(sat: &SummedAreaTable, radius: usize) -> Result<GrayscaleImage> {
    let width = sat.width();
    let height = sat.height();
    GrayscaleImage::generate(width, height, sat.max_gray(), |i| {
        let (tlx, tly, brx, bry) = window(i % width, i / width, radius, width, height);
        let count = ((brx - tlx + 1) * (bry - tly + 1)) as u64;
        (sat.region_sum(tlx, tly, brx, bry) / count) as u16
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noisy(width: usize, height: usize, max_gray: u16) -> GrayscaleImage {
        let mut state = 0x2545_f491u32;
        let samples: Vec<u16> = (0..width * height)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state % (max_gray as u32 + 1)) as u16
            })
            .collect();
        GrayscaleImage::from_samples(width, height, max_gray, &samples).unwrap()
    }

    #[test]
    fn test_radius_zero_is_identity() {
        let image = noisy(9, 7, 255);
        assert_eq!(blur(&image, 0, BlurMethod::Naive).unwrap(), image);
        assert_eq!(blur(&image, 0, BlurMethod::SummedArea).unwrap(), image);
    }

    #[test]
    fn test_naive_equals_sat() {
        for (w, h, max) in [(1, 1, 255), (13, 1, 255), (1, 9, 255), (17, 11, 255), (8, 8, 4095)] {
            let image = noisy(w, h, max);
            for radius in [1, 2, 3, 5, 20] {
                assert_eq!(
                    blur(&image, radius, BlurMethod::Naive).unwrap(),
                    blur(&image, radius, BlurMethod::SummedArea).unwrap(),
                    "{w}x{h} r={radius}"
                );
            }
        }
    }

    #[test]
    fn test_edges_average_in_bounds_only() {
        // 0 0 0
        // 0 9 0
        // 0 0 0
        let image = GrayscaleImage::from_samples(3, 3, 9, &[0, 0, 0, 0, 9, 0, 0, 0, 0]).unwrap();
        let out = windowed_average(&image, 1).unwrap();
        // Corner sees 4 pixels, edge 6, center 9.
        assert_eq!(out.get(0, 0), 2);
        assert_eq!(out.get(1, 0), 1);
        assert_eq!(out.get(1, 1), 1);
    }

    #[test]
    fn test_huge_radius_is_global_mean() {
        let image = GrayscaleImage::from_samples(2, 2, 255, &[10, 20, 30, 41]).unwrap();
        let out = blur(&image, usize::MAX, BlurMethod::SummedArea).unwrap();
        assert_eq!(out.to_vec(), vec![25; 4]);
    }

    #[test]
    fn test_keeps_max_gray() {
        let image = noisy(5, 5, 1);
        let out = blur(&image, 1, BlurMethod::default()).unwrap();
        assert_eq!(out.max_gray(), 1);
        assert_eq!(out.count_out_of_range(), 0);
    }
}
