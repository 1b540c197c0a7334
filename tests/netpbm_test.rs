//! File-level netpbm tests: read back what was written, and reject bad files.

mod common;

use common::fixtures::{self, images};
use halftone::netpbm;
use halftone::CodecError;
use halftone_core::{BilevelImage, GrayscaleImage, ThresholdMap, TrueColorImage};
use pretty_assertions::assert_eq;

#[test]
fn test_color_file_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let image = images::color_ramp(7, 5);
    let path = fixtures::write_image(dir.path(), "ramp.ppm", &image);

    common::assert_netpbm(&path, "P6");
    let loaded: TrueColorImage = netpbm::load(&path).unwrap();
    assert_eq!(loaded, image);
}

#[test]
fn test_wide_gray_file_is_big_endian() {
    let dir = tempfile::tempdir().unwrap();
    let image = GrayscaleImage::from_samples(2, 1, 1000, &[0x0102, 1000]).unwrap();
    let path = fixtures::write_image(dir.path(), "wide.pgm", &image);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..], b"P5\n2\n1\n1000\n\x01\x02\x03\xe8");
    let loaded: GrayscaleImage = netpbm::load(&path).unwrap();
    assert_eq!(loaded, image);
}

#[test]
fn test_bilevel_file_with_odd_width() {
    let dir = tempfile::tempdir().unwrap();
    let bits: Vec<u8> = (0..13 * 3).map(|i| u8::from(i % 3 == 0)).collect();
    let image = BilevelImage::from_bits(13, 3, bits).unwrap();
    let path = fixtures::write_image(dir.path(), "odd.pbm", &image);

    // 13 pixels pad to 2 bytes per row
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), "P4\n13\n3\n".len() + 2 * 3);
    let loaded: BilevelImage = netpbm::load(&path).unwrap();
    assert_eq!(loaded, image);
}

#[test]
fn test_header_comments_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("commented.pgm");
    std::fs::write(&path, b"P5\n# made by hand\n3 1\n# max follows\n255\n\x00\x80\xff").unwrap();

    let image: GrayscaleImage = netpbm::load(&path).unwrap();
    assert_eq!(image.to_vec(), vec![0, 128, 255]);
}

#[test]
fn test_wrong_format_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let image = images::gray_ramp(4, 4, 255);
    let path = fixtures::write_image(dir.path(), "gray.pgm", &image);

    let result: Result<TrueColorImage, _> = netpbm::load(&path);
    assert!(matches!(result, Err(CodecError::BadMagic { expected: "P6", .. })));
}

#[test]
fn test_truncated_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.ppm");
    std::fs::write(&path, b"P6\n2 2\n255\n\x00\x00\x00\x10").unwrap();

    let result: Result<TrueColorImage, _> = netpbm::load(&path);
    assert!(matches!(
        result,
        Err(CodecError::Truncated {
            expected: 12,
            actual: 4
        })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result: Result<GrayscaleImage, _> = netpbm::load(&dir.path().join("absent.pgm"));
    assert!(matches!(result, Err(CodecError::Io(_))));
}

#[test]
fn test_threshold_map_loader_normalizes() {
    let dir = tempfile::tempdir().unwrap();
    let texture = images::noise_texture();
    let path = fixtures::write_image(dir.path(), "noise.pgm", &texture);

    let map = netpbm::load_threshold_map(&path).unwrap();
    assert_eq!(map.width(), 4);
    assert_eq!(map.height(), 4);
    assert_eq!(map.get(0, 0), 0.0);
    assert_eq!(map.get(0, 3), 1.0);
    assert_eq!(map.get(1, 0), 8.0 / 15.0);
    assert_eq!(map, ThresholdMap::from_grayscale(&texture).unwrap());
}
