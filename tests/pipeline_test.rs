//! End-to-end pipeline tests: YAML in, a directory of netpbm files out.

mod common;

use common::fixtures::{self, images, SEED};
use halftone::netpbm;
use halftone::{DitherMethod, Pipeline, PipelineConfig, PipelineError, TransferVariant};
use halftone_core::{BayerSize, BilevelImage, DitherStrategy, Ditherer, GrayscaleImage};
use pretty_assertions::assert_eq;

#[test]
fn test_default_pipeline_writes_every_variant() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures::write_image(dir.path(), "input.ppm", &images::color_ramp(24, 16));
    let out = dir.path().join("out");

    let config = PipelineConfig {
        input: Some(input),
        output_dir: out.clone(),
        seed: Some(SEED),
        ..Default::default()
    };
    let report = Pipeline::new(config).unwrap().run_file().unwrap();

    // per variant: color, gray, 9 dithers, 4 expansions, 4 expansion blurs,
    // gray blur, 2 dithers of the gray blur
    assert_eq!(report.len(), 3 * 22);
    for variant in ["normal", "srgb", "linear"] {
        common::assert_outputs(
            &out,
            &[
                &format!("{variant}_color.ppm"),
                &format!("{variant}_gray.pgm"),
                &format!("{variant}_threshold.pbm"),
                &format!("{variant}_random.pbm"),
                &format!("{variant}_random.pgm"),
                &format!("{variant}_random_blur.pgm"),
                &format!("{variant}_bayer16.pbm"),
                &format!("{variant}_floyd-steinberg.pbm"),
                &format!("{variant}_floyd-steinberg.pgm"),
                &format!("{variant}_floyd-steinberg_blur.pgm"),
                &format!("{variant}_atkinson.pgm"),
                &format!("{variant}_atkinson_blur.pgm"),
                &format!("{variant}_jarvis-judice-ninke.pgm"),
                &format!("{variant}_jarvis-judice-ninke_blur.pgm"),
                &format!("{variant}_gray_blur.pgm"),
                &format!("{variant}_gray_blur_bayer8.pbm"),
                &format!("{variant}_gray_blur_floyd-steinberg.pbm"),
            ],
        );
        assert!(!report.contains(&format!("{variant}_bayer4_blur.pgm")));
        assert!(!report.contains(&format!("{variant}_bayer4.pgm")));
    }
}

#[test]
fn test_pipeline_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_image(dir.path(), "input.ppm", &images::color_ramp(10, 6));
    fixtures::write_image(dir.path(), "noise.pgm", &images::noise_texture());
    let yaml = format!(
        "input: {input}\noutput_dir: {out}\ntransfers: [linear]\ndithers: [blue-noise, atkinson]\nblue_noise: {noise}\nblur:\n  radius: 2\n  method: naive\n",
        input = dir.path().join("input.ppm").display(),
        out = dir.path().join("out").display(),
        noise = dir.path().join("noise.pgm").display(),
    );
    let config_path = fixtures::write_config(dir.path(), &yaml);

    let config = PipelineConfig::load(&config_path).unwrap();
    let report = Pipeline::new(config).unwrap().run_file().unwrap();

    let names: Vec<String> = report
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "linear_color.ppm",
            "linear_gray.pgm",
            "linear_blue-noise.pbm",
            "linear_atkinson.pbm",
            "linear_atkinson.pgm",
            "linear_atkinson_blur.pgm",
            "linear_gray_blur.pgm",
            "linear_gray_blur_bayer8.pbm",
            "linear_gray_blur_floyd-steinberg.pbm",
        ]
    );
}

#[test]
fn test_seeded_random_output_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let image = images::color_ramp(32, 8);
    let run = |name: &str| {
        let config = PipelineConfig {
            output_dir: dir.path().join(name),
            transfers: vec![TransferVariant::None],
            dithers: vec![DitherMethod::Random],
            seed: Some(SEED),
            ..Default::default()
        };
        Pipeline::new(config).unwrap().run(&image).unwrap();
        netpbm::load::<BilevelImage>(&dir.path().join(name).join("normal_random.pbm")).unwrap()
    };

    assert_eq!(run("a"), run("b"));
}

#[test]
fn test_dither_blur_is_two_level_reconstruction() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        output_dir: dir.path().to_path_buf(),
        transfers: vec![TransferVariant::None],
        dithers: vec![DitherMethod::FloydSteinberg],
        ..Default::default()
    };
    let image = images::color_ramp(16, 16);
    Pipeline::new(config).unwrap().run(&image).unwrap();

    let blurred: GrayscaleImage =
        netpbm::load(&dir.path().join("normal_floyd-steinberg_blur.pgm")).unwrap();
    assert_eq!(blurred.max_gray(), 1);
    assert_eq!(blurred.width(), 16);
    assert!(blurred.iter().all(|v| v <= 1));
}

#[test]
fn test_dither_expansion_matches_bilevel_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        output_dir: dir.path().to_path_buf(),
        transfers: vec![TransferVariant::None],
        dithers: vec![DitherMethod::Atkinson],
        ..Default::default()
    };
    Pipeline::new(config).unwrap().run(&images::color_ramp(12, 8)).unwrap();

    let bits: BilevelImage = netpbm::load(&dir.path().join("normal_atkinson.pbm")).unwrap();
    let expanded: GrayscaleImage =
        netpbm::load(&dir.path().join("normal_atkinson.pgm")).unwrap();
    assert_eq!(expanded.max_gray(), 1);
    assert_eq!(expanded, bits.to_grayscale().unwrap());
}

#[test]
fn test_blurred_gray_is_dithered_again() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = format!(
        "output_dir: {}
transfers: [none]
dithers: []
blurred_dithers: [bayer4]
blur:
  radius: 2
",
        dir.path().display()
    );
    let config = PipelineConfig::from_yaml(&yaml).unwrap();
    let report = Pipeline::new(config)
        .unwrap()
        .run(&images::color_ramp(16, 8))
        .unwrap();
    assert!(!report.contains("normal_gray_blur_floyd-steinberg.pbm"));

    let blurred: GrayscaleImage =
        netpbm::load(&dir.path().join("normal_gray_blur.pgm")).unwrap();
    let bits: BilevelImage =
        netpbm::load(&dir.path().join("normal_gray_blur_bayer4.pbm")).unwrap();
    let expected = Ditherer::new(DitherStrategy::bayer(BayerSize::Four))
        .quantize(&blurred)
        .unwrap();
    assert_eq!(bits, expected);
}

#[test]
fn test_blur_output_matches_for_both_methods() {
    let dir = tempfile::tempdir().unwrap();
    let image = images::color_ramp(20, 12);
    let run = |name: &str, method: &str| {
        let yaml = format!(
            "output_dir: {}\ntransfers: [srgb]\ndithers: []\nblur:\n  radius: 3\n  method: {method}\n",
            dir.path().join(name).display()
        );
        let config = PipelineConfig::from_yaml(&yaml).unwrap();
        Pipeline::new(config).unwrap().run(&image).unwrap();
        netpbm::load::<GrayscaleImage>(&dir.path().join(name).join("srgb_gray_blur.pgm")).unwrap()
    };

    assert_eq!(run("naive", "naive"), run("sat", "summed-area"));
}

#[test]
fn test_missing_blue_noise_texture_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        output_dir: dir.path().join("out"),
        blue_noise: Some(dir.path().join("absent.pgm")),
        ..Default::default()
    };
    assert!(matches!(
        Pipeline::new(config),
        Err(PipelineError::Codec(_))
    ));
}

#[test]
fn test_invalid_yaml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_config(dir.path(), "transfers: [sepia]\n");
    assert!(matches!(
        PipelineConfig::load(&path),
        Err(PipelineError::Config(_))
    ));
}
