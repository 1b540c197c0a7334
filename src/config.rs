use clap::ValueEnum;
use halftone_core::{
    BayerSize, BlurMethod, DitherStrategy, FixedThreshold, Luminance, ThresholdMap, Transfer,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Pipeline configuration loaded from halftone.yaml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Source PPM image
    pub input: Option<PathBuf>,

    /// Directory receiving every generated file
    pub output_dir: PathBuf,

    /// Transfer variants of the source to process
    pub transfers: Vec<TransferVariant>,

    /// Luminance weights; defaults per transfer variant when unset
    pub luminance: Option<LuminanceWeights>,

    /// Dither methods applied to each grayscale variant
    pub dithers: Vec<DitherMethod>,

    /// Dither methods applied to the blurred grayscale of each variant
    pub blurred_dithers: Vec<DitherMethod>,

    /// Fixed threshold as a fraction of max gray
    pub threshold: f64,

    /// Blur applied to grayscale and dithered output
    pub blur: BlurConfig,

    /// Seed for the random threshold (fresh entropy when unset)
    pub seed: Option<u64>,

    /// P5 texture for blue-noise ordered dithering
    pub blue_noise: Option<PathBuf>,
}

/// Blur settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlurConfig {
    pub radius: usize,
    pub method: BlurChoice,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            method: BlurChoice::SummedArea,
        }
    }
}

/// Which transfer function to apply to the source before reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TransferVariant {
    /// Keep the source as read
    None,
    /// Encode with the sRGB transfer function
    Srgb,
    /// Decode to linear light
    Linear,
}

impl TransferVariant {
    /// Prefix of every output file of this variant.
    pub fn name(self) -> &'static str {
        match self {
            TransferVariant::None => "normal",
            TransferVariant::Srgb => "srgb",
            TransferVariant::Linear => "linear",
        }
    }

    pub fn transfer(self) -> Option<Transfer> {
        match self {
            TransferVariant::None => None,
            TransferVariant::Srgb => Some(Transfer::ToSrgb),
            TransferVariant::Linear => Some(Transfer::ToLinear),
        }
    }

    /// Luminance weights matching the variant's encoding.
    pub fn default_luminance(self) -> Luminance {
        match self {
            TransferVariant::Linear => Luminance::Linear,
            TransferVariant::None | TransferVariant::Srgb => Luminance::Srgb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LuminanceWeights {
    /// 0.299 R + 0.587 G + 0.114 B
    Linear,
    /// 0.2126 R + 0.7152 G + 0.0722 B
    Srgb,
}

impl From<LuminanceWeights> for Luminance {
    fn from(weights: LuminanceWeights) -> Self {
        match weights {
            LuminanceWeights::Linear => Luminance::Linear,
            LuminanceWeights::Srgb => Luminance::Srgb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BlurChoice {
    Naive,
    SummedArea,
}

impl From<BlurChoice> for BlurMethod {
    fn from(choice: BlurChoice) -> Self {
        match choice {
            BlurChoice::Naive => BlurMethod::Naive,
            BlurChoice::SummedArea => BlurMethod::SummedArea,
        }
    }
}

/// Dither method as named in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DitherMethod {
    Threshold,
    Random,
    Bayer2,
    Bayer4,
    Bayer8,
    Bayer16,
    BlueNoise,
    FloydSteinberg,
    Atkinson,
    JarvisJudiceNinke,
}

impl DitherMethod {
    pub const ALL: [DitherMethod; 10] = [
        DitherMethod::Threshold,
        DitherMethod::Random,
        DitherMethod::Bayer2,
        DitherMethod::Bayer4,
        DitherMethod::Bayer8,
        DitherMethod::Bayer16,
        DitherMethod::BlueNoise,
        DitherMethod::FloydSteinberg,
        DitherMethod::Atkinson,
        DitherMethod::JarvisJudiceNinke,
    ];

    /// Name used in output file names.
    pub fn name(self) -> &'static str {
        match self {
            DitherMethod::Threshold => "threshold",
            DitherMethod::Random => "random",
            DitherMethod::Bayer2 => "bayer2",
            DitherMethod::Bayer4 => "bayer4",
            DitherMethod::Bayer8 => "bayer8",
            DitherMethod::Bayer16 => "bayer16",
            DitherMethod::BlueNoise => "blue-noise",
            DitherMethod::FloydSteinberg => "floyd-steinberg",
            DitherMethod::Atkinson => "atkinson",
            DitherMethod::JarvisJudiceNinke => "jarvis-judice-ninke",
        }
    }

    /// Methods whose output is noisy enough to be worth blurring back to gray.
    pub fn blur_output(self) -> bool {
        matches!(
            self,
            DitherMethod::Random
                | DitherMethod::FloydSteinberg
                | DitherMethod::Atkinson
                | DitherMethod::JarvisJudiceNinke
        )
    }

    /// Resolve into a core strategy.
    ///
    /// `blue_noise` must be present for [`DitherMethod::BlueNoise`].
    pub fn strategy(
        self,
        threshold: f64,
        blue_noise: Option<&ThresholdMap>,
    ) -> Result<DitherStrategy, PipelineError> {
        Ok(match self {
            DitherMethod::Threshold => DitherStrategy::FixedThreshold(FixedThreshold(threshold)),
            DitherMethod::Random => DitherStrategy::RandomThreshold,
            DitherMethod::Bayer2 => DitherStrategy::bayer(BayerSize::Two),
            DitherMethod::Bayer4 => DitherStrategy::bayer(BayerSize::Four),
            DitherMethod::Bayer8 => DitherStrategy::bayer(BayerSize::Eight),
            DitherMethod::Bayer16 => DitherStrategy::bayer(BayerSize::Sixteen),
            DitherMethod::BlueNoise => {
                let map = blue_noise.ok_or_else(|| {
                    PipelineError::Config("blue-noise dithering needs a blue_noise texture".into())
                })?;
                DitherStrategy::OrderedThreshold(map.clone())
            }
            DitherMethod::FloydSteinberg => DitherStrategy::FloydSteinberg,
            DitherMethod::Atkinson => DitherStrategy::Atkinson,
            DitherMethod::JarvisJudiceNinke => DitherStrategy::JarvisJudiceNinke,
        })
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Config not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            transfers = config.transfers.len(),
            dithers = config.dithers.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, PipelineError> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PipelineError::Config(format!(
                "threshold {} outside 0..=1",
                self.threshold
            )));
        }
        let wants_blue_noise = self
            .dithers
            .iter()
            .chain(&self.blurred_dithers)
            .any(|m| *m == DitherMethod::BlueNoise);
        if wants_blue_noise && self.blue_noise.is_none() {
            return Err(PipelineError::Config(
                "blue-noise dithering needs a blue_noise texture".into(),
            ));
        }
        Ok(())
    }

    /// Luminance for a variant, honoring an explicit override.
    pub fn luminance_for(&self, variant: TransferVariant) -> Luminance {
        self.luminance
            .map(Luminance::from)
            .unwrap_or_else(|| variant.default_luminance())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: PathBuf::from("output"),
            transfers: vec![
                TransferVariant::None,
                TransferVariant::Srgb,
                TransferVariant::Linear,
            ],
            luminance: None,
            dithers: DitherMethod::ALL
                .into_iter()
                .filter(|m| *m != DitherMethod::BlueNoise)
                .collect(),
            blurred_dithers: vec![DitherMethod::Bayer8, DitherMethod::FloydSteinberg],
            threshold: 0.5,
            blur: BlurConfig::default(),
            seed: None,
            blue_noise: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();

        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.transfers.len(), 3);
        assert_eq!(config.dithers.len(), 9);
        assert!(!config.dithers.contains(&DitherMethod::BlueNoise));
        assert_eq!(
            config.blurred_dithers,
            vec![DitherMethod::Bayer8, DitherMethod::FloydSteinberg]
        );
        assert_eq!(config.blur.radius, 5);
        assert_eq!(config.threshold, 0.5);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
input: images/tud.ppm
output_dir: out
transfers: [none, linear]
luminance: srgb
dithers:
  - floyd-steinberg
  - bayer8
  - blue-noise
blur:
  radius: 3
  method: naive
seed: 42
blue_noise: maps/blue.pgm
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.input, Some(PathBuf::from("images/tud.ppm")));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(
            config.transfers,
            vec![TransferVariant::None, TransferVariant::Linear]
        );
        assert_eq!(
            config.dithers,
            vec![
                DitherMethod::FloydSteinberg,
                DitherMethod::Bayer8,
                DitherMethod::BlueNoise
            ]
        );
        assert_eq!(config.blur.method, BlurChoice::Naive);
        assert_eq!(config.blur.radius, 3);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.luminance_for(TransferVariant::Linear), Luminance::Srgb);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = PipelineConfig::from_yaml("blur:\n  radius: 2\n").unwrap();
        assert_eq!(config.blur.radius, 2);
        assert_eq!(config.blur.method, BlurChoice::SummedArea);
        assert_eq!(config.transfers.len(), 3);
    }

    #[test]
    fn test_blue_noise_requires_texture() {
        let result = PipelineConfig::from_yaml("dithers: [blue-noise]\n");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_blurred_blue_noise_requires_texture() {
        let result = PipelineConfig::from_yaml("blurred_dithers: [blue-noise]\n");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = PipelineConfig::from_yaml("dither: [atkinson]\n");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_threshold_range_checked() {
        let result = PipelineConfig::from_yaml("threshold: 1.5\n");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_default_luminance_per_variant() {
        let config = PipelineConfig::default();
        assert_eq!(config.luminance_for(TransferVariant::None), Luminance::Srgb);
        assert_eq!(config.luminance_for(TransferVariant::Srgb), Luminance::Srgb);
        assert_eq!(config.luminance_for(TransferVariant::Linear), Luminance::Linear);
    }

    #[test]
    fn test_method_names_match_serde() {
        for method in DitherMethod::ALL {
            let yaml = serde_yaml::to_string(&method).unwrap();
            assert_eq!(yaml.trim(), method.name());
        }
    }

    #[test]
    fn test_strategy_resolution() {
        assert_eq!(
            DitherMethod::Threshold.strategy(0.25, None).unwrap(),
            DitherStrategy::FixedThreshold(FixedThreshold(0.25))
        );
        assert!(DitherMethod::BlueNoise.strategy(0.5, None).is_err());

        let map = ThresholdMap::new(1, 1, vec![0.5]).unwrap();
        assert_eq!(
            DitherMethod::BlueNoise.strategy(0.5, Some(&map)).unwrap(),
            DitherStrategy::OrderedThreshold(map)
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = PipelineConfig::load(Path::new("/nonexistent/halftone.yaml")).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }
}
