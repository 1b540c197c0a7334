//! Batch pipeline: one source image in, a directory of variants out.
//!
//! For every configured transfer variant the pipeline writes the converted
//! color image, its grayscale reduction, one bilevel image per dither
//! method, the two-level expansion of the noisy dithers with its blurred
//! reconstruction, a blurred grayscale reference, and that reference
//! dithered again:
//!
//! ```text
//! <variant>_color.ppm
//! <variant>_gray.pgm
//! <variant>_<dither>.pbm
//! <variant>_<dither>.pgm           (random and error diffusion only)
//! <variant>_<dither>_blur.pgm      (random and error diffusion only)
//! <variant>_gray_blur.pgm
//! <variant>_gray_blur_<dither>.pbm (one per blurred_dithers entry)
//! ```

use std::path::{Path, PathBuf};

use halftone_core::{
    blur, convert, reduce, BilevelImage, Ditherer, GrayscaleImage, ThresholdMap, TrueColorImage,
};

use crate::config::{DitherMethod, PipelineConfig, TransferVariant};
use crate::error::PipelineError;
use crate::netpbm::{self, NetpbmFormat};

/// Files written by one pipeline run, in write order.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub written: Vec<PathBuf>,
}

impl PipelineReport {
    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.written
            .iter()
            .any(|p| p.file_name().is_some_and(|f| f == name))
    }
}

/// Pipeline bound to a configuration
pub struct Pipeline {
    config: PipelineConfig,
    blue_noise: Option<ThresholdMap>,
}

impl Pipeline {
    /// Create a pipeline, loading the blue-noise texture if one is configured.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let blue_noise = match &config.blue_noise {
            Some(path) => {
                let map = netpbm::load_threshold_map(path)?;
                tracing::info!(
                    path = %path.display(),
                    width = map.width(),
                    height = map.height(),
                    "Loaded blue-noise texture"
                );
                Some(map)
            }
            None => None,
        };
        Ok(Self { config, blue_noise })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured input and run the pipeline on it.
    pub fn run_file(&self) -> Result<PipelineReport, PipelineError> {
        let input = self
            .config
            .input
            .as_deref()
            .ok_or_else(|| PipelineError::Config("no input image configured".into()))?;
        let image: TrueColorImage = netpbm::load(input)?;
        tracing::info!(
            path = %input.display(),
            width = image.width(),
            height = image.height(),
            "Loaded input"
        );
        self.run(&image)
    }

    /// Run every configured variant on `image`.
    pub fn run(&self, image: &TrueColorImage) -> Result<PipelineReport, PipelineError> {
        // Resolve up front so a bad method fails before anything is written.
        let dithers = self.ditherers(&self.config.dithers)?;
        let blurred_dithers = self.ditherers(&self.config.blurred_dithers)?;

        std::fs::create_dir_all(&self.config.output_dir)?;
        let mut report = PipelineReport::default();
        for &variant in &self.config.transfers {
            self.run_variant(image, variant, &dithers, &blurred_dithers, &mut report)?;
        }

        tracing::info!(
            files = report.len(),
            output_dir = %self.config.output_dir.display(),
            "Pipeline finished"
        );
        Ok(report)
    }

    fn ditherers(
        &self,
        methods: &[DitherMethod],
    ) -> Result<Vec<(DitherMethod, Ditherer)>, PipelineError> {
        methods
            .iter()
            .map(|method| {
                let strategy = method.strategy(self.config.threshold, self.blue_noise.as_ref())?;
                let mut ditherer = Ditherer::new(strategy);
                if let Some(seed) = self.config.seed {
                    ditherer = ditherer.seed(seed);
                }
                Ok((*method, ditherer))
            })
            .collect()
    }

    fn run_variant(
        &self,
        image: &TrueColorImage,
        variant: TransferVariant,
        dithers: &[(DitherMethod, Ditherer)],
        blurred_dithers: &[(DitherMethod, Ditherer)],
        report: &mut PipelineReport,
    ) -> Result<(), PipelineError> {
        let prefix = variant.name();
        let _span = tracing::info_span!("variant", name = prefix).entered();

        let converted = match variant.transfer() {
            Some(transfer) => convert(image, transfer)?,
            None => image.clone(),
        };
        self.write(&converted, &format!("{prefix}_color"), report)?;

        let gray = reduce(&converted, self.config.luminance_for(variant))?;
        self.write(&gray, &format!("{prefix}_gray"), report)?;

        for (method, ditherer) in dithers {
            let bits = ditherer.quantize(&gray)?;
            tracing::debug!(
                method = method.name(),
                ink = bits.ink_count(),
                "Dithered"
            );
            self.write(&bits, &format!("{prefix}_{}", method.name()), report)?;

            if method.blur_output() {
                let expanded = bits.to_grayscale()?;
                self.write(&expanded, &format!("{prefix}_{}", method.name()), report)?;
                let blurred = self.blur(&expanded)?;
                self.write(&blurred, &format!("{prefix}_{}_blur", method.name()), report)?;
            }
        }

        let blurred = self.blur(&gray)?;
        self.write(&blurred, &format!("{prefix}_gray_blur"), report)?;

        for (method, ditherer) in blurred_dithers {
            let bits = ditherer.quantize(&blurred)?;
            self.write(&bits, &format!("{prefix}_gray_blur_{}", method.name()), report)?;
        }
        Ok(())
    }

    fn blur(&self, image: &GrayscaleImage) -> Result<GrayscaleImage, PipelineError> {
        Ok(blur(
            image,
            self.config.blur.radius,
            self.config.blur.method.into(),
        )?)
    }

    fn write<T: NetpbmFormat>(
        &self,
        image: &T,
        stem: &str,
        report: &mut PipelineReport,
    ) -> Result<(), PipelineError> {
        let path = output_path(&self.config.output_dir, stem, T::EXTENSION);
        netpbm::save(image, &path)?;
        tracing::info!(path = %path.display(), "Wrote");
        report.written.push(path);
        Ok(())
    }
}

fn output_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    dir.join(format!("{stem}.{extension}"))
}

/// Expand a bilevel image to a two-level grayscale image and blur it.
pub fn reconstruct(
    bits: &BilevelImage,
    radius: usize,
    method: halftone_core::BlurMethod,
) -> Result<GrayscaleImage, PipelineError> {
    Ok(blur(&bits.to_grayscale()?, radius, method)?)
}
