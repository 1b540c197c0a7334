//! halftone - netpbm halftoning toolkit
//!
//! Reads and writes binary netpbm images and drives the `halftone-core`
//! transformations from a YAML pipeline file or the command line.
//! This library exposes modules for integration testing.

pub mod config;
pub mod error;
pub mod netpbm;
pub mod pipeline;

pub use config::{BlurChoice, DitherMethod, LuminanceWeights, PipelineConfig, TransferVariant};
pub use error::{CodecError, PipelineError};
pub use pipeline::{Pipeline, PipelineReport};
