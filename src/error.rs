use halftone_core::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported format: expected {expected}, found {found:?}")]
    BadMagic {
        expected: &'static str,
        found: String,
    },

    #[error("Invalid header: {0}")]
    BadHeader(String),

    #[error("Unsupported max value {value} (allowed {allowed})")]
    UnsupportedMaxValue { value: u32, allowed: &'static str },

    #[error("Truncated pixel data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
