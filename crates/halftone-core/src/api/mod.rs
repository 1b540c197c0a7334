//! Public API for the halftone-core crate.
//!
//! This module provides the high-level API: [`Ditherer`] builder and
//! [`ImageError`] unified error type.

mod builder;
mod error;

pub use builder::Ditherer;
pub use error::{ImageError, Result};
