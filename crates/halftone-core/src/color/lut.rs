//! Transfer-function lookup tables
//!
//! This module provides bit-exact 8-bit transfer conversion using tables
//! generated at compile time by build.rs from the exact IEC 61966-2-1
//! formulas, including the final truncation to an integer sample.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/transfer_lut.rs"));

/// Convert an 8-bit sRGB-encoded sample to an 8-bit linear sample.
#[inline]
pub fn srgb_to_linear_u8(sample: u8) -> u8 {
    SRGB_TO_LINEAR[sample as usize]
}

/// Convert an 8-bit linear sample to an 8-bit sRGB-encoded sample.
#[inline]
pub fn linear_to_srgb_u8(sample: u8) -> u8 {
    LINEAR_TO_SRGB[sample as usize]
}
