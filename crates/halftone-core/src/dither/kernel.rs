//! Diffusion weight tables.
//!
//! A table lists the not-yet-visited neighbors of the current pixel and the
//! share of its quantization error each one receives. Tables never reach
//! backwards: every tap is on the current row to the right, or on a later
//! row. Taps that land outside the image are dropped by the diffusion loop
//! rather than folded back onto in-bounds pixels.

/// One neighbor of the current pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tap {
    /// Column offset; negative values are to the left.
    pub dx: i32,
    /// Row offset, 0 for the current row.
    pub dy: u32,
    /// Numerator over [`DiffusionTable::denominator`].
    pub weight: u8,
}

const fn tap(dx: i32, dy: u32, weight: u8) -> Tap {
    Tap { dx, dy, weight }
}

/// Weighted neighbor list for one error diffusion algorithm.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionTable {
    pub taps: &'static [Tap],
    pub denominator: u8,
}

impl DiffusionTable {
    /// Number of rows below the current one that the table touches.
    pub fn reach(&self) -> usize {
        self.taps.iter().map(|t| t.dy as usize).max().unwrap_or(0)
    }
}

/// Floyd-Steinberg, /16.
///
/// ```text
///        *  7
///    3   5  1
/// ```
pub const FLOYD_STEINBERG: DiffusionTable = DiffusionTable {
    taps: &[tap(1, 0, 7), tap(-1, 1, 3), tap(0, 1, 5), tap(1, 1, 1)],
    denominator: 16,
};

/// Atkinson, /8 with only 6/8 handed on.
///
/// ```text
///        *  1  1
///    1   1  1
///        1
/// ```
pub const ATKINSON: DiffusionTable = DiffusionTable {
    taps: &[
        tap(1, 0, 1),
        tap(2, 0, 1),
        tap(-1, 1, 1),
        tap(0, 1, 1),
        tap(1, 1, 1),
        tap(0, 2, 1),
    ],
    denominator: 8,
};

/// Jarvis-Judice-Ninke, /48 over ten taps (weights sum to 44).
///
/// ```text
///        *  7  5
///    3   5  7  5
///    1   3  5  3
/// ```
pub const JARVIS_JUDICE_NINKE: DiffusionTable = DiffusionTable {
    taps: &[
        tap(1, 0, 7),
        tap(2, 0, 5),
        tap(-1, 1, 3),
        tap(0, 1, 5),
        tap(1, 1, 7),
        tap(2, 1, 5),
        tap(-1, 2, 1),
        tap(0, 2, 3),
        tap(1, 2, 5),
        tap(2, 2, 3),
    ],
    denominator: 48,
};
