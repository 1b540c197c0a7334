//! Neighborhood filters and image statistics.

mod blur;
mod sat;
mod stats;

pub use blur::{blur, box_blur, windowed_average, BlurMethod};
pub use sat::SummedAreaTable;
pub use stats::{difference, mean, power_sum, variance};
