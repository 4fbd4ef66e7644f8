//! Compute module - The algorithms being visualized.

mod kmeans;
mod regression;
mod sorting;

pub use kmeans::*;
pub use regression::*;
pub use sorting::*;
