//! Schema module - Configuration and dataset types for the visualizer.

mod config;
mod dataset;

pub use config::*;
pub use dataset::*;
