//! Algorithm visualizer - recorded sort animations, k-means and linear regression.
//!
//! This crate provides the engine behind a small educational visualizer.
//! Sorting algorithms are recorded into replayable operation logs which a
//! cooperative scheduler paints onto a bar renderer at a user-controlled
//! speed. Clustering and regression are plain functions whose outputs are
//! stepped through directly.
//!
//! # Architecture
//!
//! - `schema`: Configuration types and dataset generation
//! - `compute`: The algorithms (sorts, k-means, least squares)
//! - `animation`: Operation logs, the recorder, the playback scheduler and
//!   the sorting session
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use algo_viz::{
//!     animation::{BarSurface, PlaybackScheduler, record},
//!     compute::SortAlgorithm,
//!     schema::PlaybackConfig,
//! };
//!
//! let values = vec![5, 3, 8, 1];
//! let log = record(SortAlgorithm::Bubble, &values);
//!
//! let mut surface = BarSurface::from_values(&values);
//! let mut scheduler = PlaybackScheduler::new(PlaybackConfig::default(), 50);
//! scheduler.start(log, &surface, Duration::ZERO).unwrap();
//! scheduler.run_virtual(&mut surface, Duration::ZERO);
//!
//! assert_eq!(surface.heights(), vec![1, 3, 5, 8]);
//! ```

pub mod animation;
pub mod compute;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use animation::{AnimationLog, Operation, PlaybackScheduler, Renderer, SortSession};
pub use compute::{KMeans, LinearFit, SortAlgorithm, linear_regression};
pub use schema::{DataPoint, DataRng, VisualizerConfig};
