//! Dataset generation for the sorting, clustering and regression pages.

use std::f64::consts::TAU;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Side length of the square plotting area points live in.
pub const PLOT_EXTENT: f64 = 100.0;

/// A 2D sample, optionally tagged with its assigned cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<usize>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            cluster: None,
        }
    }

    /// Euclidean distance to another position.
    #[inline]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

/// Random number generator wrapper for dataset generation.
pub struct DataRng {
    rng: StdRng,
}

impl DataRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create from an optional seed, falling back to entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::random(),
        }
    }

    /// Uniform random in `[min, max)`.
    #[inline]
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..max)
    }

    /// Uniform position inside the plotting area.
    pub fn position(&mut self) -> (f64, f64) {
        (
            self.uniform(0.0, PLOT_EXTENT),
            self.uniform(0.0, PLOT_EXTENT),
        )
    }

    /// Generate bar values in `[min_value, max_value)`.
    ///
    /// Reversed bounds are swapped; equal bounds give a constant array.
    pub fn bar_array(&mut self, size: usize, min_value: u32, max_value: u32) -> Vec<u32> {
        let (low, high) = (min_value.min(max_value), min_value.max(max_value));
        if low == high {
            return vec![low; size];
        }
        (0..size).map(|_| self.rng.gen_range(low..high)).collect()
    }

    /// Generate points scattered around `num_clusters` random centers.
    ///
    /// Centers keep a 10 unit margin from the edges; each point lands within
    /// `spread` of its center and is clamped to the plotting area.
    pub fn cluster_data(
        &mut self,
        num_points: usize,
        num_clusters: usize,
        spread: f64,
    ) -> Vec<DataPoint> {
        if num_clusters == 0 {
            return Vec::new();
        }

        let centers: Vec<(f64, f64)> = (0..num_clusters)
            .map(|_| (self.uniform(10.0, 90.0), self.uniform(10.0, 90.0)))
            .collect();

        (0..num_points)
            .map(|_| {
                let (cx, cy) = centers[self.rng.gen_range(0..num_clusters)];
                let angle = self.uniform(0.0, TAU);
                let radius = if spread > 0.0 {
                    self.uniform(0.0, spread)
                } else {
                    0.0
                };
                DataPoint::new(
                    (cx + radius * angle.cos()).clamp(0.0, PLOT_EXTENT),
                    (cy + radius * angle.sin()).clamp(0.0, PLOT_EXTENT),
                )
            })
            .collect()
    }

    /// Generate points along `y = x` with uniform noise of `noise^2`.
    pub fn linear_data(&mut self, num_points: usize, noise: f64) -> Vec<DataPoint> {
        let amplitude = noise * noise;
        (0..num_points)
            .map(|_| {
                let x = self.uniform(0.0, PLOT_EXTENT);
                let jitter = self.uniform(-1.0, 1.0) * amplitude;
                DataPoint::new(x, x + jitter)
            })
            .collect()
    }
}
