//! Lloyd's k-means, producing one snapshot per iteration for replay.

use serde::{Deserialize, Serialize};

use crate::schema::{ClusteringConfig, DataPoint, DataRng, PLOT_EXTENT};

/// Default center movement below which a run is converged.
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.01;

/// Position of one cluster's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterCenter {
    pub x: f64,
    pub y: f64,
    pub cluster: usize,
}

impl ClusterCenter {
    #[inline]
    fn distance_to(&self, other: &ClusterCenter) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Snapshot of a k-means run after one iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringStep {
    pub points: Vec<DataPoint>,
    pub centers: Vec<ClusterCenter>,
    pub iteration: usize,
    pub converged: bool,
}

/// K-means parameters.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub k: usize,
    pub max_iterations: usize,
    pub threshold: f64,
    /// Side length of the square that random centers are drawn from.
    pub bounds: f64,
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 100,
            threshold: DEFAULT_CONVERGENCE_THRESHOLD,
            bounds: PLOT_EXTENT,
        }
    }

    pub fn from_config(config: &ClusteringConfig) -> Self {
        Self {
            k: config.num_clusters,
            max_iterations: config.max_iterations,
            threshold: config.threshold,
            bounds: PLOT_EXTENT,
        }
    }

    /// Run to convergence or the iteration cap.
    ///
    /// Step 0 holds the unassigned points and the random initial centers;
    /// each later step holds the assignment made against the previous
    /// centers together with the recomputed centers.
    pub fn run(&self, points: &[DataPoint], rng: &mut DataRng) -> Vec<ClusteringStep> {
        let mut centers: Vec<ClusterCenter> =
            (0..self.k).map(|i| self.random_center(i, rng)).collect();
        let mut current: Vec<DataPoint> = points
            .iter()
            .map(|p| DataPoint { cluster: None, ..*p })
            .collect();

        let mut steps = vec![ClusteringStep {
            points: current.clone(),
            centers: centers.clone(),
            iteration: 0,
            converged: false,
        }];

        if self.k == 0 || current.is_empty() {
            return steps;
        }

        for iteration in 1..=self.max_iterations {
            for point in current.iter_mut() {
                point.cluster = Some(nearest_center(point, &centers));
            }

            let updated: Vec<ClusterCenter> = (0..self.k)
                .map(|cluster| self.recompute_center(&current, cluster, rng))
                .collect();

            let converged = centers
                .iter()
                .zip(&updated)
                .all(|(old, new)| old.distance_to(new) <= self.threshold);
            centers = updated;

            log::trace!("k-means iteration {iteration}: converged={converged}");
            steps.push(ClusteringStep {
                points: current.clone(),
                centers: centers.clone(),
                iteration,
                converged,
            });

            if converged {
                break;
            }
        }

        log::debug!(
            "k-means with k={} finished after {} iterations",
            self.k,
            steps.len() - 1
        );
        steps
    }

    fn random_center(&self, cluster: usize, rng: &mut DataRng) -> ClusterCenter {
        ClusterCenter {
            x: rng.uniform(0.0, self.bounds),
            y: rng.uniform(0.0, self.bounds),
            cluster,
        }
    }

    /// Centroid of the points assigned to `cluster`, re-randomized if empty.
    fn recompute_center(
        &self,
        points: &[DataPoint],
        cluster: usize,
        rng: &mut DataRng,
    ) -> ClusterCenter {
        let (sum_x, sum_y, count) = points
            .iter()
            .filter(|p| p.cluster == Some(cluster))
            .fold((0.0, 0.0, 0usize), |(sx, sy, n), p| (sx + p.x, sy + p.y, n + 1));

        if count == 0 {
            return self.random_center(cluster, rng);
        }
        ClusterCenter {
            x: sum_x / count as f64,
            y: sum_y / count as f64,
            cluster,
        }
    }
}

/// Index of the nearest center; ties go to the lowest index.
pub fn nearest_center(point: &DataPoint, centers: &[ClusterCenter]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, center) in centers.iter().enumerate() {
        let distance = point.distance_to(center.x, center.y);
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}
