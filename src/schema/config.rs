//! Configuration types for the visualizer pages and playback pacing.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level visualizer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualizerConfig {
    /// Sorting page parameters.
    #[serde(default)]
    pub sorting: SortingConfig,
    /// Playback pacing constants.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Clustering page parameters.
    #[serde(default)]
    pub clustering: ClusteringConfig,
    /// Regression page parameters.
    #[serde(default)]
    pub regression: RegressionConfig,
    /// Seed for dataset generation (None = entropy).
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Sorting page parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SortingConfig {
    /// Number of bars (2-100).
    pub array_size: usize,
    /// Playback speed slider (1-100, higher is faster).
    pub speed: u32,
    /// Smallest generated bar value (inclusive).
    pub min_value: u32,
    /// Largest generated bar value (exclusive).
    pub max_value: u32,
    /// Total drawing width shared by all bars.
    pub canvas_width: u32,
}

impl SortingConfig {
    pub const MIN_ARRAY_SIZE: usize = 2;
    pub const MAX_ARRAY_SIZE: usize = 100;
    pub const MIN_SPEED: u32 = 1;
    pub const MAX_SPEED: u32 = 100;

    /// Width of a single bar for the current array size.
    #[inline]
    pub fn bar_width(&self) -> u32 {
        self.canvas_width / self.array_size.max(1) as u32
    }
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            array_size: 50,
            speed: 20,
            min_value: 10,
            max_value: 700,
            canvas_width: 1000,
        }
    }
}

/// Constants driving the speed slider to tick cadence mapping.
///
/// The slider value `s` becomes a slowness `100 - s` (milliseconds). Ticks are
/// spaced by the slowness clamped to `[min_frame_delay_ms, max_frame_delay_ms]`,
/// dropping straight to the floor below `fast_threshold`. Below
/// `batch_threshold` several log entries are applied per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub min_frame_delay_ms: u64,
    pub max_frame_delay_ms: u64,
    pub fast_threshold: u64,
    pub batch_threshold: u64,
    pub max_batch: usize,
    /// Minimum highlight time for compares.
    pub compare_highlight_ms: u64,
    /// Minimum highlight time for swaps.
    pub swap_highlight_ms: u64,
    /// Minimum highlight time for overwrites.
    pub overwrite_highlight_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            min_frame_delay_ms: 1,
            max_frame_delay_ms: 50,
            fast_threshold: 10,
            batch_threshold: 20,
            max_batch: 10,
            compare_highlight_ms: 10,
            swap_highlight_ms: 15,
            overwrite_highlight_ms: 12,
        }
    }
}

/// Clustering page parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of generated points.
    pub num_points: usize,
    /// Number of clusters, used both for generation and as k.
    pub num_clusters: usize,
    /// Iteration cap for k-means.
    pub max_iterations: usize,
    /// Center movement below which k-means is converged.
    pub threshold: f64,
    /// Replay speed slider (1-100).
    pub speed: u32,
    /// Radius of generated blobs around their true centers.
    pub spread: f64,
}

impl ClusteringConfig {
    pub const MAX_CLUSTERS: usize = 10;

    /// Delay between replayed clustering steps.
    #[inline]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(110u64.saturating_sub(self.speed as u64))
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            num_points: 100,
            num_clusters: 3,
            max_iterations: 100,
            threshold: 0.01,
            speed: 50,
            spread: 15.0,
        }
    }
}

/// Regression page parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Number of generated points (10-100).
    pub num_points: usize,
    /// Noise level (0-10); y deviates by up to `noise^2`.
    pub noise: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            num_points: 50,
            noise: 3.0,
        }
    }
}

impl VisualizerConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: VisualizerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sorting = &self.sorting;
        if !(SortingConfig::MIN_ARRAY_SIZE..=SortingConfig::MAX_ARRAY_SIZE)
            .contains(&sorting.array_size)
        {
            return Err(ConfigError::InvalidArraySize(sorting.array_size));
        }
        if !(SortingConfig::MIN_SPEED..=SortingConfig::MAX_SPEED).contains(&sorting.speed) {
            return Err(ConfigError::InvalidSpeed(sorting.speed));
        }
        if sorting.min_value >= sorting.max_value {
            return Err(ConfigError::InvalidValueRange {
                min: sorting.min_value,
                max: sorting.max_value,
            });
        }
        if sorting.canvas_width == 0 {
            return Err(ConfigError::InvalidCanvasWidth);
        }

        let playback = &self.playback;
        if playback.min_frame_delay_ms == 0 {
            return Err(ConfigError::ZeroFrameDelay);
        }
        if playback.min_frame_delay_ms > playback.max_frame_delay_ms {
            return Err(ConfigError::InvalidFrameDelayRange {
                min: playback.min_frame_delay_ms,
                max: playback.max_frame_delay_ms,
            });
        }
        if playback.max_batch == 0 {
            return Err(ConfigError::ZeroBatch);
        }

        let clustering = &self.clustering;
        if clustering.num_clusters == 0 || clustering.num_clusters > ClusteringConfig::MAX_CLUSTERS
        {
            return Err(ConfigError::InvalidClusterCount(clustering.num_clusters));
        }
        if clustering.threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold);
        }
        if !(1..=100).contains(&clustering.speed) {
            return Err(ConfigError::InvalidSpeed(clustering.speed));
        }

        if !(10..=100).contains(&self.regression.num_points) {
            return Err(ConfigError::InvalidPointCount(self.regression.num_points));
        }
        if !(0.0..=10.0).contains(&self.regression.noise) {
            return Err(ConfigError::InvalidNoise(self.regression.noise));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Array size {0} outside 2..=100")]
    InvalidArraySize(usize),
    #[error("Speed {0} outside 1..=100")]
    InvalidSpeed(u32),
    #[error("Value range [{min}, {max}) is empty")]
    InvalidValueRange { min: u32, max: u32 },
    #[error("Canvas width must be non-zero")]
    InvalidCanvasWidth,
    #[error("Minimum frame delay must be positive")]
    ZeroFrameDelay,
    #[error("Frame delay range [{min}, {max}] is inverted")]
    InvalidFrameDelayRange { min: u64, max: u64 },
    #[error("Batch size must be non-zero")]
    ZeroBatch,
    #[error("Cluster count {0} outside 1..=10")]
    InvalidClusterCount(usize),
    #[error("Convergence threshold must be positive")]
    InvalidThreshold,
    #[error("Regression point count {0} outside 10..=100")]
    InvalidPointCount(usize),
    #[error("Noise {0} outside 0..=10")]
    InvalidNoise(f64),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        assert!(VisualizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bar_width() {
        let sorting = SortingConfig {
            array_size: 30,
            ..Default::default()
        };
        assert_eq!(sorting.bar_width(), 33);
    }

    #[test]
    fn test_step_delay() {
        let clustering = ClusteringConfig::default();
        assert_eq!(clustering.step_delay(), Duration::from_millis(60));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut config = VisualizerConfig::default();
        config.sorting.array_size = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidArraySize(1))
        ));

        let mut config = VisualizerConfig::default();
        config.sorting.speed = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSpeed(0))));

        let mut config = VisualizerConfig::default();
        config.playback.min_frame_delay_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroFrameDelay)));

        let mut config = VisualizerConfig::default();
        config.clustering.num_clusters = 11;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidClusterCount(11))
        ));

        let mut config = VisualizerConfig::default();
        config.regression.num_points = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPointCount(5))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: VisualizerConfig =
            serde_json::from_str(r#"{"sorting": {"array_size": 12}, "random_seed": 7}"#).unwrap();
        assert_eq!(config.sorting.array_size, 12);
        assert_eq!(config.sorting.speed, 20);
        assert_eq!(config.clustering.num_clusters, 3);
        assert_eq!(config.random_seed, Some(7));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"regression": {{"num_points": 20, "noise": 1.5}}}}"#).unwrap();

        let config = VisualizerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.regression.num_points, 20);
        assert!((config.regression.noise - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"sorting": {{"speed": 500}}}}"#).unwrap();
        assert!(matches!(
            VisualizerConfig::from_json_file(file.path()),
            Err(ConfigError::InvalidSpeed(500))
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            VisualizerConfig::from_json_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
