//! WebAssembly bindings for the visualizer.
//!
//! Provides thin wrappers around `SortSession`, `KMeans` and the regression
//! fitter for browser environments. The page owns the render loop: it calls
//! `poll(performance.now())` from `requestAnimationFrame` and paints the
//! bar heights and colors returned by the session.

use std::time::Duration;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    animation::{BarSurface, Renderer, SortSession, TriggerOutcome},
    compute::{ClusteringStep, KMeans, SortAlgorithm, linear_regression, progressive_fits},
    schema::{DataPoint, DataRng, VisualizerConfig},
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

fn parse_config(config_json: &str) -> Result<VisualizerConfig, JsValue> {
    if config_json.trim().is_empty() {
        return Ok(VisualizerConfig::default());
    }
    let config: VisualizerConfig = serde_json::from_str(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {e}")))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;
    Ok(config)
}

/// Seeded generator, falling back to `Math.random` when no seed is given.
fn rng_from(seed: Option<u64>) -> DataRng {
    let seed = seed.unwrap_or_else(|| {
        let r1 = js_sys::Math::random();
        let r2 = js_sys::Math::random();
        ((r1 * u32::MAX as f64) as u64) << 32 | (r2 * u32::MAX as f64) as u64
    });
    DataRng::new(seed)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn millis(now_ms: f64) -> Duration {
    Duration::from_secs_f64(now_ms.max(0.0) / 1000.0)
}

/// WebAssembly wrapper for the sorting page.
#[wasm_bindgen]
pub struct WasmSortSession {
    session: SortSession<BarSurface>,
}

#[wasm_bindgen]
impl WasmSortSession {
    /// Create a session from JSON configuration (empty string for defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmSortSession, JsValue> {
        let config = parse_config(config_json)?;
        let session = SortSession::new(
            config.sorting,
            config.playback,
            BarSurface::default(),
            rng_from(config.random_seed),
        );
        Ok(WasmSortSession { session })
    }

    /// Sort button handler. Returns the number of recorded operations, or
    /// -1 when the click reset the array instead.
    #[wasm_bindgen]
    pub fn trigger(&mut self, algorithm: &str, now_ms: f64) -> Result<i32, JsValue> {
        let algorithm: SortAlgorithm = algorithm
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        match self.session.trigger(algorithm, millis(now_ms)) {
            Ok(TriggerOutcome::Started { operations }) => Ok(operations as i32),
            Ok(TriggerOutcome::Reset) => Ok(-1),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Advance playback. Returns the status name.
    #[wasm_bindgen]
    pub fn poll(&mut self, now_ms: f64) -> String {
        let status = self.session.poll(millis(now_ms));
        format!("{status:?}").to_lowercase()
    }

    /// Milliseconds timestamp of the next scheduled work, or -1 when idle.
    #[wasm_bindgen(js_name = nextDeadline)]
    pub fn next_deadline(&self) -> f64 {
        self.session
            .next_deadline()
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(-1.0)
    }

    /// Generate a new random array.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset_array();
    }

    #[wasm_bindgen]
    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, speed: u32) {
        self.session.set_speed(speed);
    }

    #[wasm_bindgen(js_name = setArraySize)]
    pub fn set_array_size(&mut self, size: usize) {
        self.session.set_array_size(size);
    }

    /// Current bar heights.
    #[wasm_bindgen]
    pub fn heights(&self) -> Vec<u32> {
        self.session.renderer().heights()
    }

    /// Current bar colors as CSS tokens.
    #[wasm_bindgen]
    pub fn colors(&self) -> Result<JsValue, JsValue> {
        let colors: Vec<&str> = self
            .session
            .renderer()
            .colors()
            .iter()
            .map(|c| c.css())
            .collect();
        to_js(&colors)
    }

    #[wasm_bindgen(js_name = barWidth)]
    pub fn bar_width(&self) -> u32 {
        self.session.renderer().width()
    }

    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.stats())
    }
}

/// WebAssembly wrapper for the clustering page.
#[wasm_bindgen]
pub struct WasmKMeans {
    points: Vec<DataPoint>,
    steps: Vec<ClusteringStep>,
    kmeans: KMeans,
    spread: f64,
    rng: DataRng,
}

#[wasm_bindgen]
impl WasmKMeans {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmKMeans, JsValue> {
        let config = parse_config(config_json)?;
        let mut rng = rng_from(config.random_seed);
        let clustering = &config.clustering;
        let points =
            rng.cluster_data(clustering.num_points, clustering.num_clusters, clustering.spread);
        Ok(WasmKMeans {
            points,
            steps: Vec::new(),
            kmeans: KMeans::from_config(clustering),
            spread: clustering.spread,
            rng,
        })
    }

    /// Generate a new point cloud and drop previous steps.
    #[wasm_bindgen(js_name = resetData)]
    pub fn reset_data(&mut self, num_points: usize, num_clusters: usize) {
        self.kmeans.k = num_clusters;
        self.points = self
            .rng
            .cluster_data(num_points, num_clusters, self.spread);
        self.steps.clear();
    }

    /// Run k-means and return the number of steps produced.
    #[wasm_bindgen]
    pub fn run(&mut self) -> usize {
        self.steps = self.kmeans.run(&self.points, &mut self.rng);
        self.steps.len()
    }

    #[wasm_bindgen(js_name = getPoints)]
    pub fn get_points(&self) -> Result<JsValue, JsValue> {
        to_js(&self.points)
    }

    /// Snapshot for a step index, for replay and scrubbing.
    #[wasm_bindgen(js_name = getStep)]
    pub fn get_step(&self, index: usize) -> Result<JsValue, JsValue> {
        let step = self
            .steps
            .get(index)
            .ok_or_else(|| JsValue::from_str(&format!("Step {index} out of range")))?;
        to_js(step)
    }
}

/// Fit a line to `[{x, y}, ...]`. Returns `{slope, intercept}`.
#[wasm_bindgen(js_name = linearRegression)]
pub fn wasm_linear_regression(points: JsValue) -> Result<JsValue, JsValue> {
    let points: Vec<DataPoint> = serde_wasm_bindgen::from_value(points)
        .map_err(|e| JsValue::from_str(&format!("Invalid points: {e}")))?;
    to_js(&linear_regression(&points))
}

/// Fits over every prefix of length 2..=n.
#[wasm_bindgen(js_name = progressiveFits)]
pub fn wasm_progressive_fits(points: JsValue) -> Result<JsValue, JsValue> {
    let points: Vec<DataPoint> = serde_wasm_bindgen::from_value(points)
        .map_err(|e| JsValue::from_str(&format!("Invalid points: {e}")))?;
    to_js(&progressive_fits(&points))
}

/// Generate noisy linear data for the regression page.
#[wasm_bindgen(js_name = generateLinearData)]
pub fn generate_linear_data(num_points: usize, noise: f64) -> Result<JsValue, JsValue> {
    let mut rng = rng_from(None);
    to_js(&rng.linear_data(num_points, noise))
}
