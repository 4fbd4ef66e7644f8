//! Sorting page state: the live array, its renderer and the playback run.

use std::time::Duration;

use super::player::{PlaybackError, PlaybackScheduler, PlaybackStats, PlaybackStatus};
use super::recorder::record;
use super::renderer::{BarColor, Renderer};
use crate::compute::SortAlgorithm;
use crate::schema::{DataRng, PlaybackConfig, SortingConfig};

/// What a sort trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A recording was made and playback started (or was a no-op for an
    /// empty log).
    Started { operations: usize },
    /// A run was in flight or already done, so the array was regenerated.
    Reset,
}

/// Owns the array being sorted and drives its animation.
pub struct SortSession<R: Renderer> {
    config: SortingConfig,
    rng: DataRng,
    array: Vec<u32>,
    scheduler: PlaybackScheduler,
    renderer: R,
    /// Set once a trigger has recorded the current array.
    played: bool,
}

impl<R: Renderer> SortSession<R> {
    /// Create a session and paint a freshly generated array.
    pub fn new(
        config: SortingConfig,
        playback: PlaybackConfig,
        renderer: R,
        rng: DataRng,
    ) -> Self {
        let scheduler = PlaybackScheduler::new(playback, config.speed);
        let mut session = Self {
            config,
            rng,
            array: Vec::new(),
            scheduler,
            renderer,
            played: false,
        };
        session.reset_array();
        session
    }

    #[inline]
    pub fn array(&self) -> &[u32] {
        &self.array
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn config(&self) -> &SortingConfig {
        &self.config
    }

    /// Playback status. A run over an already sorted array never leaves the
    /// scheduler idle, but still counts as finished here.
    #[inline]
    pub fn status(&self) -> PlaybackStatus {
        match self.scheduler.status() {
            PlaybackStatus::Idle if self.played => PlaybackStatus::Finished,
            status => status,
        }
    }

    #[inline]
    pub fn stats(&self) -> PlaybackStats {
        self.scheduler.stats()
    }

    #[inline]
    pub fn scheduler(&self) -> &PlaybackScheduler {
        &self.scheduler
    }

    /// Stop any run and paint a new random array.
    pub fn reset_array(&mut self) {
        self.scheduler.cancel();
        self.scheduler.reset();
        self.played = false;

        let size = self.config.array_size;
        self.array = self
            .rng
            .bar_array(size, self.config.min_value, self.config.max_value);

        self.renderer.resize(size);
        self.renderer.set_width(self.config.bar_width());
        for (index, &value) in self.array.iter().enumerate() {
            self.renderer.set_color(index, BarColor::Primary);
            self.renderer.set_height(index, value);
        }
        log::debug!("Generated new array of {size} values");
    }

    /// Replace the array with explicit values instead of random ones.
    pub fn load_array(&mut self, values: Vec<u32>) {
        self.scheduler.cancel();
        self.scheduler.reset();
        self.played = false;

        self.config.array_size = values.len();
        self.renderer.resize(values.len());
        self.renderer.set_width(self.config.bar_width());
        for (index, &value) in values.iter().enumerate() {
            self.renderer.set_color(index, BarColor::Primary);
            self.renderer.set_height(index, value);
        }
        self.array = values;
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.config.speed = speed.clamp(SortingConfig::MIN_SPEED, SortingConfig::MAX_SPEED);
        self.scheduler.set_speed(self.config.speed);
    }

    /// Change the bar count; regenerates the array.
    pub fn set_array_size(&mut self, size: usize) {
        self.config.array_size =
            size.clamp(SortingConfig::MIN_ARRAY_SIZE, SortingConfig::MAX_ARRAY_SIZE);
        self.reset_array();
    }

    /// Sort button: start `algorithm`, or reset if a run is in flight or done.
    pub fn trigger(
        &mut self,
        algorithm: SortAlgorithm,
        now: Duration,
    ) -> Result<TriggerOutcome, PlaybackError> {
        match self.status() {
            PlaybackStatus::Running | PlaybackStatus::Finished | PlaybackStatus::Cancelled => {
                self.reset_array();
                Ok(TriggerOutcome::Reset)
            }
            PlaybackStatus::Idle => {
                let animation = record(algorithm, &self.array);
                let operations = animation.len();
                self.scheduler.start(animation, &self.renderer, now)?;
                self.played = true;
                log::debug!("Started {algorithm} with {operations} operations");
                Ok(TriggerOutcome::Started { operations })
            }
        }
    }

    /// Advance playback; see [`PlaybackScheduler::poll`].
    pub fn poll(&mut self, now: Duration) -> PlaybackStatus {
        self.scheduler.poll(&mut self.renderer, now);
        self.status()
    }

    #[inline]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Finish the current run on a virtual clock.
    pub fn run_virtual(&mut self, start: Duration) -> Duration {
        self.scheduler.run_virtual(&mut self.renderer, start)
    }

    pub fn cancel(&mut self) {
        self.scheduler.cancel();
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::BarSurface;

    fn session(size: usize, seed: u64) -> SortSession<BarSurface> {
        let config = SortingConfig {
            array_size: size,
            speed: 80,
            ..Default::default()
        };
        SortSession::new(
            config,
            PlaybackConfig::default(),
            BarSurface::default(),
            DataRng::new(seed),
        )
    }

    #[test]
    fn test_new_session_paints_array() {
        let s = session(25, 1);
        assert_eq!(s.array().len(), 25);
        assert_eq!(s.renderer().heights(), s.array());
        assert_eq!(s.renderer().width(), 40);
        assert!(s.renderer().is_at_rest());
        assert_eq!(s.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_trigger_runs_then_resets() {
        let mut s = session(30, 2);
        let original = s.array().to_vec();

        let outcome = s.trigger(SortAlgorithm::Quick, Duration::ZERO).unwrap();
        assert!(matches!(outcome, TriggerOutcome::Started { operations } if operations > 0));
        s.run_virtual(Duration::ZERO);
        assert_eq!(s.status(), PlaybackStatus::Finished);

        let mut sorted = original.clone();
        sorted.sort_unstable();
        assert_eq!(s.renderer().heights(), sorted);
        // The live array is only a source for recording.
        assert_eq!(s.array(), original.as_slice());

        assert_eq!(
            s.trigger(SortAlgorithm::Quick, Duration::ZERO).unwrap(),
            TriggerOutcome::Reset
        );
        assert_eq!(s.status(), PlaybackStatus::Idle);
        assert_eq!(s.renderer().heights(), s.array());
    }

    #[test]
    fn test_trigger_while_running_interrupts() {
        let mut s = session(40, 3);
        s.set_speed(1);
        s.trigger(SortAlgorithm::Bubble, Duration::ZERO).unwrap();
        s.poll(Duration::ZERO);
        assert_eq!(s.status(), PlaybackStatus::Running);

        assert_eq!(
            s.trigger(SortAlgorithm::Merge, Duration::from_millis(5)).unwrap(),
            TriggerOutcome::Reset
        );
        assert_eq!(s.status(), PlaybackStatus::Idle);
        assert_eq!(s.next_deadline(), None);
        assert!(s.renderer().is_at_rest());
    }

    #[test]
    fn test_sorted_single_element_finishes_then_resets() {
        let mut s = session(2, 4);
        s.load_array(vec![7]);
        assert_eq!(
            s.trigger(SortAlgorithm::Heap, Duration::ZERO).unwrap(),
            TriggerOutcome::Started { operations: 0 }
        );
        assert_eq!(s.status(), PlaybackStatus::Finished);
        assert_eq!(s.scheduler().status(), PlaybackStatus::Idle);
        assert_eq!(s.next_deadline(), None);
        assert_eq!(s.poll(Duration::from_millis(10)), PlaybackStatus::Finished);

        assert_eq!(
            s.trigger(SortAlgorithm::Heap, Duration::from_millis(20)).unwrap(),
            TriggerOutcome::Reset
        );
        assert_eq!(s.status(), PlaybackStatus::Idle);
        assert_eq!(s.array().len(), 2);
    }

    #[test]
    fn test_reversed_value_range_does_not_panic() {
        let config = SortingConfig {
            array_size: 12,
            min_value: 700,
            max_value: 10,
            ..Default::default()
        };
        let s = SortSession::new(
            config,
            PlaybackConfig::default(),
            BarSurface::default(),
            DataRng::new(9),
        );
        assert_eq!(s.array().len(), 12);
        assert!(s.array().iter().all(|v| (10..700).contains(v)));
    }

    #[test]
    fn test_set_array_size_clamps() {
        let mut s = session(10, 5);
        s.set_array_size(500);
        assert_eq!(s.array().len(), SortingConfig::MAX_ARRAY_SIZE);
        assert_eq!(s.renderer().len(), SortingConfig::MAX_ARRAY_SIZE);
        assert_eq!(s.renderer().width(), 10);

        s.set_array_size(0);
        assert_eq!(s.array().len(), SortingConfig::MIN_ARRAY_SIZE);
    }

    #[test]
    fn test_load_array_and_sort() {
        let mut s = session(10, 6);
        s.load_array(vec![5, 3, 8, 1]);
        s.trigger(SortAlgorithm::Bubble, Duration::ZERO).unwrap();
        s.run_virtual(Duration::ZERO);
        assert_eq!(s.into_renderer().heights(), vec![1, 3, 5, 8]);
    }
}
