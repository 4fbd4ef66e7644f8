//! Playback scheduler that replays an operation log onto a renderer.
//!
//! Playback is cooperative. The host calls [`PlaybackScheduler::poll`] with a
//! monotonic timestamp (a browser frame time, or `Instant` elapsed on
//! native) and uses [`PlaybackScheduler::next_deadline`] to decide when to
//! call again. Ticks and highlight reverts are entries in queues owned by
//! the scheduler, so cancelling or resetting drops them all at once.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;

use super::format::{AnimationLog, Operation, OperationKind};
use super::renderer::{BarColor, Renderer};
use crate::schema::{PlaybackConfig, SortingConfig};

/// Lifecycle of a playback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Idle,
    Running,
    Finished,
    Cancelled,
}

/// Playback errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("Operation {position} references index {index} but the surface has {len} bars")]
    IndexOutOfRange {
        position: usize,
        index: usize,
        len: usize,
    },
    #[error("Playback can only start from idle (currently {0:?})")]
    NotIdle(PlaybackStatus),
}

/// Work per tick and timing derived from the speed slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Log entries applied per tick (at least 1).
    pub batch: usize,
    /// Delay before the next tick (never zero).
    pub frame_delay: Duration,
    /// Slider inverted into milliseconds; scales highlight durations.
    slowness_ms: u64,
    compare_floor_ms: u64,
    swap_floor_ms: u64,
    overwrite_floor_ms: u64,
}

impl Pacing {
    pub fn from_speed(speed: u32, config: &PlaybackConfig) -> Self {
        let speed = speed.clamp(SortingConfig::MIN_SPEED, SortingConfig::MAX_SPEED);
        let slowness = (SortingConfig::MAX_SPEED - speed) as u64;
        let min_delay = config.min_frame_delay_ms.max(1);

        let frame_delay_ms = if slowness < config.fast_threshold {
            min_delay
        } else {
            slowness.clamp(min_delay, config.max_frame_delay_ms.max(min_delay))
        };

        let batch = if slowness < config.batch_threshold {
            let headroom = config.batch_threshold - slowness;
            (headroom as usize * config.max_batch / config.batch_threshold as usize).max(1)
        } else {
            1
        };

        Self {
            batch,
            frame_delay: Duration::from_millis(frame_delay_ms),
            slowness_ms: slowness,
            compare_floor_ms: config.compare_highlight_ms,
            swap_floor_ms: config.swap_highlight_ms,
            overwrite_floor_ms: config.overwrite_highlight_ms,
        }
    }

    /// How long an operation's highlight stays before reverting.
    pub fn highlight(&self, kind: OperationKind) -> Duration {
        let floor = match kind {
            OperationKind::Compare => self.compare_floor_ms,
            OperationKind::Swap => self.swap_floor_ms,
            OperationKind::Overwrite => self.overwrite_floor_ms,
        };
        Duration::from_millis(self.slowness_ms.max(floor))
    }
}

/// Counters for one playback run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackStats {
    pub ticks: u64,
    pub applied: u64,
    pub reverts_fired: u64,
}

impl std::fmt::Display for PlaybackStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} operations over {} ticks, {} highlight reverts",
            self.applied, self.ticks, self.reverts_fired
        )
    }
}

/// A scheduled return to the primary color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PendingRevert {
    due: Duration,
    seq: u64,
    first: usize,
    second: Option<usize>,
}

/// Replays an [`AnimationLog`] onto a [`Renderer`] at a user-controlled rate.
///
/// Usage:
/// ```ignore
/// let mut scheduler = PlaybackScheduler::new(PlaybackConfig::default(), 50);
/// scheduler.start(log, &surface, now)?;
/// while let Some(deadline) = scheduler.next_deadline() {
///     sleep_until(deadline);
///     scheduler.poll(&mut surface, deadline);
/// }
/// ```
pub struct PlaybackScheduler {
    config: PlaybackConfig,
    speed: u32,
    status: PlaybackStatus,
    log: AnimationLog,
    cursor: usize,
    next_tick: Option<Duration>,
    pending_reverts: BinaryHeap<Reverse<PendingRevert>>,
    next_seq: u64,
    cancelled: Arc<AtomicBool>,
    stats: PlaybackStats,
}

impl PlaybackScheduler {
    pub fn new(config: PlaybackConfig, speed: u32) -> Self {
        Self {
            config,
            speed: speed.clamp(SortingConfig::MIN_SPEED, SortingConfig::MAX_SPEED),
            status: PlaybackStatus::Idle,
            log: AnimationLog::default(),
            cursor: 0,
            next_tick: None,
            pending_reverts: BinaryHeap::new(),
            next_seq: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
            stats: PlaybackStats::default(),
        }
    }

    #[inline]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Change the speed; applies from the next tick.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(SortingConfig::MIN_SPEED, SortingConfig::MAX_SPEED);
    }

    /// Current pacing for the configured speed.
    pub fn pacing(&self) -> Pacing {
        Pacing::from_speed(self.speed, &self.config)
    }

    /// Log entries applied so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn log(&self) -> &AnimationLog {
        &self.log
    }

    #[inline]
    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    /// Highlight reverts still waiting to fire.
    #[inline]
    pub fn pending_reverts(&self) -> usize {
        self.pending_reverts.len()
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    #[inline]
    fn cancel_requested(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Begin replaying `animation`. The first tick runs on the first poll at or
    /// after `now`.
    ///
    /// An empty log is a no-op and leaves the scheduler idle.
    pub fn start<R: Renderer + ?Sized>(
        &mut self,
        animation: AnimationLog,
        renderer: &R,
        now: Duration,
    ) -> Result<(), PlaybackError> {
        if self.status != PlaybackStatus::Idle {
            log::warn!("Rejected playback start while {:?}", self.status);
            return Err(PlaybackError::NotIdle(self.status));
        }
        animation.validate(renderer.len())?;
        if animation.is_empty() {
            log::debug!("Empty animation log, nothing to play");
            return Ok(());
        }

        log::debug!(
            "Starting playback of {} operations at speed {}",
            animation.len(),
            self.speed
        );
        self.log = animation;
        self.cursor = 0;
        self.stats = PlaybackStats::default();
        self.pending_reverts.clear();
        self.cancelled.store(false, Ordering::Release);
        self.next_tick = Some(now);
        self.status = PlaybackStatus::Running;
        Ok(())
    }

    /// Stop playback. No further entries are applied and no pending highlight
    /// reverts fire; the renderer keeps whatever it shows now.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        self.abort();
    }

    fn abort(&mut self) {
        if self.status == PlaybackStatus::Running {
            log::debug!(
                "Playback cancelled at {}/{}",
                self.cursor,
                self.log.len()
            );
            self.status = PlaybackStatus::Cancelled;
        }
        self.next_tick = None;
        self.pending_reverts.clear();
    }

    /// Return to idle from any state, dropping the log and all timers.
    pub fn reset(&mut self) {
        self.status = PlaybackStatus::Idle;
        self.log = AnimationLog::default();
        self.cursor = 0;
        self.next_tick = None;
        self.pending_reverts.clear();
        self.cancelled.store(false, Ordering::Release);
        self.stats = PlaybackStats::default();
    }

    /// Earliest time at which polling will do work, if any is scheduled.
    pub fn next_deadline(&self) -> Option<Duration> {
        let revert = self.pending_reverts.peek().map(|Reverse(r)| r.due);
        match (self.next_tick, revert) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire due highlight reverts, then run at most one due tick.
    pub fn poll<R: Renderer + ?Sized>(&mut self, renderer: &mut R, now: Duration) -> PlaybackStatus {
        if self.cancel_requested() {
            self.abort();
            return self.status;
        }

        self.fire_due_reverts(renderer, now);

        if self.status == PlaybackStatus::Running
            && self.next_tick.is_some_and(|due| due <= now)
        {
            self.tick(renderer, now);
        }
        self.status
    }

    /// Drive playback to the end on a virtual clock starting at `start`,
    /// jumping straight from one deadline to the next.
    ///
    /// Returns the virtual time at which the last timer fired.
    pub fn run_virtual<R: Renderer + ?Sized>(&mut self, renderer: &mut R, start: Duration) -> Duration {
        let mut now = start;
        while let Some(deadline) = self.next_deadline() {
            now = now.max(deadline);
            self.poll(renderer, now);
        }
        now
    }

    fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R, now: Duration) {
        let pacing = self.pacing();
        let mut applied = 0;
        while applied < pacing.batch && self.cursor < self.log.len() {
            let op = self.log.operations()[self.cursor];
            self.apply(op, renderer, now, &pacing);
            self.cursor += 1;
            applied += 1;
        }
        self.stats.ticks += 1;
        self.stats.applied += applied as u64;
        log::trace!(
            "Tick {}: applied {} ({}/{})",
            self.stats.ticks,
            applied,
            self.cursor,
            self.log.len()
        );

        if self.cursor >= self.log.len() {
            log::debug!("Playback finished: {}", self.stats);
            self.status = PlaybackStatus::Finished;
            self.next_tick = None;
        } else {
            self.next_tick = Some(now + pacing.frame_delay);
        }
    }

    fn apply<R: Renderer + ?Sized>(
        &mut self,
        op: Operation,
        renderer: &mut R,
        now: Duration,
        pacing: &Pacing,
    ) {
        let due = now + pacing.highlight(op.kind());
        match op {
            Operation::Compare { i, j } => {
                renderer.set_color(i, BarColor::Compare);
                renderer.set_color(j, BarColor::Compare);
                self.schedule_revert(due, i, Some(j));
            }
            Operation::Swap { i, j } => {
                renderer.set_color(i, BarColor::Swap);
                renderer.set_color(j, BarColor::Swap);
                let (height_i, height_j) = (renderer.height(i), renderer.height(j));
                renderer.set_height(i, height_j);
                renderer.set_height(j, height_i);
                self.schedule_revert(due, i, Some(j));
            }
            Operation::Overwrite { index, value } => {
                renderer.set_color(index, BarColor::Overwrite);
                renderer.set_height(index, value);
                self.schedule_revert(due, index, None);
            }
        }
    }

    fn schedule_revert(&mut self, due: Duration, first: usize, second: Option<usize>) {
        self.pending_reverts.push(Reverse(PendingRevert {
            due,
            seq: self.next_seq,
            first,
            second,
        }));
        self.next_seq += 1;
    }

    fn fire_due_reverts<R: Renderer + ?Sized>(&mut self, renderer: &mut R, now: Duration) {
        while self
            .pending_reverts
            .peek()
            .is_some_and(|Reverse(r)| r.due <= now)
        {
            let Some(Reverse(revert)) = self.pending_reverts.pop() else {
                break;
            };
            if self.cancel_requested() {
                self.abort();
                return;
            }
            renderer.set_color(revert.first, BarColor::Primary);
            if let Some(second) = revert.second {
                renderer.set_color(second, BarColor::Primary);
            }
            self.stats.reverts_fired += 1;
        }
    }
}
