//! Animation recording and playback for sorting visualizations.
//!
//! Sorting is split into two phases. The recorder runs an algorithm to
//! completion against a private copy of the array and captures every
//! elementary step as an [`Operation`]. The scheduler later replays that
//! log onto a [`Renderer`] at whatever pace the user picks, so the speed of
//! the algorithm and the speed of painting are independent.
//!
//! # Log format
//!
//! Logs serialize to a JSON array of tagged operations:
//!
//! ```text
//! [
//!   {"type": "compare",   "i": 0, "j": 1},
//!   {"type": "swap",      "i": 0, "j": 1},
//!   {"type": "overwrite", "index": 3, "value": 412}
//! ]
//! ```
//!
//! # Playback lifecycle
//!
//! ```text
//! Idle --start--> Running --log exhausted--> Finished
//!                    |
//!                    +----cancel----> Cancelled
//! Finished / Cancelled --reset--> Idle
//! ```

mod format;
mod player;
mod recorder;
mod renderer;
mod session;

pub use format::{AnimationLog, Operation, OperationCounts, OperationKind};
pub use player::{Pacing, PlaybackError, PlaybackScheduler, PlaybackStats, PlaybackStatus};
pub use recorder::{AnimationRecorder, record};
pub use renderer::{Bar, BarColor, BarSurface, Renderer};
pub use session::{SortSession, TriggerOutcome};
