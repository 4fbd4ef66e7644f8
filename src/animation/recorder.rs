//! Animation recorder for capturing sort operations.

use std::cmp::Ordering;

use super::format::{AnimationLog, Operation};
use crate::compute::SortAlgorithm;

/// Records operations while a sort runs against its own working copy.
///
/// Usage:
/// ```ignore
/// let mut recorder = AnimationRecorder::new(&values);
/// if recorder.compare(0, 1) == Ordering::Greater {
///     recorder.swap(0, 1);
/// }
/// let log = recorder.finish();
/// ```
#[derive(Debug, Clone)]
pub struct AnimationRecorder {
    working: Vec<u32>,
    operations: Vec<Operation>,
}

impl AnimationRecorder {
    /// Create a recorder over a copy of `values`.
    pub fn new(values: &[u32]) -> Self {
        Self {
            working: values.to_vec(),
            operations: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.working.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Current value at `index` in the working copy.
    #[inline]
    pub fn value(&self, index: usize) -> u32 {
        self.working[index]
    }

    /// Current working copy.
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.working
    }

    /// Record a comparison and return how `working[i]` orders against `working[j]`.
    pub fn compare(&mut self, i: usize, j: usize) -> Ordering {
        self.mark_compare(i, j);
        self.working[i].cmp(&self.working[j])
    }

    /// Record a comparison whose operands live outside the working copy.
    ///
    /// Used by merge sort, which compares values from its auxiliary buffer
    /// but highlights their original positions.
    pub fn mark_compare(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.working.len() && j < self.working.len());
        self.operations.push(Operation::Compare { i, j });
    }

    /// Exchange two positions and record it.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.working.swap(i, j);
        self.operations.push(Operation::Swap { i, j });
    }

    /// Write `value` at `index` and record it.
    pub fn overwrite(&mut self, index: usize, value: u32) {
        self.working[index] = value;
        self.operations.push(Operation::Overwrite { index, value });
    }

    /// Number of operations recorded so far.
    #[inline]
    pub fn operations_recorded(&self) -> usize {
        self.operations.len()
    }

    /// Consume the recorder and return the finished log.
    pub fn finish(self) -> AnimationLog {
        AnimationLog::from_operations(self.operations)
    }

    /// Consume the recorder, returning the log and the sorted working copy.
    pub fn finish_with_values(self) -> (AnimationLog, Vec<u32>) {
        (AnimationLog::from_operations(self.operations), self.working)
    }
}

/// Record the operations `algorithm` performs on a copy of `values`.
///
/// Arrays with fewer than two elements are already sorted and yield an
/// empty log.
pub fn record(algorithm: SortAlgorithm, values: &[u32]) -> AnimationLog {
    let mut recorder = AnimationRecorder::new(values);
    if recorder.len() >= 2 {
        algorithm.sort(&mut recorder);
    }
    let animation = recorder.finish();
    log::debug!(
        "Recorded {} operations for {} over {} values",
        animation.len(),
        algorithm,
        values.len()
    );
    animation
}
