//! Comparison sorts that run against an [`AnimationRecorder`].
//!
//! Every sort drives the recorder's working copy in place so each recorded
//! comparison sees the array exactly as the real algorithm would.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::animation::AnimationRecorder;

/// Sorting algorithm families available to the visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Gnome,
    Quick,
    Merge,
    Heap,
}

impl SortAlgorithm {
    /// All algorithms, in the order the sorting page lists them.
    pub const ALL: [SortAlgorithm; 7] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Gnome,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Gnome => "gnome",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Heap => "heap",
        }
    }

    /// Sort the recorder's working copy, recording every step.
    pub fn sort(&self, rec: &mut AnimationRecorder) {
        let n = rec.len();
        if n < 2 {
            return;
        }
        match self {
            SortAlgorithm::Bubble => bubble_sort(rec),
            SortAlgorithm::Selection => selection_sort(rec),
            SortAlgorithm::Insertion => insertion_sort(rec),
            SortAlgorithm::Gnome => gnome_sort(rec),
            SortAlgorithm::Quick => quick_sort(rec, 0, n),
            SortAlgorithm::Merge => merge_sort(rec, 0, n),
            SortAlgorithm::Heap => heap_sort(rec),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sort", self.name())
    }
}

/// Error for unrecognised algorithm names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sorting algorithm '{0}'")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for SortAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix("sort")
            .map(|n| n.trim_end_matches(['_', '-', ' ']))
            .unwrap_or(normalized.as_str());
        SortAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Adjacent passes with early exit once a pass makes no swaps.
fn bubble_sort(rec: &mut AnimationRecorder) {
    let n = rec.len();
    for pass in 0..n - 1 {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if rec.compare(j, j + 1) == Ordering::Greater {
                rec.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

fn selection_sort(rec: &mut AnimationRecorder) {
    let n = rec.len();
    for i in 0..n - 1 {
        let mut min = i;
        for j in i + 1..n {
            if rec.compare(j, min) == Ordering::Less {
                min = j;
            }
        }
        if min != i {
            rec.swap(i, min);
        }
    }
}

/// Swap-based insertion: each new element sinks left until it is in place.
fn insertion_sort(rec: &mut AnimationRecorder) {
    for i in 1..rec.len() {
        let mut j = i;
        while j > 0 && rec.compare(j - 1, j) == Ordering::Greater {
            rec.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn gnome_sort(rec: &mut AnimationRecorder) {
    let n = rec.len();
    let mut pos = 0;
    while pos < n {
        if pos == 0 {
            pos += 1;
        } else if rec.compare(pos - 1, pos) != Ordering::Greater {
            pos += 1;
        } else {
            rec.swap(pos - 1, pos);
            pos -= 1;
        }
    }
}

/// Lomuto partition over `[lo, hi)` with the last element as pivot.
///
/// Recurses into the smaller side and loops on the larger one so depth stays
/// logarithmic.
fn quick_sort(rec: &mut AnimationRecorder, mut lo: usize, mut hi: usize) {
    while hi - lo > 1 {
        let pivot = hi - 1;
        let mut store = lo;
        for j in lo..pivot {
            if rec.compare(j, pivot) == Ordering::Less {
                if store != j {
                    rec.swap(store, j);
                }
                store += 1;
            }
        }
        if store != pivot {
            rec.swap(store, pivot);
        }

        if store - lo < hi - store - 1 {
            quick_sort(rec, lo, store);
            lo = store + 1;
        } else {
            quick_sort(rec, store + 1, hi);
            hi = store;
        }
    }
}

/// Top-down merge sort over `[lo, hi)`.
///
/// Merging reads from a snapshot of the range and writes back through
/// overwrites; comparisons highlight the original positions of both operands.
fn merge_sort(rec: &mut AnimationRecorder, lo: usize, hi: usize) {
    if hi - lo < 2 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort(rec, lo, mid);
    merge_sort(rec, mid, hi);

    let aux = rec.values()[lo..hi].to_vec();
    let (mut i, mut j, mut k) = (lo, mid, lo);
    while i < mid && j < hi {
        rec.mark_compare(i, j);
        let (left, right) = (aux[i - lo], aux[j - lo]);
        if left <= right {
            rec.overwrite(k, left);
            i += 1;
        } else {
            rec.overwrite(k, right);
            j += 1;
        }
        k += 1;
    }
    while i < mid {
        rec.overwrite(k, aux[i - lo]);
        i += 1;
        k += 1;
    }
    // Any right-half remainder already sits at its final position.
}

fn heap_sort(rec: &mut AnimationRecorder) {
    let n = rec.len();
    for root in (0..n / 2).rev() {
        sift_down(rec, root, n);
    }
    for end in (1..n).rev() {
        rec.swap(0, end);
        sift_down(rec, 0, end);
    }
}

/// Restore the max-heap property below `root` within `[0, end)`.
fn sift_down(rec: &mut AnimationRecorder, mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && rec.compare(child, child + 1) == Ordering::Less {
            child += 1;
        }
        if rec.compare(root, child) == Ordering::Less {
            rec.swap(root, child);
            root = child;
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Operation, OperationKind, record};
    use proptest::prelude::*;

    fn sorted(values: &[u32]) -> Vec<u32> {
        let mut v = values.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_bubble_example() {
        let input = [5, 3, 8, 1];
        let log = record(SortAlgorithm::Bubble, &input);

        assert_eq!(log.replay(&input), vec![1, 3, 5, 8]);
        assert_eq!(
            log.operations(),
            &[
                Operation::Compare { i: 0, j: 1 },
                Operation::Swap { i: 0, j: 1 },
                Operation::Compare { i: 1, j: 2 },
                Operation::Compare { i: 2, j: 3 },
                Operation::Swap { i: 2, j: 3 },
                Operation::Compare { i: 0, j: 1 },
                Operation::Compare { i: 1, j: 2 },
                Operation::Swap { i: 1, j: 2 },
                Operation::Compare { i: 0, j: 1 },
                Operation::Swap { i: 0, j: 1 },
            ]
        );
        // One swap per inversion.
        assert_eq!(log.counts().swaps, 4);
    }

    #[test]
    fn test_bubble_sorted_input_single_pass() {
        let log = record(SortAlgorithm::Bubble, &[1, 2, 3, 4, 5]);
        assert_eq!(log.counts().compares, 4);
        assert_eq!(log.counts().swaps, 0);
    }

    #[test]
    fn test_selection_swaps_at_most_n_minus_one() {
        let input = [9, 7, 5, 3, 1, 2, 4];
        let log = record(SortAlgorithm::Selection, &input);
        assert!(log.counts().swaps <= input.len() - 1);
        assert_eq!(log.counts().compares, input.len() * (input.len() - 1) / 2);
    }

    #[test]
    fn test_merge_uses_overwrites_only() {
        let input = [4, 1, 3, 9, 7, 2];
        let log = record(SortAlgorithm::Merge, &input);
        let counts = log.counts();
        assert_eq!(counts.swaps, 0);
        assert!(counts.overwrites > 0);
        assert!(
            log.iter()
                .all(|op| op.kind() != OperationKind::Overwrite || op.value().is_some())
        );
        assert_eq!(log.replay(&input), sorted(&input));
    }

    #[test]
    fn test_quick_sorted_input() {
        let input: Vec<u32> = (0..64).collect();
        let log = record(SortAlgorithm::Quick, &input);
        assert_eq!(log.counts().swaps, 0);
        assert_eq!(log.replay(&input), input);
    }

    #[test]
    fn test_two_elements() {
        for algorithm in SortAlgorithm::ALL {
            let log = record(algorithm, &[2, 1]);
            assert_eq!(log.replay(&[2, 1]), vec![1, 2], "{algorithm}");
            assert!(log.counts().compares >= 1, "{algorithm}");
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("bubble".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Bubble));
        assert_eq!("Quick Sort".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Quick));
        assert_eq!("heap_sort".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Heap));
        assert_eq!("MergeSort".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Merge));
        assert_eq!(
            "bogo".parse::<SortAlgorithm>(),
            Err(UnknownAlgorithm("bogo".into()))
        );
    }

    proptest! {
        #[test]
        fn prop_replay_is_sorted_permutation(
            values in prop::collection::vec(0u32..1000, 0..80),
        ) {
            for algorithm in SortAlgorithm::ALL {
                let log = record(algorithm, &values);
                prop_assert!(log.validate(values.len()).is_ok());
                prop_assert_eq!(log.replay(&values), sorted(&values));
            }
        }

        #[test]
        fn prop_recording_is_deterministic(
            values in prop::collection::vec(0u32..50, 0..60),
        ) {
            for algorithm in SortAlgorithm::ALL {
                prop_assert_eq!(record(algorithm, &values), record(algorithm, &values));
            }
        }

        #[test]
        fn prop_recorder_matches_replay(
            values in prop::collection::vec(0u32..1000, 2..40),
        ) {
            for algorithm in SortAlgorithm::ALL {
                let mut rec = AnimationRecorder::new(&values);
                algorithm.sort(&mut rec);
                let (log, working) = rec.finish_with_values();
                prop_assert_eq!(log.replay(&values), working);
            }
        }
    }
}
