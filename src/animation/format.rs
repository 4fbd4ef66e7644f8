//! Operation log definitions for recorded sort animations.

use serde::{Deserialize, Serialize};

use super::player::PlaybackError;

/// Kind of an atomic visual operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Compare,
    Swap,
    Overwrite,
}

/// One atomic step of a sorting algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    /// Positions `i` and `j` were compared. No mutation.
    Compare { i: usize, j: usize },
    /// Values at `i` and `j` were exchanged.
    Swap { i: usize, j: usize },
    /// Position `index` now holds `value`.
    Overwrite { index: usize, value: u32 },
}

impl Operation {
    #[inline]
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Compare { .. } => OperationKind::Compare,
            Operation::Swap { .. } => OperationKind::Swap,
            Operation::Overwrite { .. } => OperationKind::Overwrite,
        }
    }

    /// Positions touched by this operation, in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let (first, second) = match *self {
            Operation::Compare { i, j } | Operation::Swap { i, j } => (i, Some(j)),
            Operation::Overwrite { index, .. } => (index, None),
        };
        std::iter::once(first).chain(second)
    }

    /// Overwrite payload, if any.
    #[inline]
    pub fn value(&self) -> Option<u32> {
        match *self {
            Operation::Overwrite { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Per-kind operation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OperationCounts {
    pub compares: usize,
    pub swaps: usize,
    pub overwrites: usize,
}

/// Ordered, immutable record of a sort's operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationLog {
    operations: Vec<Operation>,
}

impl AnimationLog {
    pub(crate) fn from_operations(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<&Operation> {
        self.operations.get(position)
    }

    pub fn counts(&self) -> OperationCounts {
        self.operations
            .iter()
            .fold(OperationCounts::default(), |mut counts, op| {
                match op.kind() {
                    OperationKind::Compare => counts.compares += 1,
                    OperationKind::Swap => counts.swaps += 1,
                    OperationKind::Overwrite => counts.overwrites += 1,
                }
                counts
            })
    }

    /// Check every index against an array of `len` elements.
    pub fn validate(&self, len: usize) -> Result<(), PlaybackError> {
        for (position, op) in self.operations.iter().enumerate() {
            if let Some(index) = op.indices().find(|&index| index >= len) {
                return Err(PlaybackError::IndexOutOfRange {
                    position,
                    index,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Apply the log to a copy of `initial` and return the final array.
    ///
    /// # Panics
    /// Panics if an index is out of range for `initial`.
    pub fn replay(&self, initial: &[u32]) -> Vec<u32> {
        let mut values = initial.to_vec();
        for op in &self.operations {
            match *op {
                Operation::Compare { .. } => {}
                Operation::Swap { i, j } => values.swap(i, j),
                Operation::Overwrite { index, value } => values[index] = value,
            }
        }
        values
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl<'a> IntoIterator for &'a AnimationLog {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> AnimationLog {
        AnimationLog::from_operations(vec![
            Operation::Compare { i: 0, j: 1 },
            Operation::Swap { i: 0, j: 1 },
            Operation::Overwrite { index: 2, value: 9 },
            Operation::Compare { i: 1, j: 2 },
        ])
    }

    #[test]
    fn test_counts() {
        let counts = sample_log().counts();
        assert_eq!(
            counts,
            OperationCounts {
                compares: 2,
                swaps: 1,
                overwrites: 1
            }
        );
    }

    #[test]
    fn test_indices() {
        let ops = sample_log();
        let touched: Vec<Vec<usize>> = ops.iter().map(|op| op.indices().collect()).collect();
        assert_eq!(touched, vec![vec![0, 1], vec![0, 1], vec![2], vec![1, 2]]);
        assert_eq!(ops.get(2).and_then(Operation::value), Some(9));
        assert_eq!(ops.get(0).and_then(Operation::value), None);
    }

    #[test]
    fn test_replay() {
        assert_eq!(sample_log().replay(&[4, 2, 7]), vec![2, 4, 9]);
    }

    #[test]
    fn test_validate() {
        let log = sample_log();
        assert!(log.validate(3).is_ok());
        match log.validate(2) {
            Err(PlaybackError::IndexOutOfRange {
                position,
                index,
                len,
            }) => {
                assert_eq!((position, index, len), (2, 2, 2));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_json_shape() {
        let json = sample_log().to_json().unwrap();
        assert!(json.starts_with(r#"[{"type":"compare""#));
        assert!(json.contains(r#"{"type":"overwrite","index":2,"value":9}"#));
        assert_eq!(AnimationLog::from_json(&json).unwrap(), sample_log());
    }
}
