//! Exchange events and the frames that carry them to the consumer.

use serde::{Deserialize, Serialize};

/// One atomic swap, as observed right after it was applied.
///
/// `values` holds the new value at `i` followed by the new value at `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exchange<T> {
    /// 1-based position of this exchange in the run.
    pub seq: u64,
    pub i: usize,
    pub j: usize,
    pub values: (T, T),
}

impl<T> Exchange<T> {
    #[inline]
    #[must_use]
    pub fn is_self_swap(&self) -> bool {
        self.i == self.j
    }
}

/// What the consumer receives for each exchange: the event plus an owned
/// snapshot of the whole sequence taken right after it.
///
/// The snapshot is a copy, so the consumer can hold it for the duration of a
/// frame while the producer moves on to its next comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<T> {
    pub exchange: Exchange<T>,
    pub snapshot: Vec<T>,
}
