//! The exchange-observable sequence every algorithm operates on.
//!
//! [`ObservableSequence`] exposes exactly two primitives to algorithms:
//!
//! - [`less`](ObservableSequence::less): compare two positions, no side
//!   effects beyond a counter bump.
//! - [`exchange`](ObservableSequence::exchange): swap two positions and
//!   report the swap to the attached [`ExchangeSink`].
//!
//! Because `exchange` is the only mutation, the sink sees a complete,
//! ordered log of how the sequence moved from its initial permutation to its
//! final state. Out-of-range positions are an algorithm bug and panic.

use std::cell::Cell;

use crate::cancel::{CancelToken, Cancelled};
use crate::event::Exchange;

/// Receives every exchange an [`ObservableSequence`] performs.
///
/// `deliver` is called after the swap has been applied, with the event and
/// the full post-swap contents. Returning `Err(Cancelled)` aborts the
/// algorithm that issued the exchange.
pub trait ExchangeSink<T> {
    fn deliver(&mut self, exchange: Exchange<T>, snapshot: &[T]) -> Result<(), Cancelled>;
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl<T> ExchangeSink<T> for Discard {
    #[inline]
    fn deliver(&mut self, _exchange: Exchange<T>, _snapshot: &[T]) -> Result<(), Cancelled> {
        Ok(())
    }
}

impl<T, S: ExchangeSink<T> + ?Sized> ExchangeSink<T> for &mut S {
    #[inline]
    fn deliver(&mut self, exchange: Exchange<T>, snapshot: &[T]) -> Result<(), Cancelled> {
        (**self).deliver(exchange, snapshot)
    }
}

/// Work counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceStats {
    pub comparisons: u64,
    pub exchanges: u64,
}

/// An ordered, mutable sequence that reports every exchange it undergoes.
#[derive(Debug)]
pub struct ObservableSequence<T, S> {
    values: Vec<T>,
    sink: S,
    token: CancelToken,
    comparisons: Cell<u64>,
    exchanges: u64,
}

impl<T: Ord + Copy, S: ExchangeSink<T>> ObservableSequence<T, S> {
    /// Wrap `values`, reporting exchanges to `sink`. The run cannot be
    /// cancelled except by the sink itself.
    #[must_use]
    pub fn new(values: Vec<T>, sink: S) -> Self {
        Self::with_token(values, sink, CancelToken::never())
    }

    /// Wrap `values` with an explicit cancellation token, checked before
    /// every exchange.
    #[must_use]
    pub fn with_token(values: Vec<T>, sink: S, token: CancelToken) -> Self {
        Self {
            values,
            sink,
            token,
            comparisons: Cell::new(0),
            exchanges: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the value at `i` is ordered before the value at `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    #[inline]
    #[must_use]
    pub fn less(&self, i: usize, j: usize) -> bool {
        self.assert_in_bounds("less", i, j);
        self.comparisons.set(self.comparisons.get() + 1);
        self.values[i] < self.values[j]
    }

    /// Swap the values at `i` and `j`, then report the swap to the sink.
    ///
    /// With a rendezvous sink this blocks until the consumer has taken the
    /// event. A self-swap (`i == j`) is still reported.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the run was cancelled before the swap, or if
    /// the sink reports that its consumer went away. In the latter case the
    /// swap has already been applied locally.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    pub fn exchange(&mut self, i: usize, j: usize) -> Result<(), Cancelled> {
        self.assert_in_bounds("exchange", i, j);
        self.token.check()?;

        self.values.swap(i, j);
        self.exchanges += 1;

        let exchange = Exchange {
            seq: self.exchanges,
            i,
            j,
            values: (self.values[i], self.values[j]),
        };
        tracing::trace!(seq = exchange.seq, i, j, "exchange");
        self.sink.deliver(exchange, &self.values)
    }

    /// Current value at `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[inline]
    #[must_use]
    pub fn value(&self, i: usize) -> T {
        self.values[i]
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn stats(&self) -> SequenceStats {
        SequenceStats {
            comparisons: self.comparisons.get(),
            exchanges: self.exchanges,
        }
    }

    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the values and the sink.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, S) {
        (self.values, self.sink)
    }

    #[inline]
    fn assert_in_bounds(&self, op: &str, i: usize, j: usize) {
        let n = self.values.len();
        assert!(
            i < n && j < n,
            "{op}({i}, {j}) out of bounds for sequence of length {n}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::ExchangeLog;

    #[test]
    fn less_compares_values_at_positions() {
        let seq = ObservableSequence::new(vec![3, 1, 2], Discard);
        assert!(seq.less(1, 0));
        assert!(!seq.less(0, 1));
        assert!(!seq.less(2, 2));
        assert_eq!(seq.stats().comparisons, 3);
    }

    #[test]
    fn exchange_reports_post_swap_values() {
        let mut seq = ObservableSequence::new(vec![3, 1, 2], ExchangeLog::new());
        seq.exchange(0, 1).unwrap();
        assert_eq!(seq.as_slice(), &[1, 3, 2]);
        let log = seq.sink().events();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].values, (1, 3));
        assert_eq!((log[0].i, log[0].j), (0, 1));
        assert_eq!(log[0].seq, 1);
    }

    #[test]
    fn self_swap_is_reported() {
        let mut seq = ObservableSequence::new(vec![5, 6], ExchangeLog::new());
        seq.exchange(1, 1).unwrap();
        assert_eq!(seq.as_slice(), &[5, 6]);
        assert_eq!(seq.stats().exchanges, 1);
        assert_eq!(seq.sink().events()[0].values, (6, 6));
    }

    #[test]
    #[should_panic(expected = "exchange(0, 3) out of bounds")]
    fn exchange_out_of_bounds_panics() {
        let mut seq = ObservableSequence::new(vec![1, 2, 3], Discard);
        let _ = seq.exchange(0, 3);
    }

    #[test]
    #[should_panic(expected = "less(4, 0) out of bounds")]
    fn less_out_of_bounds_panics() {
        let seq = ObservableSequence::new(vec![1, 2, 3], Discard);
        let _ = seq.less(4, 0);
    }

    #[test]
    fn cancelled_token_blocks_exchange_without_mutating() {
        let (token, handle) = CancelToken::new();
        let mut seq = ObservableSequence::with_token(vec![2, 1], ExchangeLog::new(), token);
        handle.cancel();
        assert_eq!(seq.exchange(0, 1), Err(Cancelled));
        assert_eq!(seq.as_slice(), &[2, 1]);
        assert!(seq.sink().events().is_empty());
    }

    #[test]
    fn sink_error_propagates() {
        struct Detached;
        impl ExchangeSink<u32> for Detached {
            fn deliver(&mut self, _: Exchange<u32>, _: &[u32]) -> Result<(), Cancelled> {
                Err(Cancelled)
            }
        }
        let mut seq = ObservableSequence::new(vec![2u32, 1], Detached);
        assert_eq!(seq.exchange(0, 1), Err(Cancelled));
    }

    #[test]
    fn borrowed_sink_forwards() {
        let mut log = ExchangeLog::new();
        {
            let mut seq = ObservableSequence::new(vec![2, 1], &mut log);
            seq.exchange(0, 1).unwrap();
        }
        assert_eq!(log.len(), 1);
    }
}
