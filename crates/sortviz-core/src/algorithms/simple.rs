//! Quadratic strategies: bubble, selection, insertion, and shell sort.

use crate::cancel::Cancelled;
use crate::sequence::{ExchangeSink, ObservableSequence};

/// `n-1` adjacent passes; each pass bubbles the largest remaining value to
/// the end of the unsorted prefix.
pub fn bubble_sort<T, S>(seq: &mut ObservableSequence<T, S>) -> Result<(), Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    let n = seq.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if seq.less(j + 1, j) {
                seq.exchange(j, j + 1)?;
            }
        }
    }
    Ok(())
}

/// For each position, find the minimum of the rest and exchange it in.
///
/// The exchange is issued even when the position already holds the minimum,
/// so exactly `n-1` events are emitted for `n >= 1`.
pub fn selection_sort<T, S>(seq: &mut ObservableSequence<T, S>) -> Result<(), Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    let n = seq.len();
    for i in 0..n.saturating_sub(1) {
        let mut min_idx = i;
        for j in i + 1..n {
            if seq.less(j, min_idx) {
                min_idx = j;
            }
        }
        seq.exchange(i, min_idx)?;
    }
    Ok(())
}

/// Walk each key left by adjacent exchanges while its left neighbour is
/// strictly greater. The key always sits at `j`, so comparing `j` against
/// `j - 1` is comparing against the key itself.
pub fn insertion_sort<T, S>(seq: &mut ObservableSequence<T, S>) -> Result<(), Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    for i in 1..seq.len() {
        let mut j = i;
        while j > 0 && seq.less(j, j - 1) {
            seq.exchange(j - 1, j)?;
            j -= 1;
        }
    }
    Ok(())
}

/// Gapped insertion sort with gaps `n/2, n/4, ..., 1`.
pub fn shell_sort<T, S>(seq: &mut ObservableSequence<T, S>) -> Result<(), Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    let n = seq.len();
    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            let mut j = i;
            // the key captured at `i` travels with `j`
            while j >= gap && seq.less(j, j - gap) {
                seq.exchange(j, j - gap)?;
                j -= gap;
            }
        }
        gap /= 2;
    }
    Ok(())
}
