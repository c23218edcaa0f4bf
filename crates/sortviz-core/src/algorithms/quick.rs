use crate::cancel::Cancelled;
use crate::sequence::{ExchangeSink, ObservableSequence};

/// Recursive quicksort with a Lomuto partition around the last element.
pub fn quick_sort<T, S>(seq: &mut ObservableSequence<T, S>) -> Result<(), Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    let n = seq.len();
    if n < 2 {
        return Ok(());
    }
    sort_range(seq, 0, n - 1)
}

fn sort_range<T, S>(
    seq: &mut ObservableSequence<T, S>,
    low: usize,
    high: usize,
) -> Result<(), Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    if low >= high {
        return Ok(());
    }
    let pivot = partition(seq, low, high)?;
    if pivot > low {
        sort_range(seq, low, pivot - 1)?;
    }
    sort_range(seq, pivot + 1, high)
}

/// Partition `low..=high` around the value at `high` and return the pivot's
/// final index, which is always within `low..=high`.
///
/// Values strictly less than the pivot are exchanged, in scan order, into the
/// next free slot on the left (self-swaps included); the pivot is then
/// exchanged into the slot after them.
///
/// # Panics
///
/// Panics if `low > high` or `high` is out of bounds.
pub fn partition<T, S>(
    seq: &mut ObservableSequence<T, S>,
    low: usize,
    high: usize,
) -> Result<usize, Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    assert!(low <= high, "partition({low}, {high}) on an empty range");
    let mut store = low;
    for j in low..high {
        // the pivot stays at `high` for the whole scan
        if seq.less(j, high) {
            seq.exchange(store, j)?;
            store += 1;
        }
    }
    seq.exchange(store, high)?;
    Ok(store)
}
