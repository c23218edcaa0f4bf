use std::cmp::Ordering;

use crate::cancel::Cancelled;
use crate::sequence::{ExchangeSink, ObservableSequence};

/// Baseline sort backed by the standard library.
///
/// `slice::sort_by` decides the order of an index permutation, comparing
/// through [`ObservableSequence::less`]; the permutation is then applied in
/// place with one exchange per misplaced element. The exchange pattern is an
/// implementation detail; only the sorted result is guaranteed.
pub fn library_sort<T, S>(seq: &mut ObservableSequence<T, S>) -> Result<(), Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    let n = seq.len();
    if n < 2 {
        return Ok(());
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        if seq.less(a, b) {
            Ordering::Less
        } else if seq.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });

    // `slot_of[k]` is where the element that started at `k` lives now,
    // `origin_at[p]` is which starting element sits at `p`.
    let mut slot_of: Vec<usize> = (0..n).collect();
    let mut origin_at: Vec<usize> = (0..n).collect();

    for (target, &origin) in order.iter().enumerate() {
        let from = slot_of[origin];
        if from == target {
            continue;
        }
        seq.exchange(target, from)?;

        let displaced = origin_at[target];
        origin_at[target] = origin;
        origin_at[from] = displaced;
        slot_of[origin] = target;
        slot_of[displaced] = from;
    }
    Ok(())
}
