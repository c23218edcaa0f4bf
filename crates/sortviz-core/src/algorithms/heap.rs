use crate::cancel::Cancelled;
use crate::sequence::{ExchangeSink, ObservableSequence};

/// In-place heap sort: build a max-heap bottom-up, then repeatedly move the
/// root behind the shrinking heap.
pub fn heap_sort<T, S>(seq: &mut ObservableSequence<T, S>) -> Result<(), Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    let n = seq.len();
    for i in (0..n / 2).rev() {
        heapify(seq, n, i)?;
    }
    for end in (1..n).rev() {
        seq.exchange(0, end)?;
        heapify(seq, end, 0)?;
    }
    Ok(())
}

/// Sift the value at `i` down a max-heap occupying `0..size`.
///
/// Only positions below `size` are ever compared or exchanged. Recursion
/// happens only after an exchange, into the child that was larger.
pub fn heapify<T, S>(
    seq: &mut ObservableSequence<T, S>,
    size: usize,
    i: usize,
) -> Result<(), Cancelled>
where
    T: Ord + Copy,
    S: ExchangeSink<T>,
{
    debug_assert!(i < size, "heapify({size}, {i}) outside heap");
    let mut largest = i;
    let left = 2 * i + 1;
    let right = 2 * i + 2;

    if left < size && seq.less(largest, left) {
        largest = left;
    }
    if right < size && seq.less(largest, right) {
        largest = right;
    }
    if largest != i {
        seq.exchange(i, largest)?;
        heapify(seq, size, largest)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::ExchangeLog;

    #[test]
    fn heapify_respects_size_bound() {
        // 1 at the root, 9 sits outside the heap bound
        let mut seq = ObservableSequence::new(vec![1, 5, 3, 9], ExchangeLog::new());
        heapify(&mut seq, 3, 0).unwrap();
        assert_eq!(seq.as_slice(), &[5, 1, 3, 9]);
        assert!(
            seq.sink()
                .events()
                .iter()
                .all(|e| e.i < 3 && e.j < 3)
        );
    }

    #[test]
    fn heapify_prefers_larger_right_child() {
        let mut seq = ObservableSequence::new(vec![1, 4, 6], ExchangeLog::new());
        heapify(&mut seq, 3, 0).unwrap();
        assert_eq!(seq.as_slice(), &[6, 4, 1]);
        assert_eq!(seq.sink().events()[0].values, (6, 1));
    }

    #[test]
    fn heapify_is_silent_on_valid_heap() {
        let mut seq = ObservableSequence::new(vec![9, 4, 6, 1], ExchangeLog::new());
        heapify(&mut seq, 4, 0).unwrap();
        assert!(seq.sink().is_empty());
    }

    #[test]
    fn heap_sort_trace_small() {
        let mut seq = ObservableSequence::new(vec![2, 3, 1], ExchangeLog::new());
        heap_sort(&mut seq).unwrap();
        assert_eq!(seq.as_slice(), &[1, 2, 3]);
        let trace: Vec<_> = seq.sink().events().iter().map(|e| (e.i, e.j)).collect();
        assert_eq!(trace, vec![(0, 1), (0, 2), (0, 1), (0, 1)]);
    }
}
