//! Property-based invariant tests for the sorting algorithms.
//!
//! 1. Every algorithm leaves the sequence sorted
//! 2. The result is a permutation of the input (nothing added, nothing lost)
//! 3. Replaying the event log against the input reproduces the result
//! 4. Every event reports the values actually present after its swap
//! 5. Event sequence numbers are 1..=len with no gaps
//! 6. Selection sort emits exactly n-1 events
//! 7. Inputs of length 0 and 1 emit nothing
//! 8. Partition keeps the pivot inside its range
//! 9. Heapify never touches a position at or beyond the heap bound
//! 10. Deterministic algorithms produce identical traces on identical input

use proptest::prelude::*;
use sortviz_core::algorithms::{heapify, partition};
use sortviz_core::replay::{ExchangeLog, first_divergence, replay};
use sortviz_core::{Algorithm, ObservableSequence};

// ── Helpers ──────────────────────────────────────────────────────────

fn arb_algorithm() -> impl Strategy<Value = Algorithm> {
    proptest::sample::select(Algorithm::ALL.to_vec())
}

/// Small value range so duplicates are common.
fn arb_values() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(0u32..20, 0..=60)
}

fn run_logged(algorithm: Algorithm, values: &[u32]) -> (Vec<u32>, ExchangeLog<u32>) {
    let mut seq = ObservableSequence::new(values.to_vec(), ExchangeLog::new());
    algorithm.run(&mut seq).expect("uncancellable run");
    seq.into_parts()
}

fn sorted_copy(values: &[u32]) -> Vec<u32> {
    let mut v = values.to_vec();
    v.sort_unstable();
    v
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Sorted permutation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn result_is_sorted_permutation(algorithm in arb_algorithm(), values in arb_values()) {
        let (result, _) = run_logged(algorithm, &values);
        prop_assert_eq!(result, sorted_copy(&values), "{} failed", algorithm);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-5. The event log is a faithful, replayable history
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn replay_reproduces_result(algorithm in arb_algorithm(), values in arb_values()) {
        let (result, log) = run_logged(algorithm, &values);
        prop_assert_eq!(replay(&values, log.events()), result);
    }

    #[test]
    fn events_report_post_swap_values(algorithm in arb_algorithm(), values in arb_values()) {
        let (_, log) = run_logged(algorithm, &values);
        prop_assert_eq!(first_divergence(&values, log.events()), None);
    }

    #[test]
    fn sequence_numbers_are_dense(algorithm in arb_algorithm(), values in arb_values()) {
        let (_, log) = run_logged(algorithm, &values);
        for (k, event) in log.events().iter().enumerate() {
            prop_assert_eq!(event.seq, k as u64 + 1);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Selection sort event count
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn selection_emits_n_minus_one(values in proptest::collection::vec(any::<u32>(), 1..=80)) {
        let (_, log) = run_logged(Algorithm::Selection, &values);
        prop_assert_eq!(log.len(), values.len() - 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Tiny inputs are silent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tiny_inputs_emit_nothing(
        algorithm in arb_algorithm(),
        single in any::<u32>(),
        empty in any::<bool>(),
    ) {
        let values = if empty { vec![] } else { vec![single] };
        let (_, log) = run_logged(algorithm, &values);
        prop_assert!(log.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Partition bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn partition_pivot_within_range(
        values in proptest::collection::vec(0u32..50, 1..=40),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let x = a.index(values.len());
        let y = b.index(values.len());
        let (low, high) = (x.min(y), x.max(y));

        let mut seq = ObservableSequence::new(values.clone(), ExchangeLog::new());
        let pivot_value = values[high];
        let p = partition(&mut seq, low, high).unwrap();

        prop_assert!(low <= p && p <= high, "pivot {} outside [{}, {}]", p, low, high);
        prop_assert_eq!(seq.value(p), pivot_value);
        prop_assert!(seq.as_slice()[low..p].iter().all(|&v| v < pivot_value));
        prop_assert!(seq.as_slice()[p + 1..=high].iter().all(|&v| v >= pivot_value));
        // positions outside the range are untouched
        let range = low..=high;
        prop_assert!(
            seq.sink()
                .events()
                .iter()
                .all(|e| range.contains(&e.i) && range.contains(&e.j))
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Heapify bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn heapify_stays_below_bound(
        values in proptest::collection::vec(any::<u32>(), 1..=64),
        bound in any::<prop::sample::Index>(),
        start in any::<prop::sample::Index>(),
    ) {
        let size = bound.index(values.len()) + 1;
        let i = start.index(size);
        let mut seq = ObservableSequence::new(values.clone(), ExchangeLog::new());
        heapify(&mut seq, size, i).unwrap();

        prop_assert!(seq.sink().events().iter().all(|e| e.i < size && e.j < size));
        prop_assert_eq!(&seq.as_slice()[size..], &values[size..]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn traces_are_deterministic(algorithm in arb_algorithm(), values in arb_values()) {
        prop_assume!(algorithm.is_deterministic_trace());
        let (_, a) = run_logged(algorithm, &values);
        let (_, b) = run_logged(algorithm, &values);
        prop_assert_eq!(a, b);
    }
}
