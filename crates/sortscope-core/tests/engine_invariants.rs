//! Property-based invariant tests for the engines, driven through the
//! public `Driver` surface.
//!
//! These verify the cross-engine contract for arbitrary inputs:
//!
//! 1. Completion sortedness: the final array is non-decreasing.
//! 2. Permutation invariant: the final array is a multiset-preserving
//!    rearrangement of the input.
//! 3. Highlight bounds: every published index is within the array.
//! 4. Cancellation safety: cancelling after any number of steps leaves a
//!    permutation of the input.
//! 5. Step determinism: replaying a run reproduces the same highlight
//!    sequence and final array.
//! 6. Termination: every run finishes within a step budget derived from
//!    the algorithm's complexity.

use proptest::prelude::*;
use sortscope_core::{Algorithm, Driver, Phase};
use std::time::Instant;

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

fn array_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-500i64..=500, 0..40)
}

fn step_budget(n: usize) -> usize {
    4 * n * n + 64 * n + 64
}

/// Drive a run to completion, returning the final array and the highlight
/// trace observed after each step.
fn run_full(algorithm: Algorithm, input: &[i64]) -> (Vec<i64>, Vec<Vec<usize>>) {
    let now = Instant::now();
    let mut driver = Driver::new(input.to_vec());
    driver.start(algorithm, now).expect("driver is idle");
    let mut trace = Vec::new();
    let budget = step_budget(input.len());
    while driver.phase() == Phase::Running {
        driver.step(now);
        let snapshot = driver.snapshot(now);
        for &i in snapshot.highlights.as_slice() {
            assert!(i < snapshot.data.len(), "highlight {i} out of bounds");
        }
        trace.push(snapshot.highlights.as_slice().to_vec());
        assert!(
            trace.len() <= budget + 1,
            "{algorithm:?} exceeded its step budget"
        );
    }
    assert_eq!(driver.phase(), Phase::Completed);
    assert!(driver.snapshot(now).highlights.is_empty());
    (driver.data().to_vec(), trace)
}

fn sorted_copy(data: &[i64]) -> Vec<i64> {
    let mut copy = data.to_vec();
    copy.sort_unstable();
    copy
}

proptest! {
    #[test]
    fn engines_sort_any_input(algorithm in algorithm_strategy(), input in array_strategy()) {
        let (data, _) = run_full(algorithm, &input);
        prop_assert_eq!(data, sorted_copy(&input));
    }

    #[test]
    fn cancellation_preserves_the_multiset(
        algorithm in algorithm_strategy(),
        input in array_strategy(),
        limit in 0usize..200,
    ) {
        let now = Instant::now();
        let mut driver = Driver::new(input.clone());
        driver.start(algorithm, now).expect("driver is idle");
        for _ in 0..limit {
            if driver.phase() != Phase::Running {
                break;
            }
            driver.step(now);
        }
        driver.cancel(now);
        prop_assert!(driver.phase().is_terminal());
        prop_assert_eq!(sorted_copy(driver.data()), sorted_copy(&input));
    }

    #[test]
    fn replays_are_deterministic(algorithm in algorithm_strategy(), input in array_strategy()) {
        prop_assert_eq!(run_full(algorithm, &input), run_full(algorithm, &input));
    }
}
