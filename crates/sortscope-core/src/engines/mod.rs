#![forbid(unsafe_code)]

//! One module per algorithm engine.
//!
//! Each engine reproduces its algorithm's textbook operation order, with a
//! suspension point after every observable mutation (and, where the
//! algorithm's visualization calls for it, at comparison-only iterations).
//! The per-engine module docs state the exact granularity.

pub mod bubble;
pub mod bucket;
pub mod counting;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod quickselect;
pub mod radix;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::engine::{Algorithm, StepEngine, StepOutcome, Value};
    use crate::state::{Highlights, RunState};
    use std::time::Instant;

    /// Drive an engine to completion, returning the step count.
    ///
    /// Panics if the engine fails to finish within a generous bound, so a
    /// non-terminating machine shows up as a test failure instead of a hang.
    pub fn run_to_completion(algorithm: Algorithm, data: &mut Vec<Value>) -> usize {
        let mut engine = algorithm.engine();
        let mut state = RunState::idle();
        state.begin(Instant::now());
        let mut steps = 0usize;
        let budget = step_budget(data.len());
        loop {
            match engine.step(data, &mut state) {
                StepOutcome::Progress => {
                    steps += 1;
                    for &i in state.highlights().as_slice() {
                        assert!(i < data.len(), "highlight {i} out of bounds");
                    }
                    assert!(steps <= budget, "{algorithm:?} exceeded {budget} steps");
                }
                StepOutcome::Done => {
                    assert!(state.highlights().is_empty(), "final step must clear highlights");
                    return steps;
                }
                StepOutcome::Cancelled => panic!("unexpected cancellation"),
            }
        }
    }

    /// Step an engine `limit` times (or to completion), then cancel it and
    /// let it unwind. Returns the array contents after unwinding.
    pub fn run_then_cancel(algorithm: Algorithm, mut data: Vec<Value>, limit: usize) -> Vec<Value> {
        let now = Instant::now();
        let mut engine = algorithm.engine();
        let mut state = RunState::idle();
        state.begin(now);
        for _ in 0..limit {
            match engine.step(&mut data, &mut state) {
                StepOutcome::Progress => {}
                StepOutcome::Done => return data,
                StepOutcome::Cancelled => unreachable!("not cancelled yet"),
            }
        }
        state.cancel(now);
        assert_eq!(engine.step(&mut data, &mut state), StepOutcome::Cancelled);
        data
    }

    /// Replay a full run, collecting the highlight report of every step.
    pub fn highlight_trace(algorithm: Algorithm, data: &mut Vec<Value>) -> Vec<Highlights> {
        let mut engine = algorithm.engine();
        let mut state = RunState::idle();
        state.begin(Instant::now());
        let mut trace = Vec::new();
        let budget = step_budget(data.len());
        loop {
            match engine.step(data, &mut state) {
                StepOutcome::Progress => {
                    trace.push(state.highlights());
                    assert!(trace.len() <= budget);
                }
                StepOutcome::Done => {
                    trace.push(state.highlights());
                    return trace;
                }
                StepOutcome::Cancelled => unreachable!(),
            }
        }
    }

    /// Multiset equality between two arrays.
    pub fn is_permutation(a: &[Value], b: &[Value]) -> bool {
        let mut a = a.to_vec();
        let mut b = b.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    pub fn is_sorted(data: &[Value]) -> bool {
        data.windows(2).all(|w| w[0] <= w[1])
    }

    fn step_budget(n: usize) -> usize {
        // Quadratic algorithms on n elements, plus slack for digit passes.
        4 * n * n + 64 * n + 64
    }
}
