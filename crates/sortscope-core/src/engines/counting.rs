#![forbid(unsafe_code)]

//! Counting sort engine.
//!
//! Offset-by-minimum counting with a table of size `k = max - min + 1`,
//! reconstructed by walking the counts in ascending key order. One
//! suspension point per element counted and one per element written back.
//!
//! The auxiliary table is proportional to the value range, not the input
//! length: a sparse input spanning a huge range allocates a huge table.
//! That degradation is inherent to the algorithm and left visible rather
//! than truncated; the visualizer feeds values from a bounded range.

use crate::engine::{StepEngine, StepOutcome, Value};
use crate::state::{Highlights, RunState};

pub struct CountingEngine {
    st: St,
    counts: Vec<u64>,
    min: Value,
}

enum St {
    Start,
    Count { i: usize },
    Rebuild { v: usize, emitted: u64, out: usize },
    Done,
}

impl CountingEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            st: St::Start,
            counts: Vec::new(),
            min: 0,
        }
    }

    /// Finish the reconstruction without publishing steps. Used on
    /// cancellation: the counting phase never touches the array, so only a
    /// partial rebuild needs flushing.
    fn repair(&mut self, data: &mut [Value]) {
        if let St::Rebuild { v, emitted, out } = self.st {
            let (mut v, mut emitted, mut out) = (v, emitted, out);
            while v < self.counts.len() {
                if emitted < self.counts[v] {
                    data[out] = self.min + v as Value;
                    emitted += 1;
                    out += 1;
                } else {
                    v += 1;
                    emitted = 0;
                }
            }
        }
    }
}

impl Default for CountingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for CountingEngine {
    fn step(&mut self, data: &mut [Value], state: &mut RunState) -> StepOutcome {
        if state.is_cancelled() {
            self.repair(data);
            return StepOutcome::Cancelled;
        }
        if state.is_paused() {
            // A paused engine suspends again without doing work.
            return StepOutcome::Progress;
        }
        let n = data.len();
        loop {
            match self.st {
                St::Start => {
                    if n <= 1 {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    }
                    self.min = data.iter().copied().min().unwrap_or(0);
                    let max = data.iter().copied().max().unwrap_or(0);
                    let k = (max - self.min + 1) as usize;
                    self.counts = vec![0; k];
                    self.st = St::Count { i: 0 };
                }
                St::Count { i } => {
                    if i < n {
                        let slot = (data[i] - self.min) as usize;
                        self.counts[slot] += 1;
                        state.publish(Highlights::one(i));
                        self.st = St::Count { i: i + 1 };
                        return StepOutcome::Progress;
                    }
                    self.st = St::Rebuild {
                        v: 0,
                        emitted: 0,
                        out: 0,
                    };
                }
                St::Rebuild {
                    mut v,
                    mut emitted,
                    out,
                } => {
                    while v < self.counts.len() && emitted >= self.counts[v] {
                        v += 1;
                        emitted = 0;
                    }
                    if v >= self.counts.len() {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    }
                    data[out] = self.min + v as Value;
                    state.publish(Highlights::one(out));
                    self.st = St::Rebuild {
                        v,
                        emitted: emitted + 1,
                        out: out + 1,
                    };
                    return StepOutcome::Progress;
                }
                St::Done => return StepOutcome::Done,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Algorithm;
    use crate::engines::test_support::{is_permutation, run_then_cancel, run_to_completion};

    #[test]
    fn sorts_with_exactly_two_steps_per_element() {
        let mut data = vec![23, 77, 10, 12, 50, 60, 9];
        assert_eq!(run_to_completion(Algorithm::Counting, &mut data), 14);
        assert_eq!(data, vec![9, 10, 12, 23, 50, 60, 77]);
    }

    #[test]
    fn trivial_inputs_complete_without_steps() {
        let mut empty: Vec<i64> = vec![];
        assert_eq!(run_to_completion(Algorithm::Counting, &mut empty), 0);
        let mut single = vec![-5];
        assert_eq!(run_to_completion(Algorithm::Counting, &mut single), 0);
    }

    #[test]
    fn handles_negative_offsets_and_duplicates() {
        let mut data = vec![-3, 7, -3, 0, 7, 7, -9];
        run_to_completion(Algorithm::Counting, &mut data);
        assert_eq!(data, vec![-9, -3, -3, 0, 7, 7, 7]);
    }

    #[test]
    fn cancellation_during_rebuild_keeps_the_multiset() {
        let original = vec![5, 1, 4, 1, 5, 9, 2, 6];
        for limit in 0..18 {
            let after = run_then_cancel(Algorithm::Counting, original.clone(), limit);
            assert!(
                is_permutation(&after, &original),
                "limit {limit}: {after:?}"
            );
        }
    }
}
