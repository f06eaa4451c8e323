#![forbid(unsafe_code)]

//! Bubble sort engine.
//!
//! One suspension point per adjacent comparison, whether or not it swaps,
//! so the renderer can show the pair under examination. After pass `i` the
//! last `i` elements are in final position; a pass with no swaps ends the
//! run early.

use crate::engine::{StepEngine, StepOutcome, Value};
use crate::state::{Highlights, RunState};

pub struct BubbleEngine {
    st: St,
}

enum St {
    Start,
    Pass { i: usize, j: usize, swapped: bool },
    Done,
}

impl BubbleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self { st: St::Start }
    }
}

impl Default for BubbleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for BubbleEngine {
    fn step(&mut self, data: &mut [Value], state: &mut RunState) -> StepOutcome {
        if state.is_cancelled() {
            // In-place swaps only; nothing to unwind.
            return StepOutcome::Cancelled;
        }
        if state.is_paused() {
            // A paused engine suspends again without doing work.
            return StepOutcome::Progress;
        }
        let n = data.len();
        loop {
            match &mut self.st {
                St::Start => {
                    if n <= 1 {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    }
                    self.st = St::Pass {
                        i: 0,
                        j: 0,
                        swapped: false,
                    };
                }
                St::Pass { i, j, swapped } => {
                    if *j < n - 1 - *i {
                        state.publish(Highlights::pair(*j, *j + 1));
                        if data[*j] > data[*j + 1] {
                            data.swap(*j, *j + 1);
                            *swapped = true;
                        }
                        *j += 1;
                        return StepOutcome::Progress;
                    }
                    // Pass finished: early-exit on a clean pass, otherwise
                    // the next pass starts within this same resumption.
                    if !*swapped || *i + 1 >= n {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    }
                    *i += 1;
                    *j = 0;
                    *swapped = false;
                }
                St::Done => return StepOutcome::Done,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Algorithm;
    use crate::engines::test_support::{is_sorted, run_to_completion};

    #[test]
    fn sorts_the_reference_scenario() {
        let mut data = vec![23, 77, 10, 12, 50, 60, 9];
        run_to_completion(Algorithm::Bubble, &mut data);
        assert_eq!(data, vec![9, 10, 12, 23, 50, 60, 77]);
    }

    #[test]
    fn trivial_inputs_complete_without_steps() {
        let mut empty: Vec<i64> = vec![];
        assert_eq!(run_to_completion(Algorithm::Bubble, &mut empty), 0);
        let mut single = vec![7];
        assert_eq!(run_to_completion(Algorithm::Bubble, &mut single), 0);
    }

    #[test]
    fn sorted_input_exits_after_one_pass() {
        let mut data = vec![1, 2, 3, 4, 5, 6];
        // One comparison step per adjacent pair, then the clean pass ends it.
        assert_eq!(run_to_completion(Algorithm::Bubble, &mut data), 5);
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn handles_duplicates_and_reverse_order() {
        let mut dupes = vec![4, 4, 4, 4];
        run_to_completion(Algorithm::Bubble, &mut dupes);
        assert_eq!(dupes, vec![4, 4, 4, 4]);

        let mut reversed: Vec<i64> = (0..20).rev().collect();
        run_to_completion(Algorithm::Bubble, &mut reversed);
        assert!(is_sorted(&reversed));
    }
}
