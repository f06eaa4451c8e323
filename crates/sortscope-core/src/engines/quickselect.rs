#![forbid(unsafe_code)]

//! Quickselect-partition sort engine.
//!
//! Uses the Lomuto partition primitive (last element as pivot) and applies
//! it recursively to both sides, so it sorts fully rather than selecting a
//! single order statistic. Each scan position is an "examine" suspension
//! point highlighting scan cursor, pivot, and partition boundary; an
//! exchange adds a second suspension point highlighting the swapped pair,
//! and the final pivot placement is its own step. Partition invariant: after
//! placement, everything left of the boundary is ≤ the pivot and everything
//! right of it is ≥.

use crate::engine::{StepEngine, StepOutcome, Value};
use crate::state::{Highlights, RunState};

pub struct QuickSelectEngine {
    st: St,
    stack: Vec<Frame>,
}

enum St {
    Start,
    Working,
    Done,
}

enum Frame {
    Sort { low: i64, high: i64 },
    Partition(Part),
}

struct Part {
    low: i64,
    high: i64,
    /// Partition boundary: next slot for an element ≤ pivot.
    i: i64,
    /// Scan cursor.
    j: i64,
    stage: PartStage,
}

enum PartStage {
    /// Examine `data[j]` against the pivot.
    Examine,
    /// The extra suspension the original visualization emits after an
    /// exchange, before moving to the next scan position.
    AfterSwap { shown: Highlights },
    /// Swap the pivot into its final slot.
    PlacePivot,
}

impl QuickSelectEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            st: St::Start,
            stack: Vec::new(),
        }
    }
}

impl Default for QuickSelectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for QuickSelectEngine {
    fn step(&mut self, data: &mut [Value], state: &mut RunState) -> StepOutcome {
        if state.is_cancelled() {
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
                    self.stack.push(Frame::Sort {
                        low: 0,
                        high: n as i64 - 1,
                    });
                    self.st = St::Working;
                }
                St::Working => {
                    let Some(top) = self.stack.last_mut() else {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    };
                    match top {
                        Frame::Sort { low, high } => {
                            let (low, high) = (*low, *high);
                            self.stack.pop();
                            if low < high {
                                self.stack.push(Frame::Partition(Part {
                                    low,
                                    high,
                                    i: low,
                                    j: low,
                                    stage: PartStage::Examine,
                                }));
                            }
                        }
                        Frame::Partition(part) => {
                            match part.stage {
                                PartStage::Examine => {
                                    if part.j < part.high {
                                        let j = part.j as usize;
                                        let high = part.high as usize;
                                        let i = part.i as usize;
                                        let pivot = data[high];
                                        if data[j] <= pivot && i != j {
                                            data.swap(i, j);
                                            let shown = Highlights::pair(i, j);
                                            state.publish(shown);
                                            part.stage = PartStage::AfterSwap { shown };
                                            return StepOutcome::Progress;
                                        }
                                        // No exchange: report the three
                                        // cursors under examination.
                                        state.publish(Highlights::triple(j, high, i));
                                        if data[j] <= pivot {
                                            part.i += 1;
                                        }
                                        part.j += 1;
                                        return StepOutcome::Progress;
                                    }
                                    part.stage = PartStage::PlacePivot;
                                }
                                PartStage::AfterSwap { shown } => {
                                    state.publish(shown);
                                    part.i += 1;
                                    part.j += 1;
                                    part.stage = PartStage::Examine;
                                    return StepOutcome::Progress;
                                }
                                PartStage::PlacePivot => {
                                    let (low, high, i) = (part.low, part.high, part.i);
                                    self.stack.pop();
                                    self.stack.push(Frame::Sort { low: i + 1, high });
                                    self.stack.push(Frame::Sort { low, high: i - 1 });
                                    if i != high {
                                        let (a, b) = (i as usize, high as usize);
                                        data.swap(a, b);
                                        state.publish(Highlights::pair(a, b));
                                        return StepOutcome::Progress;
                                    }
                                }
                            }
                        }
                    }
                }
                St::Done => return StepOutcome::Done,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Algorithm;
    use crate::engines::test_support::{highlight_trace, is_sorted, run_to_completion};

    #[test]
    fn sorts_the_reference_scenario() {
        let mut data = vec![23, 77, 10, 12, 50, 60, 9];
        run_to_completion(Algorithm::QuickSelect, &mut data);
        assert_eq!(data, vec![9, 10, 12, 23, 50, 60, 77]);
    }

    #[test]
    fn trivial_inputs_complete_without_steps() {
        let mut empty: Vec<i64> = vec![];
        assert_eq!(run_to_completion(Algorithm::QuickSelect, &mut empty), 0);
        let mut single = vec![2];
        assert_eq!(run_to_completion(Algorithm::QuickSelect, &mut single), 0);
    }

    #[test]
    fn examine_steps_report_three_cursors() {
        let mut data = vec![3, 1, 2];
        let trace = highlight_trace(Algorithm::QuickSelect, &mut data);
        assert!(is_sorted(&data));
        assert!(
            trace.iter().any(|h| h.as_slice().len() == 3),
            "expected at least one examine step with three cursors: {trace:?}"
        );
    }

    #[test]
    fn terminates_on_duplicates_and_sorted_inputs() {
        let mut dupes = vec![4; 12];
        run_to_completion(Algorithm::QuickSelect, &mut dupes);
        assert_eq!(dupes, vec![4; 12]);

        let mut sorted: Vec<i64> = (0..20).collect();
        run_to_completion(Algorithm::QuickSelect, &mut sorted);
        assert!(is_sorted(&sorted));

        let mut reversed: Vec<i64> = (0..20).rev().collect();
        run_to_completion(Algorithm::QuickSelect, &mut reversed);
        assert!(is_sorted(&reversed));
    }
}
