#![forbid(unsafe_code)]

//! Merge sort engine.
//!
//! Stable top-down merge sort with the split at `(left + right) / 2`,
//! carried as an explicit frame stack instead of recursion. A merge frame
//! copies both sorted halves into scratch buffers when it activates, then
//! writes one element back per suspension point, taking the left element on
//! ties. On cancellation the active merge flushes its remaining scratch
//! elements so no value is lost or duplicated.

use crate::engine::{StepEngine, StepOutcome, Value};
use crate::state::{Highlights, RunState};

pub struct MergeEngine {
    st: St,
    stack: Vec<Frame>,
}

enum St {
    Start,
    Working,
    Done,
}

enum Frame {
    /// A `[left, right]` range being split; `stage` records how many child
    /// ranges have already been fully sorted.
    Split {
        left: usize,
        right: usize,
        stage: Stage,
    },
    Merge(MergeRun),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stage {
    Enter,
    LeftDone,
    RightDone,
}

/// An active merge of `[left, mid]` and `[mid+1, right]`.
struct MergeRun {
    lbuf: Vec<Value>,
    rbuf: Vec<Value>,
    i: usize,
    j: usize,
    k: usize,
}

impl MergeRun {
    fn activate(data: &[Value], left: usize, mid: usize, right: usize) -> Self {
        Self {
            lbuf: data[left..=mid].to_vec(),
            rbuf: data[mid + 1..=right].to_vec(),
            i: 0,
            j: 0,
            k: left,
        }
    }

    /// Write one element back. Returns the written position, or `None` when
    /// both buffers are exhausted.
    fn advance(&mut self, data: &mut [Value]) -> Option<usize> {
        let value = if self.i < self.lbuf.len() && self.j < self.rbuf.len() {
            if self.lbuf[self.i] <= self.rbuf[self.j] {
                self.i += 1;
                self.lbuf[self.i - 1]
            } else {
                self.j += 1;
                self.rbuf[self.j - 1]
            }
        } else if self.i < self.lbuf.len() {
            self.i += 1;
            self.lbuf[self.i - 1]
        } else if self.j < self.rbuf.len() {
            self.j += 1;
            self.rbuf[self.j - 1]
        } else {
            return None;
        };
        let at = self.k;
        data[at] = value;
        self.k += 1;
        Some(at)
    }

    /// Flush every remaining scratch element into the array without
    /// publishing steps. Used on cancellation.
    fn flush(&mut self, data: &mut [Value]) {
        while self.advance(data).is_some() {}
    }
}

impl MergeEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            st: St::Start,
            stack: Vec::new(),
        }
    }
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for MergeEngine {
    fn step(&mut self, data: &mut [Value], state: &mut RunState) -> StepOutcome {
        if state.is_cancelled() {
            // At most one merge is mid-copy: the top of the stack.
            if let Some(Frame::Merge(run)) = self.stack.last_mut() {
                run.flush(data);
            }
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
                    self.stack.push(Frame::Split {
                        left: 0,
                        right: n - 1,
                        stage: Stage::Enter,
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
                        Frame::Split { left, right, stage } => {
                            let (left, right) = (*left, *right);
                            if left >= right {
                                self.stack.pop();
                                continue;
                            }
                            let mid = left + (right - left) / 2;
                            match stage {
                                Stage::Enter => {
                                    *stage = Stage::LeftDone;
                                    self.stack.push(Frame::Split {
                                        left,
                                        right: mid,
                                        stage: Stage::Enter,
                                    });
                                }
                                Stage::LeftDone => {
                                    *stage = Stage::RightDone;
                                    self.stack.push(Frame::Split {
                                        left: mid + 1,
                                        right,
                                        stage: Stage::Enter,
                                    });
                                }
                                Stage::RightDone => {
                                    let run = MergeRun::activate(data, left, mid, right);
                                    *top = Frame::Merge(run);
                                }
                            }
                        }
                        Frame::Merge(run) => {
                            if let Some(at) = run.advance(data) {
                                state.publish(Highlights::one(at));
                                return StepOutcome::Progress;
                            }
                            self.stack.pop();
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
    use crate::engines::test_support::{
        is_permutation, is_sorted, run_then_cancel, run_to_completion,
    };

    #[test]
    fn sorts_the_reference_scenario() {
        let mut data = vec![23, 77, 10, 12, 50, 60, 9];
        run_to_completion(Algorithm::Merge, &mut data);
        assert_eq!(data, vec![9, 10, 12, 23, 50, 60, 77]);
    }

    #[test]
    fn every_merge_write_is_one_step() {
        // ceil(log2) levels each writing n elements: [4,3,2,1] merges
        // 2+2+4 = 8 elements across three merge frames.
        let mut data = vec![4, 3, 2, 1];
        assert_eq!(run_to_completion(Algorithm::Merge, &mut data), 8);
        assert_eq!(data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn trivial_inputs_complete_without_steps() {
        let mut empty: Vec<i64> = vec![];
        assert_eq!(run_to_completion(Algorithm::Merge, &mut empty), 0);
        let mut single = vec![9];
        assert_eq!(run_to_completion(Algorithm::Merge, &mut single), 0);
    }

    #[test]
    fn sorts_duplicates_and_reverse_inputs() {
        let mut dupes = vec![2, 2, 1, 1, 2, 1];
        run_to_completion(Algorithm::Merge, &mut dupes);
        assert_eq!(dupes, vec![1, 1, 1, 2, 2, 2]);

        let mut desc: Vec<i64> = (0..33).rev().collect();
        run_to_completion(Algorithm::Merge, &mut desc);
        assert!(is_sorted(&desc));
    }

    #[test]
    fn cancelling_mid_merge_flushes_scratch_buffers() {
        let original = vec![8, 1, 6, 3, 9, 2, 7, 4, 5, 0];
        // Sweep every prefix length so cancellation lands inside merges.
        for limit in 0..40 {
            let after = run_then_cancel(Algorithm::Merge, original.clone(), limit);
            assert!(
                is_permutation(&after, &original),
                "limit {limit}: {after:?}"
            );
        }
    }
}
