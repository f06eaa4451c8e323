#![forbid(unsafe_code)]

//! Insertion sort engine.
//!
//! The prefix `[0, i)` is sorted before index `i` is processed. Each
//! right-shift of a strictly greater element is one suspension point, and
//! placing the lifted key is another. While the key is lifted out of the
//! array there is a one-slot hole; cancellation writes the key back into it
//! so the array stays a permutation of its input.

use crate::engine::{StepEngine, StepOutcome, Value};
use crate::state::{Highlights, RunState};

pub struct InsertionEngine {
    st: St,
}

enum St {
    Start,
    Outer { i: usize },
    Shift { i: usize, key: Value, j: isize },
    Done,
}

impl InsertionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self { st: St::Start }
    }

    /// The hole the lifted key belongs in, if a key is currently lifted.
    fn repair(&self, data: &mut [Value]) {
        if let St::Shift { key, j, .. } = self.st {
            data[(j + 1) as usize] = key;
        }
    }
}

impl Default for InsertionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for InsertionEngine {
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
                    self.st = St::Outer { i: 1 };
                }
                St::Outer { i } => {
                    if i >= n {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    }
                    self.st = St::Shift {
                        i,
                        key: data[i],
                        j: i as isize - 1,
                    };
                }
                St::Shift { i, key, ref mut j } => {
                    if *j >= 0 && data[*j as usize] > key {
                        let at = *j as usize;
                        data[at + 1] = data[at];
                        state.publish(Highlights::pair(at, at + 1));
                        *j -= 1;
                        return StepOutcome::Progress;
                    }
                    let slot = (*j + 1) as usize;
                    data[slot] = key;
                    state.publish(Highlights::one(slot));
                    self.st = St::Outer { i: i + 1 };
                    return StepOutcome::Progress;
                }
                St::Done => return StepOutcome::Done,
            }
        }
    }
}
