#![forbid(unsafe_code)]

//! Quick sort engine (middle-element pivot value).
//!
//! Hoare-style scan: `i` walks right past elements below the pivot value,
//! `j` walks left past elements above it, and each exchange is one
//! suspension point. When the cursors cross, the subranges `[low, j]` and
//! `[i, high]` are pushed as new frames, left range first. Bounds are kept
//! as `i64` because `j` legitimately walks one position below `low`.

use crate::engine::{StepEngine, StepOutcome, Value};
use crate::state::{Highlights, RunState};

pub struct QuickEngine {
    st: St,
    stack: Vec<Frame>,
}

enum St {
    Start,
    Working,
    Done,
}

enum Frame {
    Sort {
        low: i64,
        high: i64,
    },
    Partition {
        low: i64,
        high: i64,
        pivot: Value,
        i: i64,
        j: i64,
    },
}

impl QuickEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            st: St::Start,
            stack: Vec::new(),
        }
    }
}

impl Default for QuickEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for QuickEngine {
    fn step(&mut self, data: &mut [Value], state: &mut RunState) -> StepOutcome {
        if state.is_cancelled() {
            // Exchange-based partitioning; the array is always a permutation.
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
                    match *top {
                        Frame::Sort { low, high } => {
                            self.stack.pop();
                            if low < high {
                                let mid = ((low + high) / 2) as usize;
                                self.stack.push(Frame::Partition {
                                    low,
                                    high,
                                    pivot: data[mid],
                                    i: low,
                                    j: high,
                                });
                            }
                        }
                        Frame::Partition {
                            low,
                            high,
                            pivot,
                            ref mut i,
                            ref mut j,
                        } => {
                            if *i <= *j {
                                while data[*i as usize] < pivot {
                                    *i += 1;
                                }
                                while data[*j as usize] > pivot {
                                    *j -= 1;
                                }
                                if *i <= *j {
                                    let (a, b) = (*i as usize, *j as usize);
                                    data.swap(a, b);
                                    state.publish(Highlights::pair(a, b));
                                    *i += 1;
                                    *j -= 1;
                                    return StepOutcome::Progress;
                                }
                            }
                            // Cursors crossed: recurse into both sides,
                            // left range on top so it partitions first.
                            let (i, j) = (*i, *j);
                            self.stack.pop();
                            self.stack.push(Frame::Sort { low: i, high });
                            self.stack.push(Frame::Sort { low, high: j });
                        }
                    }
                }
                St::Done => return StepOutcome::Done,
            }
        }
    }
}
