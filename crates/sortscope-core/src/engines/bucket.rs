#![forbid(unsafe_code)]

//! Bucket sort engine (integer-adapted).
//!
//! Elements are distributed into `min(n, 10)` buckets by normalized value
//! `(x - min) / (max - min + 1)`, each bucket is sorted eagerly between
//! phases, and the buckets are concatenated back in index order. One
//! suspension point per element distributed and one per element written
//! back. The distribution phase never touches the array; if cancellation
//! lands mid write-back, the remaining bucket contents are flushed so the
//! array stays a permutation of its input.

use crate::engine::{StepEngine, StepOutcome, Value};
use crate::state::{Highlights, RunState};

const MAX_BUCKETS: usize = 10;

pub struct BucketEngine {
    st: St,
    buckets: Vec<Vec<Value>>,
    min: Value,
    range: Value,
}

enum St {
    Start,
    Distribute { i: usize },
    WriteBack { b: usize, e: usize, out: usize },
    Done,
}

impl BucketEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            st: St::Start,
            buckets: Vec::new(),
            min: 0,
            range: 1,
        }
    }

    fn bucket_index(&self, x: Value) -> usize {
        let count = self.buckets.len();
        let normalized = (x - self.min) as f64 / self.range as f64;
        ((count as f64 * normalized) as usize).min(count - 1)
    }

    /// Finish the write-back without publishing steps. Used on cancellation.
    fn repair(&mut self, data: &mut [Value]) {
        if let St::WriteBack { b, e, out } = self.st {
            let (mut b, mut e, mut out) = (b, e, out);
            while b < self.buckets.len() {
                if e < self.buckets[b].len() {
                    data[out] = self.buckets[b][e];
                    e += 1;
                    out += 1;
                } else {
                    b += 1;
                    e = 0;
                }
            }
        }
    }
}

impl Default for BucketEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for BucketEngine {
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
                    // Non-empty by the guard above, so min/max exist.
                    self.min = data.iter().copied().min().unwrap_or(0);
                    let max = data.iter().copied().max().unwrap_or(0);
                    self.range = max - self.min + 1;
                    self.buckets = vec![Vec::new(); n.min(MAX_BUCKETS)];
                    self.st = St::Distribute { i: 0 };
                }
                St::Distribute { i } => {
                    if i < n {
                        let x = data[i];
                        let idx = self.bucket_index(x);
                        self.buckets[idx].push(x);
                        state.publish(Highlights::one(i));
                        self.st = St::Distribute { i: i + 1 };
                        return StepOutcome::Progress;
                    }
                    for bucket in &mut self.buckets {
                        bucket.sort_unstable();
                    }
                    self.st = St::WriteBack { b: 0, e: 0, out: 0 };
                }
                St::WriteBack {
                    mut b,
                    mut e,
                    out,
                } => {
                    while b < self.buckets.len() && e >= self.buckets[b].len() {
                        b += 1;
                        e = 0;
                    }
                    if b >= self.buckets.len() {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    }
                    data[out] = self.buckets[b][e];
                    state.publish(Highlights::one(out));
                    self.st = St::WriteBack {
                        b,
                        e: e + 1,
                        out: out + 1,
                    };
                    return StepOutcome::Progress;
                }
                St::Done => return StepOutcome::Done,
            }
        }
    }
}
