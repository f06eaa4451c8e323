#![forbid(unsafe_code)]

//! LSD radix sort engine (base 10).
//!
//! Negative values are handled by sign splitting: magnitudes of the
//! negatives are sorted independently, then reversed and negated, and the
//! negative block is prepended to the sorted non-negatives. Each digit pass
//! is a stable counting sort with the corrected prefix-sum form
//! (`count[d] += count[d - 1]` for `d` in `1..base`).
//!
//! The digit passes run over private copies and publish empty highlights
//! (the visible array is untouched until the final reconstruction, which
//! writes one element per suspension point). Auxiliary memory grows with
//! the number of digits of the largest magnitude; that is inherent to the
//! algorithm and documented rather than truncated.

use crate::engine::{StepEngine, StepOutcome, Value};
use crate::state::{Highlights, RunState};

const BASE: Value = 10;

pub struct RadixEngine {
    st: St,
    /// Non-negative input values, sorted in place by the digit passes.
    pos: Vec<Value>,
    /// Magnitudes of the negative input values, sorted the same way.
    neg: Vec<Value>,
}

enum St {
    Start,
    PosPass(DigitPass),
    NegPass(DigitPass),
    Reconstruct { result: Vec<Value>, i: usize },
    Done,
}

/// One stable counting-sort pass per digit, least significant first.
struct DigitPass {
    exp: Value,
    max: Value,
    count: [u64; BASE as usize],
    output: Vec<Value>,
    stage: PassStage,
}

enum PassStage {
    Count { i: usize },
    /// Scatter walks the input backwards for stability; `remaining` is the
    /// number of elements not yet placed.
    Scatter { remaining: usize },
}

enum PassStep {
    Yield,
    Finished,
}

impl DigitPass {
    /// `None` when the target needs no digit passes (empty or all zeros).
    fn begin(target: &[Value]) -> Option<Self> {
        let max = target.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return None;
        }
        Some(Self {
            exp: 1,
            max,
            count: [0; BASE as usize],
            output: vec![0; target.len()],
            stage: PassStage::Count { i: 0 },
        })
    }

    fn digit(&self, value: Value) -> usize {
        ((value / self.exp) % BASE) as usize
    }

    /// Advance one suspension point, running pass boundaries (prefix sum,
    /// copy-back, next-digit setup) inline as a generator would.
    fn advance(&mut self, target: &mut [Value]) -> PassStep {
        loop {
            match self.stage {
                PassStage::Count { i } => {
                    if i < target.len() {
                        self.count[self.digit(target[i])] += 1;
                        self.stage = PassStage::Count { i: i + 1 };
                        return PassStep::Yield;
                    }
                    for d in 1..BASE as usize {
                        self.count[d] += self.count[d - 1];
                    }
                    self.stage = PassStage::Scatter {
                        remaining: target.len(),
                    };
                }
                PassStage::Scatter { remaining } => {
                    if remaining > 0 {
                        let value = target[remaining - 1];
                        let d = self.digit(value);
                        self.count[d] -= 1;
                        self.output[self.count[d] as usize] = value;
                        self.stage = PassStage::Scatter {
                            remaining: remaining - 1,
                        };
                        return PassStep::Yield;
                    }
                    target.copy_from_slice(&self.output);
                    self.exp = self.exp.saturating_mul(BASE);
                    if self.max / self.exp == 0 {
                        return PassStep::Finished;
                    }
                    self.count = [0; BASE as usize];
                    self.stage = PassStage::Count { i: 0 };
                }
            }
        }
    }
}

impl RadixEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            st: St::Start,
            pos: Vec::new(),
            neg: Vec::new(),
        }
    }

    /// The sorted output: negated magnitudes in descending-magnitude order,
    /// then the non-negatives.
    fn assemble(&self) -> Vec<Value> {
        self.neg
            .iter()
            .rev()
            .map(|&m| -m)
            .chain(self.pos.iter().copied())
            .collect()
    }

    /// Finish the reconstruction without publishing steps. Used on
    /// cancellation; the digit passes never touch the array.
    fn repair(&mut self, data: &mut [Value]) {
        if let St::Reconstruct { result, i } = &self.st {
            for at in *i..data.len() {
                data[at] = result[at];
            }
        }
    }
}

impl Default for RadixEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for RadixEngine {
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
            match &mut self.st {
                St::Start => {
                    if n <= 1 {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    }
                    for &x in data.iter() {
                        if x < 0 {
                            self.neg.push(-x);
                        } else {
                            self.pos.push(x);
                        }
                    }
                    self.st = match DigitPass::begin(&self.pos) {
                        Some(pass) => St::PosPass(pass),
                        None => match DigitPass::begin(&self.neg) {
                            Some(pass) => St::NegPass(pass),
                            None => St::Reconstruct {
                                result: self.assemble(),
                                i: 0,
                            },
                        },
                    };
                }
                St::PosPass(pass) => match pass.advance(&mut self.pos) {
                    PassStep::Yield => {
                        state.publish(Highlights::none());
                        return StepOutcome::Progress;
                    }
                    PassStep::Finished => {
                        self.st = match DigitPass::begin(&self.neg) {
                            Some(pass) => St::NegPass(pass),
                            None => St::Reconstruct {
                                result: self.assemble(),
                                i: 0,
                            },
                        };
                    }
                },
                St::NegPass(pass) => match pass.advance(&mut self.neg) {
                    PassStep::Yield => {
                        state.publish(Highlights::none());
                        return StepOutcome::Progress;
                    }
                    PassStep::Finished => {
                        self.st = St::Reconstruct {
                            result: self.assemble(),
                            i: 0,
                        };
                    }
                },
                St::Reconstruct { result, i } => {
                    if *i < n {
                        let at = *i;
                        data[at] = result[at];
                        state.publish(Highlights::one(at));
                        *i += 1;
                        return StepOutcome::Progress;
                    }
                    self.st = St::Done;
                    state.publish(Highlights::none());
                    return StepOutcome::Done;
                }
                St::Done => return StepOutcome::Done,
            }
        }
    }
}
