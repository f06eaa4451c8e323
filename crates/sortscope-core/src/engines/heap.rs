#![forbid(unsafe_code)]

//! Heap sort engine.
//!
//! Builds a max-heap with sift-down, then repeatedly swaps the root to the
//! shrinking tail. `[0, end]` satisfies the heap property before each
//! extraction. Suspension points are the swaps: one per sift-down exchange
//! and one per root/end extraction. All mutation is swap-based, so
//! cancellation needs no repair.

use crate::engine::{StepEngine, StepOutcome, Value};
use crate::state::{Highlights, RunState};

pub struct HeapEngine {
    st: St,
}

enum St {
    Start,
    /// Heapify subtrees from the last parent down to the root.
    Build { i: usize, sift: Sift },
    /// Swap the root with position `end`, then restore the heap.
    ExtractSwap { end: usize },
    ExtractSift { end: usize, sift: Sift },
    Done,
}

/// An in-progress sift-down over `[_, end]` (inclusive).
struct Sift {
    root: usize,
    end: usize,
}

impl Sift {
    /// Perform at most one exchange. Returns the swapped pair, or `None`
    /// when the subtree already satisfies the heap property.
    fn advance(&mut self, data: &mut [Value]) -> Option<(usize, usize)> {
        let left = 2 * self.root + 1;
        if left > self.end {
            return None;
        }
        let right = left + 1;
        let mut largest = self.root;
        if data[left] > data[largest] {
            largest = left;
        }
        if right <= self.end && data[right] > data[largest] {
            largest = right;
        }
        if largest == self.root {
            return None;
        }
        data.swap(self.root, largest);
        let swapped = (self.root, largest);
        self.root = largest;
        Some(swapped)
    }
}

impl HeapEngine {
    #[must_use]
    pub fn new() -> Self {
        Self { st: St::Start }
    }
}

impl Default for HeapEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEngine for HeapEngine {
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
            match &mut self.st {
                St::Start => {
                    if n <= 1 {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    }
                    let i = n / 2 - 1;
                    self.st = St::Build {
                        i,
                        sift: Sift { root: i, end: n - 1 },
                    };
                }
                St::Build { i, sift } => {
                    if let Some((a, b)) = sift.advance(data) {
                        state.publish(Highlights::pair(a, b));
                        return StepOutcome::Progress;
                    }
                    if *i == 0 {
                        self.st = St::ExtractSwap { end: n - 1 };
                    } else {
                        *i -= 1;
                        *sift = Sift { root: *i, end: n - 1 };
                    }
                }
                St::ExtractSwap { end } => {
                    let end = *end;
                    data.swap(0, end);
                    state.publish(Highlights::pair(0, end));
                    self.st = St::ExtractSift {
                        end,
                        sift: Sift { root: 0, end: end - 1 },
                    };
                    return StepOutcome::Progress;
                }
                St::ExtractSift { end, sift } => {
                    if let Some((a, b)) = sift.advance(data) {
                        state.publish(Highlights::pair(a, b));
                        return StepOutcome::Progress;
                    }
                    if *end == 1 {
                        self.st = St::Done;
                        state.publish(Highlights::none());
                        return StepOutcome::Done;
                    }
                    self.st = St::ExtractSwap { end: *end - 1 };
                }
                St::Done => return StepOutcome::Done,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Algorithm;
    use crate::engines::test_support::{is_permutation, is_sorted, run_then_cancel, run_to_completion};

    #[test]
    fn sorts_the_reference_scenario() {
        let mut data = vec![23, 77, 10, 12, 50, 60, 9];
        run_to_completion(Algorithm::Heap, &mut data);
        assert_eq!(data, vec![9, 10, 12, 23, 50, 60, 77]);
    }

    #[test]
    fn trivial_and_degenerate_inputs() {
        let mut empty: Vec<i64> = vec![];
        assert_eq!(run_to_completion(Algorithm::Heap, &mut empty), 0);
        let mut single = vec![1];
        assert_eq!(run_to_completion(Algorithm::Heap, &mut single), 0);
        let mut equal = vec![5; 8];
        run_to_completion(Algorithm::Heap, &mut equal);
        assert_eq!(equal, vec![5; 8]);
    }

    #[test]
    fn sorts_sorted_and_reverse_inputs() {
        let mut asc: Vec<i64> = (0..25).collect();
        run_to_completion(Algorithm::Heap, &mut asc);
        assert!(is_sorted(&asc));

        let mut desc: Vec<i64> = (0..25).rev().collect();
        run_to_completion(Algorithm::Heap, &mut desc);
        assert!(is_sorted(&desc));
    }

    #[test]
    fn cancellation_preserves_the_multiset() {
        let original = vec![12, -3, 44, 7, 7, 0, 91, -20, 3];
        for limit in [0, 1, 3, 8, 20, 100] {
            let after = run_then_cancel(Algorithm::Heap, original.clone(), limit);
            assert!(is_permutation(&after, &original));
        }
    }
}
