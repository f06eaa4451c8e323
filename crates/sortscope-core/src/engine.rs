#![forbid(unsafe_code)]

//! The step-engine contract and the closed algorithm dispatch.
//!
//! Every sorting algorithm in sortscope is expressed as a suspendable state
//! machine: one [`StepEngine::step`] call runs the machine to its next
//! suspension point, mutating the working array in place and publishing the
//! touched positions through the run state. Recursion is carried as explicit
//! frame stacks inside each engine, so suspension never depends on stackful
//! coroutines and a dropped engine unwinds like any other value.
//!
//! Suspension points sit immediately after every observable mutation and at
//! comparison-bearing loop iterations, matching the granularity described in
//! each engine's module docs. Between two suspension points an engine may
//! perform bounded bookkeeping (popping exhausted frames, prefix sums over a
//! digit table) without returning, exactly as a resumed generator would run
//! until its next yield.

use crate::engines::{
    bubble::BubbleEngine, bucket::BucketEngine, counting::CountingEngine, heap::HeapEngine,
    insertion::InsertionEngine, merge::MergeEngine, quick::QuickEngine,
    quickselect::QuickSelectEngine, radix::RadixEngine,
};
use crate::state::RunState;

/// Element type of the visualized working array.
pub type Value = i64;

/// What a single engine resumption produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The engine advanced one suspension point and has more work.
    Progress,
    /// The final, mutation-free step: the array is sorted and the
    /// highlights have been cleared. The engine must not be resumed again.
    Done,
    /// The engine observed cancellation and unwound, restoring the array to
    /// a permutation of its initial contents.
    Cancelled,
}

/// A suspendable sorting computation over the shared working array.
///
/// The engine holds all of its own progress (loop counters, frame stacks,
/// scratch buffers); the array and run state are owned by the driver and
/// lent per step. Implementations check for cancellation at the top of every
/// step and never block between suspension points.
pub trait StepEngine {
    /// Advance to the next suspension point.
    fn step(&mut self, data: &mut [Value], state: &mut RunState) -> StepOutcome;
}

/// The closed set of visualized algorithms.
///
/// Adding an algorithm means adding a variant here and its engine module;
/// dispatch stays in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bubble,
    Bucket,
    Counting,
    Heap,
    Insertion,
    Merge,
    Quick,
    QuickSelect,
    Radix,
}

impl Algorithm {
    /// All algorithms, in selector display order.
    pub const ALL: [Algorithm; 9] = [
        Algorithm::Bubble,
        Algorithm::Bucket,
        Algorithm::Counting,
        Algorithm::Heap,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::QuickSelect,
        Algorithm::Radix,
    ];

    /// Human-readable name, as shown in the selector and console banner.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Bucket => "Bucket Sort",
            Algorithm::Counting => "Counting Sort",
            Algorithm::Heap => "Heap Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::QuickSelect => "Quickselect Sort",
            Algorithm::Radix => "Radix Sort",
        }
    }

    /// Short name without the " Sort" suffix, for console banners.
    #[must_use]
    pub fn short_label(self) -> &'static str {
        match self {
            Algorithm::QuickSelect => "Quickselect",
            other => other
                .label()
                .strip_suffix(" Sort")
                .unwrap_or(other.label()),
        }
    }

    /// Construct a fresh engine instance for one run.
    ///
    /// Engines size themselves lazily from the array they first see, so no
    /// length is needed here.
    #[must_use]
    pub fn engine(self) -> Box<dyn StepEngine> {
        match self {
            Algorithm::Bubble => Box::new(BubbleEngine::new()),
            Algorithm::Bucket => Box::new(BucketEngine::new()),
            Algorithm::Counting => Box::new(CountingEngine::new()),
            Algorithm::Heap => Box::new(HeapEngine::new()),
            Algorithm::Insertion => Box::new(InsertionEngine::new()),
            Algorithm::Merge => Box::new(MergeEngine::new()),
            Algorithm::Quick => Box::new(QuickEngine::new()),
            Algorithm::QuickSelect => Box::new(QuickSelectEngine::new()),
            Algorithm::Radix => Box::new(RadixEngine::new()),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
