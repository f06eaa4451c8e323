#![forbid(unsafe_code)]

//! The step driver: owns the working array, the run state, and the single
//! active engine, and resumes it on an external cadence.
//!
//! The driver never runs algorithm logic itself. It interprets engine
//! outcomes, honors control commands (pause, resume, reset, cancel), and
//! rate-limits stepping to a configurable minimum interval. All clock
//! inputs are passed in by the caller, so driver behavior is fully
//! deterministic under test.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::engine::{Algorithm, StepEngine, StepOutcome, Value};
use crate::state::{Highlights, Phase, RunState};

/// Default minimum interval between two engine steps.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(10);

/// `start()` was called while a run is already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyActive;

impl std::fmt::Display for AlreadyActive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a visualization run is already active")
    }
}

impl std::error::Error for AlreadyActive {}

/// Read-only view of the run for the renderer, queried once per frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub data: &'a [Value],
    pub highlights: Highlights,
    pub phase: Phase,
    pub elapsed_active: Duration,
}

pub struct Driver {
    data: Vec<Value>,
    /// The array as it was when the current run started (or as loaded),
    /// restored verbatim by `reset`.
    baseline: Vec<Value>,
    state: RunState,
    engine: Option<Box<dyn StepEngine>>,
    algorithm: Option<Algorithm>,
    step_interval: Duration,
    last_step: Option<Instant>,
}

impl Driver {
    #[must_use]
    pub fn new(data: Vec<Value>) -> Self {
        Self::with_interval(data, DEFAULT_STEP_INTERVAL)
    }

    #[must_use]
    pub fn with_interval(data: Vec<Value>, step_interval: Duration) -> Self {
        Self {
            baseline: data.clone(),
            data,
            state: RunState::idle(),
            engine: None,
            algorithm: None,
            step_interval,
            last_step: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    #[must_use]
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    #[must_use]
    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    /// Change the stepping cadence; takes effect from the next step.
    pub fn set_step_interval(&mut self, interval: Duration) {
        self.step_interval = interval;
    }

    /// Install a new working array. Rejected while a run is active.
    pub fn load(&mut self, data: Vec<Value>) -> Result<(), AlreadyActive> {
        if self.phase().is_active() {
            return Err(AlreadyActive);
        }
        self.baseline = data.clone();
        self.data = data;
        self.state = RunState::idle();
        self.engine = None;
        self.algorithm = None;
        self.last_step = None;
        Ok(())
    }

    /// Begin a run. Fails if one is already active; the request is reported
    /// and otherwise ignored so two engines never interleave.
    pub fn start(&mut self, algorithm: Algorithm, now: Instant) -> Result<(), AlreadyActive> {
        if self.phase().is_active() {
            debug!(?algorithm, "start ignored: run already active");
            return Err(AlreadyActive);
        }
        self.baseline = self.data.clone();
        self.engine = Some(algorithm.engine());
        self.algorithm = Some(algorithm);
        self.state.begin(now);
        self.last_step = None;
        debug!(?algorithm, len = self.data.len(), "run started");
        Ok(())
    }

    /// Suspend stepping; engine progress is retained exactly.
    pub fn pause(&mut self, now: Instant) {
        if self.phase() == Phase::Running {
            self.state.pause(now);
            debug!("run paused");
        }
    }

    /// Resume a paused run where it left off.
    pub fn resume(&mut self, now: Instant) {
        if self.phase() == Phase::Paused {
            self.state.resume(now);
            debug!("run resumed");
        }
    }

    /// Cancel the active run. The engine observes the cancellation on one
    /// final resumption and unwinds, leaving the array a permutation of its
    /// initial contents; the instance is then discarded.
    pub fn cancel(&mut self, now: Instant) {
        if !self.phase().is_active() {
            return;
        }
        self.state.cancel(now);
        if let Some(mut engine) = self.engine.take() {
            let outcome = engine.step(&mut self.data, &mut self.state);
            debug_assert_eq!(outcome, StepOutcome::Cancelled);
        }
        self.state.publish(Highlights::none());
        debug!("run cancelled");
    }

    /// Discard any run and restore the pre-run array snapshot.
    pub fn reset(&mut self) {
        self.engine = None;
        self.algorithm = None;
        self.data = self.baseline.clone();
        self.state = RunState::idle();
        self.last_step = None;
        debug!("driver reset");
    }

    /// Resume the engine exactly once if the run is Running (not Paused);
    /// otherwise a no-op.
    pub fn step(&mut self, now: Instant) {
        if self.phase() != Phase::Running {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match engine.step(&mut self.data, &mut self.state) {
            StepOutcome::Progress => {
                trace!(highlights = ?self.state.highlights().as_slice(), "step");
            }
            StepOutcome::Done => {
                self.state.complete(now);
                self.engine = None;
                debug!(elapsed = ?self.state.elapsed_active(now), "run completed");
            }
            StepOutcome::Cancelled => {
                // Phase was Running, so the engine cannot observe
                // cancellation here; discard it defensively.
                self.engine = None;
            }
        }
    }

    /// Rate-limited [`step`](Self::step): steps only when the configured
    /// interval has elapsed since the previous step. Returns whether a step
    /// was taken.
    pub fn maybe_step(&mut self, now: Instant) -> bool {
        if self.phase() != Phase::Running {
            return false;
        }
        let due = match self.last_step {
            Some(last) => now.saturating_duration_since(last) >= self.step_interval,
            None => true,
        };
        if !due {
            return false;
        }
        self.step(now);
        self.last_step = Some(now);
        true
    }

    /// One coherent read of everything the renderer needs for a frame.
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> Snapshot<'_> {
        Snapshot {
            data: &self.data,
            highlights: self.state.highlights(),
            phase: self.phase(),
            elapsed_active: self.state.elapsed_active(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive_to_completion(driver: &mut Driver, mut now: Instant) -> Instant {
        let tick = driver.step_interval();
        for _ in 0..100_000 {
            if driver.phase() == Phase::Completed {
                return now;
            }
            now += tick;
            driver.maybe_step(now);
        }
        panic!("driver did not complete");
    }

    #[test]
    fn full_run_sorts_and_completes() {
        let t0 = Instant::now();
        let mut driver = Driver::new(vec![23, 77, 10, 12, 50, 60, 9]);
        driver.start(Algorithm::Merge, t0).unwrap();
        assert_eq!(driver.phase(), Phase::Running);
        drive_to_completion(&mut driver, t0);
        assert_eq!(driver.data(), &[9, 10, 12, 23, 50, 60, 77]);
        assert!(driver.snapshot(t0).highlights.is_empty());
    }

    #[test]
    fn start_while_active_is_rejected() {
        let t0 = Instant::now();
        let mut driver = Driver::new(vec![3, 1, 2]);
        driver.start(Algorithm::Bubble, t0).unwrap();
        assert_eq!(driver.start(Algorithm::Quick, t0), Err(AlreadyActive));
        driver.pause(t0);
        assert_eq!(driver.start(Algorithm::Quick, t0), Err(AlreadyActive));
    }

    #[test]
    fn load_while_active_is_rejected() {
        let t0 = Instant::now();
        let mut driver = Driver::new(vec![2, 1]);
        driver.start(Algorithm::Insertion, t0).unwrap();
        assert_eq!(driver.load(vec![5, 4]), Err(AlreadyActive));
    }

    #[test]
    fn maybe_step_honors_the_interval() {
        let t0 = Instant::now();
        let mut driver = Driver::with_interval(vec![5, 4, 3, 2, 1], Duration::from_millis(10));
        driver.start(Algorithm::Bubble, t0).unwrap();

        assert!(driver.maybe_step(t0));
        // Too soon: under the interval since the last step.
        assert!(!driver.maybe_step(t0 + Duration::from_millis(4)));
        assert!(driver.maybe_step(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn pause_blocks_stepping_and_resume_continues() {
        let t0 = Instant::now();
        let mut driver = Driver::new(vec![4, 3, 2, 1]);
        driver.start(Algorithm::Insertion, t0).unwrap();
        driver.maybe_step(t0);
        let frozen = driver.data().to_vec();

        driver.pause(t0);
        assert!(!driver.maybe_step(t0 + Duration::from_secs(1)));
        assert_eq!(driver.data(), frozen.as_slice());

        driver.resume(t0 + Duration::from_secs(1));
        drive_to_completion(&mut driver, t0 + Duration::from_secs(1));
        assert_eq!(driver.data(), &[1, 2, 3, 4]);
    }

    #[test]
    fn pause_resume_without_steps_changes_nothing() {
        let input = vec![7, 2, 9, 1, 8, 3];
        let run = |with_pauses: bool| {
            let t0 = Instant::now();
            let mut driver = Driver::new(input.clone());
            driver.start(Algorithm::Merge, t0).unwrap();
            let mut highlight_log = Vec::new();
            let mut now = t0;
            while driver.phase() == Phase::Running {
                if with_pauses {
                    driver.pause(now);
                    driver.resume(now);
                }
                now += driver.step_interval();
                driver.step(now);
                highlight_log.push(driver.snapshot(now).highlights);
            }
            (driver.data().to_vec(), highlight_log)
        };
        assert_eq!(run(false), run(true));
    }

    #[test]
    fn elapsed_active_excludes_paused_time() {
        let t0 = Instant::now();
        let mut driver = Driver::new(vec![9, 8, 7]);
        driver.start(Algorithm::Bubble, t0).unwrap();
        driver.pause(t0 + Duration::from_millis(20));
        driver.resume(t0 + Duration::from_millis(120));
        let snap = driver.snapshot(t0 + Duration::from_millis(150));
        assert_eq!(snap.elapsed_active, Duration::from_millis(50));
    }

    #[test]
    fn reset_restores_the_pre_run_snapshot() {
        let t0 = Instant::now();
        let original = vec![6, 5, 4, 3, 2, 1];
        let mut driver = Driver::new(original.clone());
        driver.start(Algorithm::Quick, t0).unwrap();
        for i in 0..5 {
            driver.step(t0 + Duration::from_millis(i));
        }
        assert_ne!(driver.data(), original.as_slice());
        driver.reset();
        assert_eq!(driver.data(), original.as_slice());
        assert_eq!(driver.phase(), Phase::Idle);
    }

    #[test]
    fn cancel_mid_run_keeps_a_permutation() {
        let t0 = Instant::now();
        let original = vec![8, 1, 6, 3, 9, 2, 7, 4, 5, 0];
        for algorithm in Algorithm::ALL {
            for steps in [0usize, 1, 5, 17] {
                let mut driver = Driver::new(original.clone());
                driver.start(algorithm, t0).unwrap();
                for i in 0..steps {
                    driver.step(t0 + Duration::from_millis(i as u64));
                }
                driver.cancel(t0 + Duration::from_secs(1));
                // Short runs may already have completed; either way the
                // phase is terminal and the contents are a permutation.
                assert!(driver.phase().is_terminal());

                let mut sorted_after = driver.data().to_vec();
                sorted_after.sort_unstable();
                let mut sorted_original = original.clone();
                sorted_original.sort_unstable();
                assert_eq!(sorted_after, sorted_original, "{algorithm:?} at {steps} steps");
            }
        }
    }

    #[test]
    fn replayed_runs_are_deterministic() {
        let input = vec![5, 3, 8, 1, 9, 2, 7];
        let run = |input: &[i64]| {
            let t0 = Instant::now();
            let mut driver = Driver::new(input.to_vec());
            driver.start(Algorithm::QuickSelect, t0).unwrap();
            let mut highlight_log = Vec::new();
            let mut now = t0;
            while driver.phase() == Phase::Running {
                now += driver.step_interval();
                if driver.maybe_step(now) {
                    highlight_log.push(driver.snapshot(now).highlights);
                }
            }
            (driver.data().to_vec(), highlight_log)
        };
        assert_eq!(run(&input), run(&input));
    }

    #[test]
    fn completed_run_allows_a_fresh_start() {
        let t0 = Instant::now();
        let mut driver = Driver::new(vec![2, 1]);
        driver.start(Algorithm::Bubble, t0).unwrap();
        drive_to_completion(&mut driver, t0);
        assert_eq!(driver.phase(), Phase::Completed);
        assert!(driver.start(Algorithm::Heap, t0).is_ok());
    }
}
