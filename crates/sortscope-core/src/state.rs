#![forbid(unsafe_code)]

//! Run state shared between the driver and the active engine.
//!
//! The driver owns a [`RunState`] for the lifetime of one visualization run.
//! Engines receive it mutably on every step but treat it as read-only except
//! for the single write they are allowed: publishing the indices their last
//! step touched. All timing inputs are passed in as [`Instant`] values so the
//! core never reads a clock itself.

use std::time::{Duration, Instant};

/// Phase of the current visualization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No run has been started (or the driver was reset).
    #[default]
    Idle,
    /// A run is in progress and stepping on the external cadence.
    Running,
    /// A run is in progress but suspended; no engine work happens.
    Paused,
    /// The engine finished; the array is sorted.
    Completed,
    /// The run was cancelled before completion.
    Cancelled,
}

impl Phase {
    /// An active run exists (engine instance is live).
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }

    /// The run reached a terminal phase.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Cancelled)
    }
}

/// The array positions touched by the most recent step.
///
/// At most three positions (the quickselect partition examine step reports
/// scan cursor, pivot, and partition boundary). Overwritten on every
/// published step; steps that do not touch the visible array publish the
/// empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlights {
    len: u8,
    idx: [usize; 3],
}

impl Highlights {
    /// No positions highlighted.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            len: 0,
            idx: [0; 3],
        }
    }

    /// A single highlighted position.
    #[must_use]
    pub const fn one(a: usize) -> Self {
        Self {
            len: 1,
            idx: [a, 0, 0],
        }
    }

    /// Two highlighted positions. Collapses to one entry when equal.
    #[must_use]
    pub const fn pair(a: usize, b: usize) -> Self {
        if a == b {
            Self::one(a)
        } else {
            Self {
                len: 2,
                idx: [a, b, 0],
            }
        }
    }

    /// Three highlighted positions. The partition examine step's cursors may
    /// coincide; they are reported as published, not collapsed.
    #[must_use]
    pub const fn triple(a: usize, b: usize, c: usize) -> Self {
        Self {
            len: 3,
            idx: [a, b, c],
        }
    }

    /// The highlighted positions, in publication order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.idx[..self.len as usize]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `i` is among the highlighted positions.
    #[must_use]
    pub fn contains(&self, i: usize) -> bool {
        self.as_slice().contains(&i)
    }
}

/// Shared run bookkeeping: phase, highlights, and elapsed-time accounting.
#[derive(Debug, Clone)]
pub struct RunState {
    phase: Phase,
    highlights: Highlights,
    started_at: Option<Instant>,
    paused_since: Option<Instant>,
    paused_total: Duration,
    active_total: Option<Duration>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::idle()
    }
}

impl RunState {
    /// A fresh idle state with no run history.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            highlights: Highlights::none(),
            started_at: None,
            paused_since: None,
            paused_total: Duration::ZERO,
            active_total: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn highlights(&self) -> Highlights {
        self.highlights
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.phase == Phase::Cancelled
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Publish the positions touched by the step that is returning control.
    ///
    /// This is the one write engines perform on the run state.
    pub fn publish(&mut self, highlights: Highlights) {
        self.highlights = highlights;
    }

    /// Elapsed active time: wall time since start minus accumulated pauses.
    ///
    /// Terminal phases report the duration frozen at completion or
    /// cancellation; idle reports zero.
    #[must_use]
    pub fn elapsed_active(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Idle => Duration::ZERO,
            Phase::Running => self.running_elapsed(now),
            Phase::Paused => match (self.started_at, self.paused_since) {
                (Some(start), Some(pause)) => pause
                    .saturating_duration_since(start)
                    .saturating_sub(self.paused_total),
                _ => Duration::ZERO,
            },
            Phase::Completed | Phase::Cancelled => self.active_total.unwrap_or(Duration::ZERO),
        }
    }

    fn running_elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(start) => now
                .saturating_duration_since(start)
                .saturating_sub(self.paused_total),
            None => Duration::ZERO,
        }
    }

    // Driver-side transitions. Engines never call these.

    pub(crate) fn begin(&mut self, now: Instant) {
        *self = Self::idle();
        self.phase = Phase::Running;
        self.started_at = Some(now);
    }

    pub(crate) fn pause(&mut self, now: Instant) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            self.paused_since = Some(now);
        }
    }

    pub(crate) fn resume(&mut self, now: Instant) {
        if self.phase == Phase::Paused {
            if let Some(since) = self.paused_since.take() {
                self.paused_total += now.saturating_duration_since(since);
            }
            self.phase = Phase::Running;
        }
    }

    pub(crate) fn complete(&mut self, now: Instant) {
        self.active_total = Some(self.elapsed_active(now));
        self.phase = Phase::Completed;
    }

    pub(crate) fn cancel(&mut self, now: Instant) {
        if self.phase.is_active() {
            self.active_total = Some(self.elapsed_active(now));
            self.phase = Phase::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_pair_collapses_duplicates() {
        assert_eq!(Highlights::pair(4, 4), Highlights::one(4));
        assert_eq!(Highlights::pair(1, 2).as_slice(), &[1, 2]);
        assert_eq!(Highlights::triple(3, 9, 5).as_slice(), &[3, 9, 5]);
        assert!(Highlights::none().is_empty());
        assert!(Highlights::pair(1, 2).contains(2));
        assert!(!Highlights::pair(1, 2).contains(3));
    }

    #[test]
    fn elapsed_excludes_pause_time() {
        let t0 = Instant::now();
        let mut state = RunState::idle();
        state.begin(t0);

        let t1 = t0 + Duration::from_millis(100);
        state.pause(t1);
        assert_eq!(state.phase(), Phase::Paused);
        assert_eq!(state.elapsed_active(t1), Duration::from_millis(100));

        // Time passing while paused does not count.
        let t2 = t0 + Duration::from_millis(500);
        assert_eq!(state.elapsed_active(t2), Duration::from_millis(100));

        state.resume(t2);
        let t3 = t0 + Duration::from_millis(700);
        assert_eq!(state.elapsed_active(t3), Duration::from_millis(300));

        state.complete(t3);
        let t4 = t0 + Duration::from_millis(900);
        assert_eq!(state.elapsed_active(t4), Duration::from_millis(300));
    }

    #[test]
    fn pause_then_resume_without_work_is_lossless() {
        let t0 = Instant::now();
        let mut state = RunState::idle();
        state.begin(t0);
        let before = state.highlights();

        let t1 = t0 + Duration::from_millis(10);
        state.pause(t1);
        state.resume(t1);
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.highlights(), before);
        assert_eq!(state.elapsed_active(t1), Duration::from_millis(10));
    }

    #[test]
    fn cancel_is_terminal_and_freezes_elapsed() {
        let t0 = Instant::now();
        let mut state = RunState::idle();
        state.begin(t0);
        state.cancel(t0 + Duration::from_millis(50));
        assert_eq!(state.phase(), Phase::Cancelled);
        assert!(state.phase().is_terminal());
        assert_eq!(
            state.elapsed_active(t0 + Duration::from_secs(9)),
            Duration::from_millis(50)
        );
    }
}
