#![forbid(unsafe_code)]

//! Core: step-wise sorting engines and the run driver.
//!
//! Everything here is terminal-agnostic. The engines turn eager, recursive
//! sorting algorithms into suspendable state machines that mutate a shared
//! working array one observable step at a time; the [`driver::Driver`]
//! resumes the active engine on an external cadence and mediates pause,
//! resume, reset, and cancel. Rendering lives in the `sortscope-tui` crate
//! and only ever sees [`driver::Snapshot`] values.

pub mod driver;
pub mod engine;
pub mod engines;
pub mod state;

pub use driver::{AlreadyActive, DEFAULT_STEP_INTERVAL, Driver, Snapshot};
pub use engine::{Algorithm, StepEngine, StepOutcome, Value};
pub use state::{Highlights, Phase, RunState};
