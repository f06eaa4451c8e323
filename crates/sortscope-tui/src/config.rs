#![forbid(unsafe_code)]

//! Tunables for the terminal front end.

use std::time::Duration;

/// Bounds on the generated array size; values outside are rejected here and
/// never reach the core.
pub const MIN_ARRAY_SIZE: usize = 5;
pub const MAX_ARRAY_SIZE: usize = 50;
pub const DEFAULT_ARRAY_SIZE: usize = 10;

/// Value range of generated elements.
pub const MIN_VALUE: i64 = 10;
pub const MAX_VALUE: i64 = 100;

/// Step-interval bounds reachable with the speed keys.
pub const MIN_STEP_INTERVAL: Duration = Duration::from_millis(1);
pub const MAX_STEP_INTERVAL: Duration = Duration::from_millis(500);
/// Speed-key increment.
pub const STEP_INTERVAL_DELTA: Duration = Duration::from_millis(5);

/// Console panel keeps this many lines of history.
pub const MAX_CONSOLE_LINES: usize = 8;

/// Render cadence (the event-poll timeout is derived from it).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const POLL_INTERVAL: Duration = Duration::from_millis(4);
