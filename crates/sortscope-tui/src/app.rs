#![forbid(unsafe_code)]

//! Application model: state transitions for key and tick messages.
//!
//! The model owns the [`Driver`] and a console transcript; the view in
//! `ui.rs` renders a snapshot of both. Everything here is pure state
//! manipulation so it is unit-testable without a terminal.

use std::collections::VecDeque;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use sortscope_core::{Algorithm, Driver, Phase};
use tracing::debug;

use crate::config::{
    DEFAULT_ARRAY_SIZE, MAX_ARRAY_SIZE, MAX_CONSOLE_LINES, MAX_STEP_INTERVAL, MIN_ARRAY_SIZE,
    MIN_STEP_INTERVAL, MIN_VALUE, MAX_VALUE, STEP_INTERVAL_DELTA,
};

/// Messages driving the model.
pub enum Msg {
    Key(KeyEvent),
    Tick,
}

/// Side effect requested by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    None,
    Quit,
}

pub struct App {
    pub driver: Driver,
    /// Index into [`Algorithm::ALL`].
    pub selected: usize,
    pub array_size: usize,
    console: VecDeque<String>,
    last_phase: Phase,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        let array = generate_array(DEFAULT_ARRAY_SIZE);
        let mut app = Self {
            driver: Driver::new(array),
            selected: 0,
            array_size: DEFAULT_ARRAY_SIZE,
            console: VecDeque::new(),
            last_phase: Phase::Idle,
        };
        app.push_banner();
        app
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::ALL[self.selected]
    }

    #[must_use]
    pub fn console_lines(&self) -> impl Iterator<Item = &str> {
        self.console.iter().map(String::as_str)
    }

    pub fn update(&mut self, msg: Msg, now: Instant) -> Cmd {
        match msg {
            Msg::Key(key) => self.on_key(key, now),
            Msg::Tick => {
                self.on_tick(now);
                Cmd::None
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) -> Cmd {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Cmd::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Cmd::Quit,
            KeyCode::Char('s') | KeyCode::Enter => self.start_run(now),
            KeyCode::Char(' ') | KeyCode::Char('p') => self.toggle_pause(now),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('c') => self.cancel(now),
            KeyCode::Char('n') => self.regenerate(),
            KeyCode::Left => self.select_offset(-1),
            KeyCode::Right => self.select_offset(1),
            KeyCode::Char(c @ '1'..='9') => {
                self.select_index(c as usize - '1' as usize);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.resize_array(1),
            KeyCode::Char('-') => self.resize_array(-1),
            KeyCode::Char('[') => self.adjust_speed(-1),
            KeyCode::Char(']') => self.adjust_speed(1),
            _ => {}
        }
        Cmd::None
    }

    fn on_tick(&mut self, now: Instant) {
        self.driver.maybe_step(now);
        let phase = self.driver.phase();
        if phase == Phase::Completed && self.last_phase != Phase::Completed {
            let elapsed = self.driver.snapshot(now).elapsed_active;
            self.push_console(format!(
                "sortscope$ [{}] sort took {:.2} seconds to complete",
                self.algorithm().short_label(),
                elapsed.as_secs_f64()
            ));
            self.push_console(format!(
                "sortscope$ Sorted array: {:?}",
                self.driver.data()
            ));
            self.push_console("sortscope$ cleaning up...".to_string());
        }
        self.last_phase = phase;
    }

    fn start_run(&mut self, now: Instant) {
        match self.driver.start(self.algorithm(), now) {
            Ok(()) => self.push_console("sortscope$ visualizing...".to_string()),
            Err(err) => {
                debug!(%err, "start rejected");
                self.push_console(format!("sortscope$ {err}"));
            }
        }
    }

    fn toggle_pause(&mut self, now: Instant) {
        match self.driver.phase() {
            Phase::Running => self.driver.pause(now),
            Phase::Paused => self.driver.resume(now),
            _ => {}
        }
    }

    fn reset(&mut self) {
        if self.driver.phase() == Phase::Idle {
            return;
        }
        self.driver.reset();
        self.console.clear();
        self.push_banner();
    }

    fn cancel(&mut self, now: Instant) {
        if self.driver.phase().is_active() {
            self.driver.cancel(now);
            self.push_console("sortscope$ run cancelled".to_string());
        }
    }

    fn regenerate(&mut self) {
        let array = generate_array(self.array_size);
        match self.driver.load(array) {
            Ok(()) => {
                self.console.clear();
                self.push_banner();
            }
            Err(err) => self.push_console(format!("sortscope$ {err}")),
        }
    }

    fn select_offset(&mut self, delta: isize) {
        let count = Algorithm::ALL.len() as isize;
        let next = (self.selected as isize + delta).rem_euclid(count) as usize;
        self.select_index(next);
    }

    fn select_index(&mut self, index: usize) {
        if index >= Algorithm::ALL.len() || self.driver.phase().is_active() {
            return;
        }
        if self.selected != index {
            self.selected = index;
            // A fresh banner mirrors the selection, as long as no run has
            // already written results to the console.
            if !self.driver.phase().is_terminal() {
                self.console.clear();
                self.push_banner();
            }
        }
    }

    fn resize_array(&mut self, delta: isize) {
        if self.driver.phase().is_active() {
            return;
        }
        let next = self.array_size.saturating_add_signed(delta);
        // Out-of-range sizes are rejected here; the core never sees them.
        if !(MIN_ARRAY_SIZE..=MAX_ARRAY_SIZE).contains(&next) {
            return;
        }
        self.array_size = next;
        self.regenerate();
    }

    fn adjust_speed(&mut self, direction: i32) {
        let current = self.driver.step_interval();
        let next = if direction < 0 {
            current.saturating_sub(STEP_INTERVAL_DELTA)
        } else {
            current.saturating_add(STEP_INTERVAL_DELTA)
        };
        self.driver
            .set_step_interval(next.clamp(MIN_STEP_INTERVAL, MAX_STEP_INTERVAL));
    }

    fn push_banner(&mut self) {
        let label = self.algorithm().short_label();
        self.push_console(format!("sortscope$ running [{label}] sort..."));
        self.push_console(format!(
            "sortscope$ utilizing array of size {}",
            self.driver.data().len()
        ));
        self.push_console(format!(
            "sortscope$ Original array: {:?}",
            self.driver.data()
        ));
    }

    fn push_console(&mut self, line: String) {
        self.console.push_back(line);
        while self.console.len() > MAX_CONSOLE_LINES {
            self.console.pop_front();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_array(size: usize) -> Vec<i64> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE)).collect()
}
