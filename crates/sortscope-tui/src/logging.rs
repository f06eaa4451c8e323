#![forbid(unsafe_code)]

//! Tracing initialization.
//!
//! The UI owns the terminal, so log output must not reach stdout/stderr
//! while the alternate screen is active. Logs go to the file named by
//! `SORTSCOPE_LOG`; with the variable unset, tracing stays uninitialized
//! and all macros are no-ops. `RUST_LOG` filters as usual.

use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

pub fn init() {
    let Ok(path) = std::env::var("SORTSCOPE_LOG") else {
        return;
    };
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("sortscope: cannot open log file {path}: {err}");
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}
