#![forbid(unsafe_code)]

//! sortscope binary entry point: session setup and the event/tick loop.

mod app;
mod config;
mod logging;
mod terminal;
mod theme;
mod ui;

use std::io;
use std::time::Instant;

use crossterm::event::{Event, KeyEventKind};

use crate::app::{App, Cmd, Msg};
use crate::config::{FRAME_INTERVAL, POLL_INTERVAL};
use crate::terminal::Session;

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("sortscope error: {err}");
        std::process::exit(1);
    }
}

fn run() -> io::Result<()> {
    let mut app = App::new();
    let session = Session::new()?;
    let mut out = io::stdout();
    let mut last_frame: Option<Instant> = None;

    loop {
        if session.poll_event(POLL_INTERVAL)? {
            match session.read_event()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if app.update(Msg::Key(key), Instant::now()) == Cmd::Quit {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // The next frame reads the new size; nothing to do here.
                }
                _ => {}
            }
        }

        let now = Instant::now();
        app.update(Msg::Tick, now);

        let frame_due = last_frame.is_none_or(|t| now.duration_since(t) >= FRAME_INTERVAL);
        if frame_due {
            let (width, height) = session.size()?;
            ui::draw(&mut out, &app, now, width, height)?;
            last_frame = Some(now);
        }
    }

    drop(session);
    Ok(())
}
