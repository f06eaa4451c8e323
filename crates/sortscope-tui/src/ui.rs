#![forbid(unsafe_code)]

//! Frame rendering.
//!
//! Full-overwrite drawing: every visible row is written padded to the
//! terminal width each frame, so no clear is needed and nothing from the
//! previous frame survives. Bars use the eighth-block glyph ramp for
//! fractional caps.

use std::io::{self, Write};
use std::time::Instant;

use crossterm::cursor::MoveTo;
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::queue;
use sortscope_core::{Algorithm, Phase, Snapshot};
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::config::MAX_CONSOLE_LINES;
use crate::theme;

/// Bar glyphs from empty to full, in eighths.
const BAR_CHARS: [char; 9] = [' ', '\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}'];

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 26;

/// Fixed rows above the bar panel.
const HEADER_ROW: u16 = 0;
const ARRAY_ROW: u16 = 2;
const ALGO_ROW: u16 = 4;
const CONTROLS_ROW: u16 = 8;
const BARS_TOP: u16 = 10;

pub fn draw(out: &mut impl Write, app: &App, now: Instant, width: u16, height: u16) -> io::Result<()> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return draw_too_small(out, width, height);
    }
    let snapshot = app.driver.snapshot(now);
    let w = width as usize;

    draw_header(out, w)?;
    draw_blank_row(out, 1, w)?;
    draw_array_line(out, w, &snapshot)?;
    draw_blank_row(out, 3, w)?;
    draw_algorithms(out, w, app)?;
    draw_blank_row(out, 7, w)?;
    draw_controls(out, w)?;
    draw_blank_row(out, 9, w)?;

    // Remaining vertical space: bars, one spacer, console, status.
    let console_top = height - 1 - MAX_CONSOLE_LINES as u16;
    let bars_height = console_top - 1 - BARS_TOP;
    draw_bars(out, w, BARS_TOP, bars_height, &snapshot)?;
    draw_blank_row(out, console_top - 1, w)?;
    draw_console(out, w, console_top, app)?;
    draw_status(out, w, height - 1, app, &snapshot)?;

    out.flush()
}

fn draw_too_small(out: &mut impl Write, width: u16, height: u16) -> io::Result<()> {
    queue!(
        out,
        ResetColor,
        MoveTo(0, 0),
        Print(pad_to(
            &format!("terminal too small ({width}x{height}, need {MIN_WIDTH}x{MIN_HEIGHT})"),
            width as usize
        ))
    )?;
    out.flush()
}

fn draw_blank_row(out: &mut impl Write, row: u16, w: usize) -> io::Result<()> {
    queue!(out, ResetColor, MoveTo(0, row), Print(" ".repeat(w)))
}

fn draw_header(out: &mut impl Write, w: usize) -> io::Result<()> {
    let title = "sortscope :: algorithm sorting visualizer";
    let pad_left = w.saturating_sub(title.width()) / 2;
    let mut line = " ".repeat(pad_left);
    line.push_str(title);
    queue!(
        out,
        MoveTo(0, HEADER_ROW),
        SetBackgroundColor(theme::HEADER_BG),
        SetForegroundColor(theme::HEADER_FG),
        Print(pad_to(&line, w)),
        ResetColor
    )
}

fn draw_array_line(out: &mut impl Write, w: usize, snapshot: &Snapshot<'_>) -> io::Result<()> {
    let line = format!(
        " Array ({} elements): {:?}",
        snapshot.data.len(),
        snapshot.data
    );
    queue!(
        out,
        MoveTo(0, ARRAY_ROW),
        SetForegroundColor(theme::TEXT),
        Print(pad_to(&truncate_to_width(&line, w), w)),
        ResetColor
    )
}

fn draw_algorithms(out: &mut impl Write, w: usize, app: &App) -> io::Result<()> {
    let col_w = (w - 2) / 3;
    for row in 0..3u16 {
        queue!(out, MoveTo(0, ALGO_ROW + row), ResetColor, Print("  "))?;
        let mut written = 2usize;
        for col in 0..3usize {
            let index = row as usize * 3 + col;
            let algorithm = Algorithm::ALL[index];
            let selected = index == app.selected;
            let marker = if selected { "(*)" } else { "( )" };
            let entry = format!("{marker} {}. {}", index + 1, algorithm.label());
            let color = if selected { theme::ACCENT } else { theme::TEXT_DIM };
            queue!(
                out,
                SetForegroundColor(color),
                Print(pad_to(&truncate_to_width(&entry, col_w), col_w))
            )?;
            written += col_w;
        }
        queue!(out, ResetColor, Print(" ".repeat(w.saturating_sub(written))))?;
    }
    Ok(())
}

fn draw_controls(out: &mut impl Write, w: usize) -> io::Result<()> {
    let line = " [s]tart  [space] pause/resume  [r]eset  [c]ancel  [n]ew array  [+/-] size  [[/]] speed  [q]uit";
    queue!(
        out,
        MoveTo(0, CONTROLS_ROW),
        SetForegroundColor(theme::TEXT_DIM),
        Print(pad_to(&truncate_to_width(line, w), w)),
        ResetColor
    )
}

fn draw_bars(
    out: &mut impl Write,
    w: usize,
    top: u16,
    height: u16,
    snapshot: &Snapshot<'_>,
) -> io::Result<()> {
    let n = snapshot.data.len();
    if n == 0 {
        for row in 0..height {
            draw_blank_row(out, top + row, w)?;
        }
        return Ok(());
    }

    let panel_w = w.saturating_sub(2);
    let (bar_w, gap) = bar_layout(n, panel_w);
    let total_w = n * bar_w + (n - 1) * gap;
    let x0 = 1 + panel_w.saturating_sub(total_w) / 2;
    let eighths = bar_eighths(snapshot.data, height as usize);
    let active = snapshot.phase.is_active();

    for row in 0..height {
        // Rows are drawn top-down; `from_bottom` indexes cells bottom-up.
        let from_bottom = (height - 1 - row) as u32;
        queue!(out, MoveTo(0, top + row), ResetColor, Print(" ".repeat(x0)))?;
        let mut written = x0;
        for (i, &h8) in eighths.iter().enumerate() {
            let full = h8 / 8;
            let frac = (h8 % 8) as usize;
            let glyph = if from_bottom < full {
                BAR_CHARS[8]
            } else if from_bottom == full && frac > 0 {
                BAR_CHARS[frac]
            } else {
                ' '
            };
            let color = if active && snapshot.highlights.contains(i) {
                theme::BAR_ACTIVE
            } else {
                theme::BAR
            };
            let mut cell = glyph.to_string().repeat(bar_w);
            if i + 1 < n {
                cell.push_str(&" ".repeat(gap));
            }
            queue!(out, SetForegroundColor(color), Print(&cell))?;
            written += cell.chars().count();
        }
        queue!(out, ResetColor, Print(" ".repeat(w.saturating_sub(written))))?;
    }
    Ok(())
}

fn draw_console(out: &mut impl Write, w: usize, top: u16, app: &App) -> io::Result<()> {
    let lines: Vec<&str> = app.console_lines().collect();
    for row in 0..MAX_CONSOLE_LINES {
        let text = lines.get(row).copied().unwrap_or("");
        let mut line = String::from(" ");
        line.push_str(text);
        queue!(
            out,
            MoveTo(0, top + row as u16),
            SetBackgroundColor(theme::CONSOLE_BG),
            SetForegroundColor(theme::CONSOLE_FG),
            Print(pad_to(&truncate_to_width(&line, w), w)),
            ResetColor
        )?;
    }
    Ok(())
}

fn draw_status(
    out: &mut impl Write,
    w: usize,
    row: u16,
    app: &App,
    snapshot: &Snapshot<'_>,
) -> io::Result<()> {
    let phase = match snapshot.phase {
        Phase::Idle => "idle",
        Phase::Running => "running",
        Phase::Paused => "paused",
        Phase::Completed => "completed",
        Phase::Cancelled => "cancelled",
    };
    let line = format!(
        " {phase} | {} | elapsed {:.2}s | step {}ms",
        app.algorithm().label(),
        snapshot.elapsed_active.as_secs_f64(),
        app.driver.step_interval().as_millis()
    );
    queue!(
        out,
        MoveTo(0, row),
        SetForegroundColor(theme::TEXT_DIM),
        Print(pad_to(&truncate_to_width(&line, w), w)),
        ResetColor
    )
}

/// Bar width and gap for `n` bars in `panel_w` columns.
fn bar_layout(n: usize, panel_w: usize) -> (usize, usize) {
    debug_assert!(n > 0);
    let gap = if n * 2 - 1 <= panel_w { 1 } else { 0 };
    let bar_w = panel_w.saturating_sub(gap * (n - 1)) / n;
    (bar_w.max(1), gap)
}

/// Bar heights in eighth-cells, scaled so the maximum value fills the panel.
///
/// Non-positive values produce zero-height bars; the visualizer only feeds
/// positive data, so this is a display clamp, not a correctness concern.
fn bar_eighths(values: &[i64], panel_h: usize) -> Vec<u32> {
    let max = values.iter().copied().max().unwrap_or(1).max(1);
    values
        .iter()
        .map(|&v| {
            let v = v.max(0) as u128;
            ((v * panel_h as u128 * 8) / max as u128) as u32
        })
        .collect()
}

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if used + cw > max.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += cw;
    }
    out.push('\u{2026}');
    out
}

/// Pad with spaces to an exact display width.
fn pad_to(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    let w = out.width();
    if w < width {
        out.push_str(&" ".repeat(width - w));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_layout_fits_the_panel() {
        for n in 1..=50 {
            for panel_w in 10..=200 {
                let (bar_w, gap) = bar_layout(n, panel_w);
                assert!(bar_w >= 1);
                if n * 2 - 1 <= panel_w {
                    assert!(n * bar_w + (n - 1) * gap <= panel_w, "n={n} w={panel_w}");
                }
            }
        }
    }

    #[test]
    fn bar_eighths_scales_the_maximum_to_full_height() {
        let heights = bar_eighths(&[10, 50, 100], 10);
        assert_eq!(heights[2], 80);
        assert_eq!(heights[1], 40);
        assert_eq!(heights[0], 8);
    }

    #[test]
    fn bar_eighths_clamps_non_positive_values() {
        let heights = bar_eighths(&[-5, 0, 10], 4);
        assert_eq!(heights[0], 0);
        assert_eq!(heights[1], 0);
        assert_eq!(heights[2], 32);
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a very long console message", 10);
        assert!(cut.width() <= 10);
        assert!(cut.ends_with('\u{2026}'));
    }

    #[test]
    fn padding_reaches_the_exact_width() {
        assert_eq!(pad_to("ab", 5), "ab   ");
        assert_eq!(pad_to("abcde", 5), "abcde");
    }
}
