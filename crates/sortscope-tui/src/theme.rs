#![forbid(unsafe_code)]

//! Color palette for the terminal front end.

use crossterm::style::Color;

pub const HEADER_BG: Color = Color::Rgb {
    r: 100,
    g: 149,
    b: 237,
};
pub const HEADER_FG: Color = Color::White;

/// Bars at rest and after completion.
pub const BAR: Color = Color::Rgb {
    r: 50,
    g: 205,
    b: 50,
};
/// Bars touched by the most recent step.
pub const BAR_ACTIVE: Color = Color::Rgb {
    r: 220,
    g: 20,
    b: 60,
};

pub const TEXT: Color = Color::Rgb {
    r: 220,
    g: 220,
    b: 220,
};
pub const TEXT_DIM: Color = Color::Rgb {
    r: 140,
    g: 140,
    b: 140,
};
pub const ACCENT: Color = Color::Rgb {
    r: 255,
    g: 165,
    b: 0,
};

pub const CONSOLE_FG: Color = Color::Rgb { r: 0, g: 255, b: 0 };
pub const CONSOLE_BG: Color = Color::Rgb {
    r: 40,
    g: 40,
    b: 40,
};
