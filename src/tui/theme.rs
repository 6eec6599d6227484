//! TUI theme and styles
//!
//! Holographic cyan on deep navy.

use ratatui::style::{Color, Modifier, Style};

/// Application color theme
pub struct Theme;

impl Theme {
    /// Primary accent (#00fff7)
    pub const PRIMARY: Color = Color::Rgb(0, 255, 247);

    /// Secondary accent used for rings and borders
    pub const SECONDARY: Color = Color::Rgb(0, 170, 200);

    /// Screen background (#010c1b)
    pub const BACKGROUND: Color = Color::Rgb(1, 12, 27);

    /// Panel background
    pub const PANEL: Color = Color::Rgb(0, 20, 40);

    /// Error color
    pub const ERROR: Color = Color::Rgb(255, 77, 77);

    /// Warning color
    pub const WARNING: Color = Color::Yellow;

    /// Muted text color
    pub const MUTED: Color = Color::Rgb(70, 110, 130);

    pub const FLASH: Color = Color::White;

    /// Header style
    pub fn header() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BACKGROUND)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default().bg(Self::PRIMARY).fg(Self::BACKGROUND)
    }

    /// Normal text style
    pub fn normal() -> Style {
        Style::default().fg(Self::PRIMARY).bg(Self::BACKGROUND)
    }

    /// Muted text style
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// `color` faded toward the background; `opacity` 1.0 keeps it unchanged
    pub fn fade(color: Color, opacity: f64) -> Color {
        blend(Self::BACKGROUND, color, opacity)
    }
}

/// Linear mix of two RGB colors; `t` 0.0 gives `from`, 1.0 gives `to`.
/// Non-RGB colors are returned unmixed.
pub fn blend(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (rgb(from), rgb(to)) {
        (Some((r1, g1, b1)), Some((r2, g2, b2))) => {
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        Color::White => Some((255, 255, 255)),
        Color::Black => Some((0, 0, 0)),
        _ => None,
    }
}
