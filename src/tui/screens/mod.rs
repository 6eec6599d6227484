//! TUI screens
//!
//! One module per router screen, plus the shared reactor painter.

pub mod authorization;
pub mod boot;
pub mod detail;
pub mod idle;
pub mod login;
pub mod reactor;
pub mod tunnel;

use ratatui::layout::Rect;

/// Canvas bounds for `area` where one unit is one braille dot.
/// Dots are close to square, so circles drawn in these units stay round.
pub fn dot_bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let half_width = area.width as f64;
    let half_height = area.height as f64 * 2.0;
    ([-half_width, half_width], [-half_height, half_height])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_bounds() {
        let (x, y) = dot_bounds(Rect::new(0, 0, 80, 24));
        assert_eq!(x, [-80.0, 80.0]);
        assert_eq!(y, [-48.0, 48.0]);
    }
}
