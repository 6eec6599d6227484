//! Warp-tunnel transition

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};

use crate::anim::tunnel::Streak;
use crate::anim::TunnelTransition;
use crate::tui::screens::dot_bounds;
use crate::tui::theme::{blend, Theme};

/// Wrap distance of the streaks, in the units of their speeds and lengths
pub const TUNNEL_EXTENT: f64 = 460.0;

pub fn render(frame: &mut Frame, area: Rect, tunnel: &TunnelTransition) {
    let (x_bounds, y_bounds) = dot_bounds(area);
    let scale = x_bounds[1].hypot(y_bounds[1]) / TUNNEL_EXTENT;

    let layer = tunnel.layer_opacity();
    let flash = tunnel.flash() * layer;
    let background = blend(Theme::BACKGROUND, Theme::FLASH, flash);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(background)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for streak in tunnel.streaks() {
                // Wider streaks are brighter
                let brightness = (streak.width / 30.0).clamp(0.3, 1.0) * layer;
                let color = blend(background, Theme::PRIMARY, brightness);
                let ((x1, y1), (x2, y2)) = streak_segment(streak, scale);
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                });
            }
        });
    frame.render_widget(canvas, area);
}

/// Tail and head of a streak in canvas units
pub fn streak_segment(streak: &Streak, scale: f64) -> ((f64, f64), (f64, f64)) {
    let (sin, cos) = streak.angle.sin_cos();
    let tail = streak.dist * scale;
    let head = (streak.dist + streak.length) * scale;
    ((cos * tail, sin * tail), (cos * head, sin * head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_streak_segment_points_outward() {
        let streak = Streak {
            angle: FRAC_PI_2,
            dist: 10.0,
            speed: 6.0,
            length: 200.0,
            width: 10.0,
        };
        let ((x1, y1), (x2, y2)) = streak_segment(&streak, 0.5);
        assert!(x1.abs() < 1e-9 && x2.abs() < 1e-9);
        assert!((y1 - 5.0).abs() < 1e-9);
        assert!((y2 - 105.0).abs() < 1e-9);
    }
}
