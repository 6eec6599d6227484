//! Arc reactor drawing
//!
//! Five concentric rings rotating at their own pace around a pulsing core.
//! Drawn on a braille canvas whose units are single dots, so circles stay
//! round.

use std::f64::consts::{PI, TAU};
use std::time::Duration;

use ratatui::style::Color;
use ratatui::widgets::canvas::{Circle, Context, Points};

use crate::tui::theme::{blend, Theme};

/// How a ring is stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingStyle {
    /// One long arc with a gap
    Solid,
    Dashed,
    Dotted,
    /// Four wide segments
    Segmented,
    /// Two thin concentric circles
    Double,
}

/// One rotating ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Radius as a fraction of the reactor radius
    pub radius: f64,
    pub style: RingStyle,
    /// Seconds per full turn
    pub period: f64,
    pub clockwise: bool,
}

pub const RINGS: [Ring; 5] = [
    Ring {
        radius: 1.0,
        style: RingStyle::Solid,
        period: 50.0,
        clockwise: true,
    },
    Ring {
        radius: 0.84,
        style: RingStyle::Dashed,
        period: 65.0,
        clockwise: false,
    },
    Ring {
        radius: 0.68,
        style: RingStyle::Dotted,
        period: 40.0,
        clockwise: true,
    },
    Ring {
        radius: 0.52,
        style: RingStyle::Segmented,
        period: 30.0,
        clockwise: false,
    },
    Ring {
        radius: 0.38,
        style: RingStyle::Double,
        period: 45.0,
        clockwise: true,
    },
];

/// Core pulse period
const PULSE_PERIOD: f64 = 3.0;

impl Ring {
    /// Rotation in radians after `t`; clockwise turns are negative
    pub fn rotation(&self, t: Duration) -> f64 {
        let turn = (t.as_secs_f64() / self.period).fract() * TAU;
        if self.clockwise {
            -turn
        } else {
            turn
        }
    }

    /// Arcs as (start angle, sweep) pairs before rotation
    fn arcs(&self) -> Vec<(f64, f64)> {
        match self.style {
            RingStyle::Solid => vec![(0.0, TAU * 0.8)],
            RingStyle::Dashed => (0..12).map(|i| (i as f64 * TAU / 12.0, TAU / 24.0)).collect(),
            RingStyle::Segmented => (0..4).map(|i| (i as f64 * PI / 2.0, PI / 3.0)).collect(),
            RingStyle::Dotted | RingStyle::Double => vec![(0.0, TAU)],
        }
    }
}

/// Core brightness between 0.4 and 1.0, peaking every three seconds
pub fn core_pulse(t: Duration) -> f64 {
    let phase = (t.as_secs_f64() / PULSE_PERIOD).fract() * TAU;
    0.7 + 0.3 * phase.cos()
}

/// Sample points along an arc, roughly one per dot
pub fn arc_points(cx: f64, cy: f64, r: f64, start: f64, sweep: f64) -> Vec<(f64, f64)> {
    let steps = (sweep.abs() * r).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| {
            let a = start + sweep * i as f64 / steps as f64;
            (cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

/// Paint the reactor centered at (`cx`, `cy`)
pub fn paint(ctx: &mut Context, cx: f64, cy: f64, radius: f64, t: Duration, opacity: f64) {
    let ring_color = Theme::fade(Theme::SECONDARY, opacity);
    let accent = Theme::fade(Theme::PRIMARY, opacity);

    for ring in RINGS.iter() {
        let r = radius * ring.radius;
        let rotation = ring.rotation(t);
        let color = if ring.style == RingStyle::Solid {
            accent
        } else {
            ring_color
        };

        let mut coords = Vec::new();
        match ring.style {
            RingStyle::Dotted => {
                for i in 0..36 {
                    let a = rotation + i as f64 * TAU / 36.0;
                    coords.push((cx + r * a.cos(), cy + r * a.sin()));
                }
            }
            RingStyle::Double => {
                coords.extend(arc_points(cx, cy, r, rotation, TAU));
                coords.extend(arc_points(cx, cy, r * 0.9, rotation, TAU));
            }
            _ => {
                for (start, sweep) in ring.arcs() {
                    coords.extend(arc_points(cx, cy, r, rotation + start, sweep));
                }
            }
        }
        ctx.draw(&Points {
            coords: &coords,
            color,
        });
    }

    // Core
    let pulse = core_pulse(t);
    let core = blend(Theme::BACKGROUND, Color::White, pulse * opacity);
    ctx.layer();
    for k in 1..=4 {
        ctx.draw(&Circle {
            x: cx,
            y: cy,
            radius: radius * 0.06 * k as f64 * pulse,
            color: if k == 1 { core } else { accent },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_alternate_direction() {
        for pair in RINGS.windows(2) {
            assert_ne!(pair[0].clockwise, pair[1].clockwise);
        }
        let periods: Vec<f64> = RINGS.iter().map(|r| r.period).collect();
        assert_eq!(periods, vec![50.0, 65.0, 40.0, 30.0, 45.0]);
    }

    #[test]
    fn test_rotation_wraps_each_period() {
        let ring = RINGS[3];
        let quarter = ring.rotation(Duration::from_secs_f64(7.5));
        assert!((quarter - PI / 2.0).abs() < 1e-9);
        assert!(ring.rotation(Duration::from_secs(30)).abs() < 1e-9);
        assert!(RINGS[0].rotation(Duration::from_secs(10)) < 0.0);
    }

    #[test]
    fn test_core_pulse_period() {
        assert!((core_pulse(Duration::ZERO) - 1.0).abs() < 1e-9);
        assert!((core_pulse(Duration::from_millis(1500)) - 0.4).abs() < 1e-9);
        assert!((core_pulse(Duration::from_secs(3)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_arc_points_span() {
        let points = arc_points(0.0, 0.0, 10.0, 0.0, PI);
        let (x0, y0) = points[0];
        let (x1, y1) = points[points.len() - 1];
        assert!((x0 - 10.0).abs() < 1e-9 && y0.abs() < 1e-9);
        assert!((x1 + 10.0).abs() < 1e-9 && y1.abs() < 1e-9);
    }
}
