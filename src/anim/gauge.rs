//! Wind gauge needle animation
//!
//! The needle sweeps to full scale, back to zero, holds, then settles on the
//! measured value. Each leg is eased with ease-in-out-quad.

use std::time::Duration;

/// Full scale of the dial in km/h
pub const GAUGE_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Leg {
    target: f64,
    duration: Duration,
    hold_after: Duration,
}

/// Animated needle value
#[derive(Debug, Clone)]
pub struct WindGauge {
    legs: Vec<Leg>,
    leg_index: usize,
    leg_elapsed: Duration,
    value: f64,
    start_value: f64,
}

impl WindGauge {
    /// Build the sweep sequence ending on `wind_speed`
    pub fn new(wind_speed: f64) -> Self {
        let sweep = Duration::from_millis(2000);
        let legs = vec![
            Leg {
                target: GAUGE_MAX,
                duration: sweep,
                hold_after: Duration::ZERO,
            },
            Leg {
                target: 0.0,
                duration: sweep,
                hold_after: Duration::from_millis(1500),
            },
            Leg {
                target: wind_speed.clamp(0.0, GAUGE_MAX),
                duration: sweep,
                hold_after: Duration::ZERO,
            },
        ];
        Self {
            legs,
            leg_index: 0,
            leg_elapsed: Duration::ZERO,
            value: 0.0,
            start_value: 0.0,
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        let mut budget = dt;
        while let Some(leg) = self.legs.get(self.leg_index).copied() {
            let leg_total = leg.duration + leg.hold_after;
            let remaining = leg_total.saturating_sub(self.leg_elapsed);
            if budget < remaining {
                self.leg_elapsed += budget;
                let t = if leg.duration.is_zero() {
                    1.0
                } else {
                    (self.leg_elapsed.as_secs_f64() / leg.duration.as_secs_f64()).min(1.0)
                };
                self.value = self.start_value + (leg.target - self.start_value) * ease_in_out_quad(t);
                return;
            }
            budget -= remaining;
            self.value = leg.target;
            self.start_value = leg.target;
            self.leg_index += 1;
            self.leg_elapsed = Duration::ZERO;
        }
    }

    /// Current needle value in km/h
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.leg_index >= self.legs.len()
    }

    /// Needle angle in degrees: -180 at zero, 0 at full scale
    pub fn angle_degrees(&self) -> f64 {
        self.value / GAUGE_MAX * 180.0 - 180.0
    }
}

pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}
