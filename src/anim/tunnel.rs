//! Warp-tunnel transition
//!
//! A canned animation of radial streaks with a white flash near the end.
//! After the animation window a fade-out runs, then completion is reported
//! once.

use std::f64::consts::TAU;
use std::time::Duration;

/// Number of radial streaks
pub const STREAK_COUNT: usize = 80;

/// Timing of the tunnel transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunnelTiming {
    /// Flash ramps up from this point
    pub flash_start: Duration,
    /// Length of each flash ramp (up, then down)
    pub flash_ramp: Duration,
    /// Length of the streak animation
    pub animation: Duration,
    /// Fade-out after the animation, before completion
    pub fade: Duration,
}

impl Default for TunnelTiming {
    fn default() -> Self {
        Self {
            flash_start: Duration::from_millis(2500),
            flash_ramp: Duration::from_millis(500),
            animation: Duration::from_millis(3800),
            fade: Duration::from_millis(1200),
        }
    }
}

/// Events produced while advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelEvent {
    FadeOut,
    Completed,
}

/// One radial streak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Streak {
    /// Direction in radians
    pub angle: f64,
    /// Distance of the tail from the center
    pub dist: f64,
    /// Distance travelled per 16 ms frame
    pub speed: f64,
    pub length: f64,
    pub width: f64,
}

/// Tunnel transition state
#[derive(Debug, Clone)]
pub struct TunnelTransition {
    timing: TunnelTiming,
    elapsed: Duration,
    streaks: Vec<Streak>,
    fading: bool,
    completed: bool,
    cancelled: bool,
}

impl TunnelTransition {
    pub fn new(timing: TunnelTiming) -> Self {
        let streaks = (0..STREAK_COUNT)
            .map(|i| Streak {
                angle: i as f64 / STREAK_COUNT as f64 * TAU,
                dist: 0.0,
                speed: 6.0 + spread(i, 7) * 4.0,
                length: 200.0,
                width: 10.0 + spread(i, 13) * 20.0,
            })
            .collect();

        Self {
            timing,
            elapsed: Duration::ZERO,
            streaks,
            fading: false,
            completed: false,
            cancelled: false,
        }
    }

    /// Advance by `dt`. Streaks wrap once their tail passes `max_dist`.
    pub fn advance(&mut self, dt: Duration, max_dist: f64) -> Vec<TunnelEvent> {
        let mut events = Vec::new();
        if self.completed || self.cancelled {
            return events;
        }

        let before = self.elapsed;
        self.elapsed = self.elapsed.saturating_add(dt);

        let animated = self.elapsed.min(self.timing.animation) - before.min(self.timing.animation);
        let frames = animated.as_secs_f64() / 0.016;
        for streak in &mut self.streaks {
            streak.dist += streak.speed * frames;
            if max_dist > 0.0 && streak.dist > max_dist {
                streak.dist %= max_dist;
            }
        }

        if !self.fading && self.elapsed >= self.timing.animation {
            self.fading = true;
            events.push(TunnelEvent::FadeOut);
        }
        if self.fading && self.elapsed >= self.timing.animation + self.timing.fade {
            self.completed = true;
            events.push(TunnelEvent::Completed);
        }
        events
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// White flash opacity at the current time
    pub fn flash(&self) -> f64 {
        flash_opacity(self.elapsed, &self.timing)
    }

    /// Opacity of the whole transition layer (1.0 until the fade starts)
    pub fn layer_opacity(&self) -> f64 {
        if !self.fading {
            return 1.0;
        }
        let into_fade = self.elapsed.saturating_sub(self.timing.animation);
        1.0 - (into_fade.as_secs_f64() / self.timing.fade.as_secs_f64()).min(1.0)
    }

    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Flash opacity as a function of elapsed time: 0, ramp up, ramp down, 0
pub fn flash_opacity(t: Duration, timing: &TunnelTiming) -> f64 {
    let start = timing.flash_start;
    let ramp = timing.flash_ramp;
    if ramp.is_zero() || t <= start {
        return 0.0;
    }
    let peak = start + ramp;
    let end = peak + ramp;
    let ramp_secs = ramp.as_secs_f64();
    if t < peak {
        (t - start).as_secs_f64() / ramp_secs
    } else if t < end {
        1.0 - (t - peak).as_secs_f64() / ramp_secs
    } else {
        0.0
    }
}

/// Deterministic 0.0–1.0 spread so streaks differ without an RNG
fn spread(i: usize, salt: usize) -> f64 {
    ((i * 37 + salt * 11) % 101) as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_flash_curve() {
        let timing = TunnelTiming::default();
        assert_eq!(flash_opacity(ms(0), &timing), 0.0);
        assert_eq!(flash_opacity(ms(2500), &timing), 0.0);
        assert!((flash_opacity(ms(2750), &timing) - 0.5).abs() < 1e-9);
        assert!((flash_opacity(ms(3000), &timing) - 1.0).abs() < 1e-9);
        assert!((flash_opacity(ms(3250), &timing) - 0.5).abs() < 1e-9);
        assert_eq!(flash_opacity(ms(3500), &timing), 0.0);
        assert_eq!(flash_opacity(ms(3799), &timing), 0.0);
    }

    #[test]
    fn test_flash_back_to_zero_before_animation_end() {
        let timing = TunnelTiming::default();
        let end = timing.flash_start + timing.flash_ramp * 2;
        assert!(end < timing.animation);
    }

    #[test]
    fn test_fade_and_completion() {
        let mut tunnel = TunnelTransition::new(TunnelTiming::default());
        assert_eq!(tunnel.flash(), 0.0);
        assert!(tunnel.advance(ms(3799), 500.0).is_empty());
        assert_eq!(tunnel.layer_opacity(), 1.0);

        assert_eq!(tunnel.advance(ms(1), 500.0), vec![TunnelEvent::FadeOut]);
        tunnel.advance(ms(600), 500.0);
        assert!((tunnel.layer_opacity() - 0.5).abs() < 1e-9);

        assert_eq!(tunnel.advance(ms(600), 500.0), vec![TunnelEvent::Completed]);
        assert!(tunnel.advance(ms(5000), 500.0).is_empty());
        assert!(tunnel.is_completed());
    }

    #[test]
    fn test_single_large_step_emits_both_events() {
        let mut tunnel = TunnelTransition::new(TunnelTiming::default());
        assert_eq!(
            tunnel.advance(ms(10_000), 500.0),
            vec![TunnelEvent::FadeOut, TunnelEvent::Completed]
        );
    }

    #[test]
    fn test_cancelled_tunnel_is_silent() {
        let mut tunnel = TunnelTransition::new(TunnelTiming::default());
        tunnel.advance(ms(100), 500.0);
        tunnel.cancel();
        assert!(tunnel.advance(ms(10_000), 500.0).is_empty());
        assert!(!tunnel.is_completed());
    }

    #[test]
    fn test_streaks_move_and_wrap() {
        let mut tunnel = TunnelTransition::new(TunnelTiming::default());
        assert_eq!(tunnel.streaks().len(), STREAK_COUNT);
        tunnel.advance(ms(160), 10_000.0);
        assert!(tunnel.streaks().iter().all(|s| s.dist > 0.0));

        tunnel.advance(ms(3000), 100.0);
        assert!(tunnel.streaks().iter().all(|s| s.dist <= 100.0));
    }
}
