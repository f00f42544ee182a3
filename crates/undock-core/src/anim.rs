//! Frame-sampled property animations: easing curves, transitions, tweens.
//!
//! Animations here are plain values owned by whatever they animate. Starting
//! one records an `Instant`; each frame the owner samples it with the current
//! time. Nothing holds callbacks or references back into the owner, so
//! dropping the owner drops its animations with it.

use kurbo::Point;
use std::time::{Duration, Instant};

/// Easing curve applied to a transition's raw progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Sine deceleration.
    OutSine,
    /// Cubic deceleration, the default for slide and reflow motion.
    #[default]
    OutCubic,
    /// Quartic deceleration.
    OutQuart,
    /// Circular deceleration.
    OutCirc,
    /// Overshooting bounce, used by the switch knob snap.
    OutBounce,
}

impl Easing {
    /// Map raw progress `t` in `[0, 1]` through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::OutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Easing::OutBounce => out_bounce(t),
        }
    }
}

fn out_bounce(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Linear interpolation between two scalars.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear interpolation between two points.
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Clock for a single animation run.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl Transition {
    /// Start a transition at `now`.
    pub fn new(duration: Duration, easing: Easing, now: Instant) -> Self {
        Self {
            started: now,
            duration,
            easing,
        }
    }

    /// Raw progress in `[0, 1]` at `now`, before easing.
    pub fn raw_progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f64 {
        self.easing.apply(self.raw_progress(now))
    }

    /// Whether the transition has run its full duration at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.raw_progress(now) >= 1.0
    }
}

/// A point-valued tween, used for toast slide and reflow motion.
#[derive(Debug, Clone, Copy)]
pub struct PointAnim {
    pub from: Point,
    pub to: Point,
    transition: Transition,
}

impl PointAnim {
    /// Start animating from `from` to `to` at `now`.
    pub fn new(from: Point, to: Point, duration: Duration, easing: Easing, now: Instant) -> Self {
        Self {
            from,
            to,
            transition: Transition::new(duration, easing, now),
        }
    }

    /// Current interpolated position at `now`.
    pub fn sample(&self, now: Instant) -> Point {
        lerp_point(self.from, self.to, self.transition.progress(now))
    }

    /// Restart toward a new target, taking the current sample as the origin.
    pub fn retarget(&mut self, to: Point, duration: Duration, now: Instant) {
        self.from = self.sample(now);
        self.to = to;
        self.transition = Transition::new(duration, self.transition.easing, now);
    }

    /// Whether the tween has reached its target at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.transition.is_finished(now)
    }
}

/// A scalar tween, used for fade opacity and the switch knob.
#[derive(Debug, Clone, Copy)]
pub struct FloatAnim {
    pub from: f64,
    pub to: f64,
    transition: Transition,
}

impl FloatAnim {
    /// Start animating from `from` to `to` at `now`.
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing, now: Instant) -> Self {
        Self {
            from,
            to,
            transition: Transition::new(duration, easing, now),
        }
    }

    /// Current interpolated value at `now`.
    pub fn sample(&self, now: Instant) -> f64 {
        lerp(self.from, self.to, self.transition.progress(now))
    }

    /// Whether the tween has reached its target at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.transition.is_finished(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 6] = [
        Easing::Linear,
        Easing::OutSine,
        Easing::OutCubic,
        Easing::OutQuart,
        Easing::OutCirc,
        Easing::OutBounce,
    ];

    #[test]
    fn test_easing_endpoints() {
        for curve in CURVES {
            assert!(curve.apply(0.0).abs() < 1e-9, "{:?} at 0", curve);
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-9, "{:?} at 1", curve);
        }
    }

    #[test]
    fn test_easing_clamps_out_of_range() {
        for curve in CURVES {
            assert!(curve.apply(-0.5).abs() < 1e-9);
            assert!((curve.apply(1.5) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_out_cubic_decelerates() {
        // A decelerating curve covers more than half the distance by midpoint.
        assert!(Easing::OutCubic.apply(0.5) > 0.5);
        assert!(Easing::OutQuart.apply(0.5) > Easing::OutCubic.apply(0.5));
    }

    #[test]
    fn test_transition_progress() {
        let t0 = Instant::now();
        let t = Transition::new(Duration::from_millis(200), Easing::Linear, t0);

        assert!(t.progress(t0).abs() < 1e-9);
        assert!((t.raw_progress(t0 + Duration::from_millis(100)) - 0.5).abs() < 1e-9);
        assert!(t.is_finished(t0 + Duration::from_millis(200)));
        assert!(!t.is_finished(t0 + Duration::from_millis(199)));
    }

    #[test]
    fn test_zero_duration_is_instantly_finished() {
        let t0 = Instant::now();
        let t = Transition::new(Duration::ZERO, Easing::OutCubic, t0);
        assert!(t.is_finished(t0));
        assert!((t.progress(t0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_anim_samples_endpoints() {
        let t0 = Instant::now();
        let anim = PointAnim::new(
            Point::new(0.0, -40.0),
            Point::new(0.0, 24.0),
            Duration::from_millis(200),
            Easing::Linear,
            t0,
        );

        let start = anim.sample(t0);
        assert!((start.y - -40.0).abs() < 1e-9);

        let end = anim.sample(t0 + Duration::from_millis(200));
        assert!((end.y - 24.0).abs() < 1e-9);

        let mid = anim.sample(t0 + Duration::from_millis(100));
        assert!((mid.y - -8.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_anim_retarget_starts_from_current() {
        let t0 = Instant::now();
        let mut anim = PointAnim::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Duration::from_millis(200),
            Easing::Linear,
            t0,
        );

        let half = t0 + Duration::from_millis(100);
        anim.retarget(Point::new(0.0, 50.0), Duration::from_millis(200), half);

        assert!((anim.from.x - 50.0).abs() < 1e-9);
        let end = anim.sample(half + Duration::from_millis(200));
        assert!((end.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_float_anim_fade() {
        let t0 = Instant::now();
        let fade = FloatAnim::new(1.0, 0.0, Duration::from_millis(1000), Easing::Linear, t0);

        assert!((fade.sample(t0) - 1.0).abs() < 1e-9);
        assert!((fade.sample(t0 + Duration::from_millis(500)) - 0.5).abs() < 1e-9);
        assert!(fade.sample(t0 + Duration::from_millis(1000)).abs() < 1e-9);
    }
}
