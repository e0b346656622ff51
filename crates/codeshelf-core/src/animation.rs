#![forbid(unsafe_code)]

//! Tick-driven animation primitives for the tour overlay.
//!
//! Every animation here is a plain value advanced by [`Animation::tick`]
//! with an explicit delta — no hidden clocks, no spawned timers. Dropping
//! the value cancels the animation; there is nothing else to clean up.
//!
//! # Invariants
//!
//! 1. Output is deterministic given the sum of deltas fed in.
//! 2. Zero durations are clamped to 1 ns to avoid division by zero.
//! 3. One-shot animations clamp at their final value; `tick` past the end
//!    is harmless.
//! 4. [`Pulse`] never completes; it wraps modulo its period.

use std::time::Duration;

use crate::geometry::Point;

/// An easing curve mapping linear progress to eased progress, both in
/// [0.0, 1.0].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing.
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quadratic ease-in.
#[must_use]
pub fn ease_in(t: f64) -> f64 {
    t * t
}

/// Quadratic ease-out.
#[must_use]
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}

/// A time-deterministic animation value.
pub trait Animation {
    /// Advance by the given delta.
    fn tick(&mut self, delta: Duration);

    /// Current output in [0.0, 1.0].
    fn value(&self) -> f64;

    /// Whether the animation has reached its terminal state.
    fn is_complete(&self) -> bool;
}

fn clamp_duration(d: Duration) -> Duration {
    if d.is_zero() { Duration::from_nanos(1) } else { d }
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// One-shot eased ramp from 0.0 to 1.0 over a fixed duration.
///
/// Used directly for fade-in; invert at the use site (`1.0 - value`) for
/// fade-out, e.g. the overlay's dismiss fade.
#[derive(Debug, Clone)]
pub struct Fade {
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade over `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: clamp_duration(duration),
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }
}

impl Animation for Fade {
    fn tick(&mut self, delta: Duration) {
        self.elapsed = (self.elapsed + delta).min(self.duration);
    }

    fn value(&self) -> f64 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.easing)(t.clamp(0.0, 1.0))
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// ---------------------------------------------------------------------------
// Pulse
// ---------------------------------------------------------------------------

/// Infinite expand/contract loop: 0.0 → 1.0 → 0.0 per period.
///
/// The triangle wave is eased symmetrically, which reads as a breathing
/// ring when mapped onto radius and opacity.
#[derive(Debug, Clone)]
pub struct Pulse {
    period: Duration,
    elapsed: Duration,
}

impl Pulse {
    /// Create a pulse with the given full expand+contract period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: clamp_duration(period),
            elapsed: Duration::ZERO,
        }
    }
}

impl Animation for Pulse {
    fn tick(&mut self, delta: Duration) {
        self.elapsed += delta;
        // Keep elapsed bounded so long-lived overlays don't accumulate.
        if self.elapsed >= self.period {
            let period_ns = self.period.as_nanos();
            let wrapped = self.elapsed.as_nanos() % period_ns;
            self.elapsed = Duration::from_nanos(wrapped as u64);
        }
    }

    fn value(&self) -> f64 {
        let t = self.elapsed.as_secs_f64() / self.period.as_secs_f64();
        let tri = if t < 0.5 { t * 2.0 } else { 2.0 - t * 2.0 };
        ease_in_out(tri.clamp(0.0, 1.0))
    }

    fn is_complete(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// One-shot 2-D interpolation between two points.
///
/// [`retarget`](Self::retarget) restarts the tween from the current
/// position, so a moving spotlight glides rather than jumping when its
/// target changes mid-flight.
#[derive(Debug, Clone)]
pub struct Tween {
    from: Point,
    to: Point,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a tween from `from` to `to` over `duration`.
    #[must_use]
    pub fn new(from: Point, to: Point, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration: clamp_duration(duration),
            elapsed: Duration::ZERO,
            easing: ease_out,
        }
    }

    /// A tween that is already at its destination.
    #[must_use]
    pub fn settled(at: Point) -> Self {
        let mut t = Self::new(at, at, Duration::from_nanos(1));
        t.elapsed = t.duration;
        t
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Restart toward a new destination from the current position.
    pub fn retarget(&mut self, to: Point, duration: Duration) {
        self.from = self.position();
        self.to = to;
        self.duration = clamp_duration(duration);
        self.elapsed = Duration::ZERO;
    }

    /// Current interpolated position.
    #[must_use]
    pub fn position(&self) -> Point {
        let t = self.value() as f32;
        Point::new(
            self.from.x + (self.to.x - self.from.x) * t,
            self.from.y + (self.to.y - self.from.y) * t,
        )
    }

    /// Destination point.
    #[must_use]
    pub fn destination(&self) -> Point {
        self.to
    }
}

impl Animation for Tween {
    fn tick(&mut self, delta: Duration) {
        self.elapsed = (self.elapsed + delta).min(self.duration);
    }

    fn value(&self) -> f64 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.easing)(t.clamp(0.0, 1.0))
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_250: Duration = Duration::from_millis(250);
    const MS_500: Duration = Duration::from_millis(500);

    #[test]
    fn fade_progresses_and_clamps() {
        let mut fade = Fade::new(MS_500);
        assert_eq!(fade.value(), 0.0);
        assert!(!fade.is_complete());

        fade.tick(MS_250);
        assert!((fade.value() - 0.5).abs() < 1e-9);

        fade.tick(MS_500);
        assert_eq!(fade.value(), 1.0);
        assert!(fade.is_complete());

        // Ticking past the end is harmless.
        fade.tick(MS_500);
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn fade_zero_duration_is_immediately_complete() {
        let mut fade = Fade::new(Duration::ZERO);
        fade.tick(Duration::from_nanos(1));
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn fade_easing_applies() {
        let mut fade = Fade::new(MS_500).easing(ease_in);
        fade.tick(MS_250);
        assert!((fade.value() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn fade_is_deterministic_across_tick_granularity() {
        let mut coarse = Fade::new(MS_500);
        coarse.tick(Duration::from_millis(300));

        let mut fine = Fade::new(MS_500);
        for _ in 0..300 {
            fine.tick(Duration::from_millis(1));
        }
        assert!((coarse.value() - fine.value()).abs() < 1e-9);
    }

    #[test]
    fn pulse_peaks_mid_period_and_wraps() {
        let mut pulse = Pulse::new(Duration::from_millis(1000));
        assert_eq!(pulse.value(), 0.0);

        pulse.tick(MS_500);
        assert!((pulse.value() - 1.0).abs() < 1e-9);

        pulse.tick(MS_500);
        assert!(pulse.value() < 1e-9);

        // One and a half periods later, back at the peak.
        pulse.tick(Duration::from_millis(1500));
        assert!((pulse.value() - 1.0).abs() < 1e-9);
        assert!(!pulse.is_complete());
    }

    #[test]
    fn tween_moves_toward_destination() {
        let mut tween = Tween::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0), MS_500);
        tween.tick(MS_500);
        let p = tween.position();
        assert!((p.x - 100.0).abs() < 1e-3);
        assert!((p.y - 50.0).abs() < 1e-3);
        assert!(tween.is_complete());
    }

    #[test]
    fn tween_retarget_starts_from_current_position() {
        let mut tween =
            Tween::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), MS_500).easing(linear);
        tween.tick(MS_250);
        let mid = tween.position();
        assert!((mid.x - 50.0).abs() < 1e-3);

        tween.retarget(Point::new(0.0, 100.0), MS_500);
        assert_eq!(tween.position().x, mid.x);
        assert!(!tween.is_complete());

        tween.tick(MS_500);
        let end = tween.position();
        assert!(end.x.abs() < 1e-3);
        assert!((end.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn settled_tween_is_complete_at_destination() {
        let tween = Tween::settled(Point::new(42.0, 7.0));
        assert!(tween.is_complete());
        assert_eq!(tween.position(), Point::new(42.0, 7.0));
    }

    #[test]
    fn easing_endpoints() {
        for f in [linear as EasingFn, ease_in, ease_out, ease_in_out] {
            assert_eq!(f(0.0), 0.0);
            assert!((f(1.0) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tick_granularity_invariance_100ms_vs_1ms() {
        let mut a = Pulse::new(Duration::from_millis(1000));
        let mut b = Pulse::new(Duration::from_millis(1000));
        a.tick(MS_100);
        a.tick(MS_100);
        for _ in 0..200 {
            b.tick(Duration::from_millis(1));
        }
        assert!((a.value() - b.value()).abs() < 1e-9);
    }
}
