#![forbid(unsafe_code)]

//! Swipe recognition: transforms raw touch samples into paging gestures.
//!
//! [`SwipeRecognizer`] is a stateful processor that watches one
//! down → move → up interaction at a time and emits a [`SwipeEvent`] when
//! the release displacement qualifies as a horizontal swipe.
//!
//! # Invariants
//!
//! 1. A recognizer that was never armed emits nothing, no matter how the
//!    interaction ends. Arming requires movement strictly beyond
//!    [`SwipeConfig::arm_threshold`] on at least one axis — a tap with a few
//!    pixels of jitter is never captured.
//! 2. A swipe fires only when the horizontal displacement strictly exceeds
//!    [`SwipeConfig::trigger_threshold`] *and* dominates the vertical one.
//!    A drag of exactly the threshold is a no-op.
//! 3. At most one event is emitted per down → up interaction.
//! 4. `Cancelled` discards the interaction silently.
//!
//! # Failure Modes
//!
//! - A `Moved`/`Ended` sample with no preceding `Began` is ignored (stale
//!   events after a reset).

use crate::event::{TouchEvent, TouchPhase};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for swipe recognition.
#[derive(Debug, Clone)]
pub struct SwipeConfig {
    /// Minimum displacement (px, either axis) before the gesture arms
    /// (default: 5.0). Sub-threshold jitter never captures the interaction.
    pub arm_threshold: f32,
    /// Minimum horizontal displacement (px) for a swipe to fire on release
    /// (default: 50.0, strict).
    pub trigger_threshold: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            arm_threshold: 5.0,
            trigger_threshold: 50.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A recognized horizontal swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeEvent {
    /// Finger travelled left (dx < 0).
    Left,
    /// Finger travelled right (dx > 0).
    Right,
}

// ---------------------------------------------------------------------------
// SwipeRecognizer
// ---------------------------------------------------------------------------

/// Stateful swipe recognizer.
///
/// Feed every [`TouchEvent`] through [`process`](Self::process); the return
/// value is `Some` only on a qualifying release.
#[derive(Debug)]
pub struct SwipeRecognizer {
    config: SwipeConfig,
    origin: Option<(f32, f32)>,
    last: (f32, f32),
    armed: bool,
}

impl SwipeRecognizer {
    /// Create a recognizer with the given thresholds.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            origin: None,
            last: (0.0, 0.0),
            armed: false,
        }
    }

    /// Process one touch sample.
    pub fn process(&mut self, event: &TouchEvent) -> Option<SwipeEvent> {
        match event.phase {
            TouchPhase::Began => {
                self.origin = Some((event.x, event.y));
                self.last = (event.x, event.y);
                self.armed = false;
                None
            }
            TouchPhase::Moved => {
                let (ox, oy) = self.origin?;
                self.last = (event.x, event.y);
                let dx = (event.x - ox).abs();
                let dy = (event.y - oy).abs();
                if !self.armed && (dx > self.config.arm_threshold || dy > self.config.arm_threshold)
                {
                    self.armed = true;
                }
                None
            }
            TouchPhase::Ended => {
                let (ox, oy) = self.origin.take()?;
                let armed = self.armed;
                self.armed = false;

                if !armed {
                    return None;
                }
                let dx = event.x - ox;
                let dy = event.y - oy;
                if dx.abs() > self.config.trigger_threshold && dx.abs() > dy.abs() {
                    if dx < 0.0 {
                        Some(SwipeEvent::Left)
                    } else {
                        Some(SwipeEvent::Right)
                    }
                } else {
                    None
                }
            }
            TouchPhase::Cancelled => {
                self.reset();
                None
            }
        }
    }

    /// Whether the current interaction has armed the recognizer.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Reset to idle, discarding any in-progress interaction.
    pub fn reset(&mut self) {
        self.origin = None;
        self.armed = false;
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }
}

impl Default for SwipeRecognizer {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
