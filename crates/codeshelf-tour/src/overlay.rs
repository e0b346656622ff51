#![forbid(unsafe_code)]

//! Overlay view model: what the renderer paints each frame.
//!
//! [`OverlayModel`] owns the overlay's animation state — the spotlight
//! pulse, the ring-center tween, and the dismiss fade — as plain values.
//! [`frame`](OverlayModel::frame) folds the engine's published state and
//! the positioning policy into an [`OverlayFrame`] data description; actual
//! painting is the embedder's concern.
//!
//! # Invariants
//!
//! 1. The spotlight ring appears only when the engine reports
//!    `spotlight_ready` *and* a measured target exists — never at stale or
//!    default coordinates.
//! 2. The pulse loop animates radius/opacity only; the ring center is
//!    driven by its own one-shot tween, retargeted when the target moves.
//! 3. Dropping the model cancels every animation; a fresh mount starts
//!    from scratch.

use std::time::Duration;

use codeshelf_core::animation::{Animation, Fade, Pulse, Tween, ease_in_out};
use codeshelf_core::geometry::Point;
use codeshelf_core::screen::DeviceClass;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::engine::{COMPLETION_FADE, TourEngine, TourPhase};
use crate::placement::{
    VerticalPlacement, info_step_position, smart_tooltip_position, spotlight_radius,
    tooltip_dimensions,
};

/// Full period of the spotlight pulse (expand + contract).
pub const PULSE_PERIOD: Duration = Duration::from_millis(1000);
/// One-shot glide of the ring center to a new target.
pub const CENTER_TWEEN: Duration = Duration::from_millis(400);

/// How much the pulse inflates the ring at its peak.
const PULSE_RADIUS_GAIN: f32 = 0.12;
/// Ring opacity at rest and the amount the pulse breathes away.
const RING_OPACITY_BASE: f32 = 0.85;
const RING_OPACITY_SWING: f32 = 0.35;
/// Approximate glyph advance as a fraction of font size, for wrapping.
const GLYPH_ASPECT: f32 = 0.55;

/// Backdrop dim strength by device tier.
#[must_use]
pub fn backdrop_opacity(class: DeviceClass) -> f32 {
    match class {
        DeviceClass::SmallPhone => 0.35,
        DeviceClass::LargePhone => 0.40,
        DeviceClass::Tablet => 0.45,
    }
}

/// The spotlight ring, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightRing {
    pub center: Point,
    pub radius: f32,
    pub opacity: f32,
}

/// The tooltip card, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipCard {
    pub title: String,
    pub body_lines: Vec<String>,
    pub highlight: Option<String>,
    pub placement: VerticalPlacement,
    pub width: f32,
    /// 1-based progress, e.g. (2, 6) renders as "2/6".
    pub progress: (usize, usize),
    pub can_go_back: bool,
    pub show_skip: bool,
}

/// One frame of overlay state.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    /// Overall opacity multiplier (drops to 0 during the dismiss fade).
    pub opacity: f32,
    /// Dim-layer opacity, already scaled by `opacity`.
    pub backdrop_opacity: f32,
    pub spotlight: Option<SpotlightRing>,
    pub tooltip: Option<TooltipCard>,
}

/// Animation state for one overlay mount.
#[derive(Debug)]
pub struct OverlayModel {
    pulse: Pulse,
    center: Option<Tween>,
    dismiss: Option<Fade>,
}

impl Default for OverlayModel {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayModel {
    /// Fresh animation state for a newly mounted overlay.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pulse: Pulse::new(PULSE_PERIOD),
            center: None,
            dismiss: None,
        }
    }

    /// Advance animations by `delta` and produce the frame to paint.
    ///
    /// Returns `None` once the tour is inactive or fully dismissed — the
    /// embedder unmounts the overlay and drops this model.
    pub fn frame(&mut self, engine: &TourEngine, delta: Duration) -> Option<OverlayFrame> {
        match engine.phase() {
            TourPhase::Inactive | TourPhase::Completed => {
                // Teardown: a remount must not inherit animation state.
                *self = Self::new();
                return None;
            }
            TourPhase::Active | TourPhase::Finishing => {}
        }

        self.pulse.tick(delta);

        let opacity = match engine.phase() {
            TourPhase::Finishing => {
                let fade = self
                    .dismiss
                    .get_or_insert_with(|| Fade::new(COMPLETION_FADE).easing(ease_in_out));
                fade.tick(delta);
                1.0 - fade.value() as f32
            }
            _ => {
                self.dismiss = None;
                1.0
            }
        };

        let screen = engine.screen();
        let step = engine.current_step()?;

        let spotlight = match (engine.is_spotlight_ready(), engine.target_rect()) {
            (true, Some(rect)) => {
                let base_radius = spotlight_radius(rect);
                let target_center = rect.center();
                // First appearance settles in place (no glide from nowhere);
                // a moved target glides over via retarget.
                let tween = self
                    .center
                    .get_or_insert_with(|| Tween::settled(target_center));
                if tween.destination() != target_center {
                    tween.retarget(target_center, CENTER_TWEEN);
                }
                tween.tick(delta);
                let pulse = self.pulse.value() as f32;
                Some(SpotlightRing {
                    center: tween.position(),
                    radius: base_radius * (1.0 + PULSE_RADIUS_GAIN * pulse),
                    opacity: (RING_OPACITY_BASE - RING_OPACITY_SWING * pulse) * opacity,
                })
            }
            _ => None,
        };

        let dims = tooltip_dimensions(screen.device_class);
        let placement = if step.has_target() {
            let measured = engine
                .target_rect()
                .map(|r| (r.center().y, spotlight_radius(r)));
            smart_tooltip_position(step.id, measured, &screen)
        } else {
            info_step_position(step.position, &screen)
        };

        let width = dims.max_width.min(screen.width - 2.0 * dims.padding);
        let inner = width - 2.0 * dims.padding;
        let max_cols = ((inner / (dims.body_font * GLYPH_ASPECT)) as usize).max(8);

        let tooltip = Some(TooltipCard {
            title: step.title.to_string(),
            body_lines: wrap_text(step.description, max_cols),
            highlight: step.highlight_text.map(str::to_string),
            placement,
            width,
            progress: (engine.step_index() + 1, engine.step_count()),
            can_go_back: engine.step_index() > 0,
            show_skip: engine.step_index() + 1 < engine.step_count(),
        });

        Some(OverlayFrame {
            opacity,
            backdrop_opacity: backdrop_opacity(screen.device_class) * opacity,
            spotlight,
            tooltip,
        })
    }
}

/// Greedy word wrap by display width, hard-breaking words that exceed a
/// whole line on grapheme boundaries.
fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    if max_cols == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);

            if word_width > max_cols {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                hard_break(word, max_cols, &mut lines, &mut current, &mut current_width);
            } else if current_width == 0 {
                current = word.to_string();
                current_width = word_width;
            } else if current_width + 1 + word_width <= max_cols {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
                current_width = word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn hard_break(
    word: &str,
    max_cols: usize,
    lines: &mut Vec<String>,
    current: &mut String,
    current_width: &mut usize,
) {
    for grapheme in word.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if *current_width + w > max_cols && !current.is_empty() {
            lines.push(std::mem::take(current));
            *current_width = 0;
        }
        current.push_str(grapheme);
        *current_width += w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{TourEngineConfig, TourEvent};
    use crate::registry::{MeasureError, Measurable, Scrollable, TargetRegistry};
    use codeshelf_core::geometry::Rect;
    use codeshelf_core::screen::{Platform, ScreenInfo};
    use codeshelf_store::MemoryStore;
    use std::sync::Arc;
    use std::time::Instant;

    struct FixedTarget(Rect);

    impl Measurable for FixedTarget {
        fn measure(&self) -> Result<Rect, MeasureError> {
            Ok(self.0)
        }
    }

    struct NullScroll;

    impl Scrollable for NullScroll {
        fn scroll_to(&self, _offset: f32, _animated: bool) {}
    }

    const MS_16: Duration = Duration::from_millis(16);

    fn active_engine() -> TourEngine {
        let mut engine = TourEngine::new(
            TourEngineConfig {
                steps: crate::step::default_steps(),
                app_version: "1.0".to_string(),
                screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
            },
            Arc::new(TargetRegistry::new()),
            Arc::new(MemoryStore::new()),
        );
        engine.start(Instant::now());
        engine
    }

    #[test]
    fn no_frame_when_inactive() {
        let engine = TourEngine::new(
            TourEngineConfig {
                steps: crate::step::default_steps(),
                app_version: "1.0".to_string(),
                screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
            },
            Arc::new(TargetRegistry::new()),
            Arc::new(MemoryStore::new()),
        );
        let mut model = OverlayModel::new();
        assert!(model.frame(&engine, MS_16).is_none());
    }

    #[test]
    fn welcome_frame_has_tooltip_but_no_ring() {
        let engine = active_engine();
        let mut model = OverlayModel::new();
        let frame = model.frame(&engine, MS_16).expect("active frame");

        assert!(frame.spotlight.is_none());
        let tooltip = frame.tooltip.expect("tooltip");
        assert_eq!(tooltip.progress, (1, 6));
        assert!(!tooltip.can_go_back);
        assert!(tooltip.show_skip);
        assert!(!tooltip.body_lines.is_empty());
        assert_eq!(frame.opacity, 1.0);
    }

    #[test]
    fn backdrop_table_by_device_class() {
        assert_eq!(backdrop_opacity(DeviceClass::SmallPhone), 0.35);
        assert_eq!(backdrop_opacity(DeviceClass::LargePhone), 0.40);
        assert_eq!(backdrop_opacity(DeviceClass::Tablet), 0.45);
    }

    #[test]
    fn ring_waits_for_spotlight_ready_and_target() {
        let registry = Arc::new(TargetRegistry::new());
        let target: Arc<dyn Measurable> = Arc::new(FixedTarget(Rect::new(20.0, 400.0, 120.0, 48.0)));
        let scroll: Arc<dyn Scrollable> = Arc::new(NullScroll);
        registry.register("Browse", "quickAccess", &target);
        registry.register_scroll_host("Browse", &scroll);

        let mut engine = TourEngine::new(
            TourEngineConfig {
                steps: crate::step::default_steps(),
                app_version: "1.0".to_string(),
                screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
            },
            registry,
            Arc::new(MemoryStore::new()),
        );
        let now = Instant::now();
        engine.start(now);
        engine.next(now); // quick-access: scroll settle pending

        let mut model = OverlayModel::new();
        assert!(!engine.is_spotlight_ready());
        let frame = model.frame(&engine, MS_16).unwrap();
        assert!(frame.spotlight.is_none(), "ring must not render pre-settle");

        let events = engine.tick(now + crate::engine::SCROLL_SETTLE);
        assert!(events.iter().any(|e| matches!(e, TourEvent::SpotlightArmed { .. })));
        let frame = model.frame(&engine, MS_16).unwrap();
        let ring = frame.spotlight.expect("ring after settle");
        assert_eq!(ring.center, Rect::new(20.0, 400.0, 120.0, 48.0).center());
        assert!(ring.radius >= spotlight_radius(Rect::new(20.0, 400.0, 120.0, 48.0)));
    }

    #[test]
    fn pulse_breathes_radius_and_opacity() {
        let registry = Arc::new(TargetRegistry::new());
        let target: Arc<dyn Measurable> = Arc::new(FixedTarget(Rect::new(0.0, 100.0, 80.0, 80.0)));
        registry.register("Assistant", "askAi", &target);

        let mut engine = TourEngine::new(
            TourEngineConfig {
                steps: crate::step::default_steps(),
                app_version: "1.0".to_string(),
                screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
            },
            registry,
            Arc::new(MemoryStore::new()),
        );
        let now = Instant::now();
        engine.start(now);
        for _ in 0..4 {
            engine.next(now); // land on ask-ai (non-scroll, measurable)
        }
        assert!(engine.is_spotlight_ready());
        assert!(engine.target_rect().is_some());

        let mut model = OverlayModel::new();
        let at_rest = model.frame(&engine, Duration::ZERO).unwrap().spotlight.unwrap();
        let at_peak = model
            .frame(&engine, Duration::from_millis(500))
            .unwrap()
            .spotlight
            .unwrap();
        assert!(at_peak.radius > at_rest.radius);
        assert!(at_peak.opacity < at_rest.opacity);
        // Center is untouched by the pulse.
        assert_eq!(at_peak.center, at_rest.center);
    }

    #[test]
    fn dismiss_fade_scales_everything_then_unmounts() {
        let mut engine = active_engine();
        let now = Instant::now();
        engine.skip(now);

        let mut model = OverlayModel::new();
        let mid = model.frame(&engine, Duration::from_millis(150)).unwrap();
        assert!(mid.opacity < 1.0);
        assert!(mid.backdrop_opacity < backdrop_opacity(DeviceClass::SmallPhone));

        engine.tick(now + COMPLETION_FADE);
        assert!(model.frame(&engine, MS_16).is_none());
    }

    #[test]
    fn tooltip_placement_uses_curated_table() {
        let mut engine = active_engine();
        let now = Instant::now();
        engine.next(now); // quick-access (fails open: no registry entries)

        let mut model = OverlayModel::new();
        let tooltip = model.frame(&engine, MS_16).unwrap().tooltip.unwrap();
        assert_eq!(tooltip.placement.top, Some(0.35 * engine.screen().height));
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 10, "too wide: {line:?}");
        }
    }

    #[test]
    fn wrap_text_hard_breaks_long_words() {
        let lines = wrap_text("call AbstractSingletonProxyFactoryBean now", 12);
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 12, "too wide: {line:?}");
        }
        assert!(lines.concat().contains("Abstract"));
    }

    #[test]
    fn wrap_text_empty_is_empty() {
        assert!(wrap_text("", 20).is_empty());
    }
}
