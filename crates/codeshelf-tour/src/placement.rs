#![forbid(unsafe_code)]

//! Positioning policy: where the tooltip and spotlight go.
//!
//! Two layers:
//!
//! 1. A **curated table** of per-step placements, kept as data so new steps
//!    are additive. Generic geometry fails for steps whose target is
//!    off-screen before the scroll settles, or ambiguous — those get
//!    hand-tuned fractional offsets and ignore the measured position
//!    entirely.
//! 2. A **generic fallback** that places the tooltip below the spotlight
//!    when there's room, above otherwise, dead-center as a last resort.
//!
//! Everything here is pure over the [`ScreenInfo`] passed in; rotation is
//! handled by the caller reclassifying and calling again. Nothing caches.

use codeshelf_core::geometry::Rect;
use codeshelf_core::screen::{DeviceClass, ScreenInfo};

use crate::step::FallbackPosition;

/// Vertical gap between the spotlight edge and the tooltip.
const TOOLTIP_GAP: f32 = 24.0;
/// Extra clearance demanded beyond the tooltip's own height.
const MIN_SPACE_MARGIN: f32 = 40.0;
/// Fixed inset for top/bottom info-step placement.
const INFO_STEP_INSET: f32 = 40.0;
/// Breathing room added around a measured target.
const SPOTLIGHT_PADDING: f32 = 12.0;
/// Smallest useful spotlight.
const SPOTLIGHT_MIN_RADIUS: f32 = 40.0;

/// Fixed tooltip sizing tier for a device class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipDimensions {
    pub max_width: f32,
    pub max_height: f32,
    pub padding: f32,
    pub title_font: f32,
    pub body_font: f32,
}

/// The three size tiers. A fixed table, not computed from content.
#[must_use]
pub fn tooltip_dimensions(class: DeviceClass) -> TooltipDimensions {
    match class {
        DeviceClass::SmallPhone => TooltipDimensions {
            max_width: 280.0,
            max_height: 170.0,
            padding: 16.0,
            title_font: 16.0,
            body_font: 13.0,
        },
        DeviceClass::LargePhone => TooltipDimensions {
            max_width: 320.0,
            max_height: 190.0,
            padding: 20.0,
            title_font: 17.0,
            body_font: 14.0,
        },
        DeviceClass::Tablet => TooltipDimensions {
            max_width: 420.0,
            max_height: 230.0,
            padding: 24.0,
            title_font: 20.0,
            body_font: 16.0,
        },
    }
}

/// A resolved vertical placement: exactly one of `top`/`bottom` is set
/// (distance from that screen edge to the tooltip's near edge).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalPlacement {
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

impl VerticalPlacement {
    /// Anchor at a distance from the top edge.
    #[must_use]
    pub const fn from_top(offset: f32) -> Self {
        Self {
            top: Some(offset),
            bottom: None,
        }
    }

    /// Anchor at a distance from the bottom edge.
    #[must_use]
    pub const fn from_bottom(offset: f32) -> Self {
        Self {
            top: None,
            bottom: Some(offset),
        }
    }
}

/// How a curated step places its tooltip.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PlacementRule {
    /// Fixed fraction of screen height from the top.
    FractionFromTop(f32),
    /// Vertically centered.
    Centered,
}

/// Curated placements by step id. These steps ignore the measured spotlight
/// position entirely: their targets are off-screen pre-scroll or sit where
/// generic geometry picks a bad side.
const CURATED: &[(&str, PlacementRule)] = &[
    ("quick-access", PlacementRule::FractionFromTop(0.35)),
    ("community", PlacementRule::FractionFromTop(0.55)),
    ("ask-ai", PlacementRule::Centered),
];

fn centered(screen: &ScreenInfo) -> VerticalPlacement {
    let dims = tooltip_dimensions(screen.device_class);
    VerticalPlacement::from_top(((screen.height - dims.max_height) / 2.0).max(0.0))
}

/// Resolve the tooltip placement for a step.
///
/// Curated steps come straight from the table. Unknown steps use the
/// generic geometric placement when a measured spotlight is available, and
/// fall back to dead-center otherwise.
#[must_use]
pub fn smart_tooltip_position(
    step_id: &str,
    spotlight: Option<(f32, f32)>, // (center_y, radius)
    screen: &ScreenInfo,
) -> VerticalPlacement {
    if let Some((_, rule)) = CURATED.iter().find(|(id, _)| *id == step_id) {
        return match rule {
            PlacementRule::FractionFromTop(fraction) => {
                VerticalPlacement::from_top(screen.height * fraction)
            }
            PlacementRule::Centered => centered(screen),
        };
    }
    match spotlight {
        Some((center_y, radius)) if center_y.is_finite() && center_y >= 0.0 => {
            calculate_tooltip_position(center_y, radius, screen)
        }
        _ => centered(screen),
    }
}

/// Generic geometric placement: below the spotlight if it fits, above if
/// that fits, dead-center otherwise.
#[must_use]
pub fn calculate_tooltip_position(
    spotlight_y: f32,
    spotlight_radius: f32,
    screen: &ScreenInfo,
) -> VerticalPlacement {
    let dims = tooltip_dimensions(screen.device_class);
    let min_space_needed = dims.max_height + MIN_SPACE_MARGIN;

    let space_below =
        screen.height - spotlight_y - spotlight_radius - screen.safe_area.bottom - min_space_needed;
    let space_above = spotlight_y - spotlight_radius - screen.safe_area.top - min_space_needed;

    if space_below > 0.0 {
        VerticalPlacement::from_top(spotlight_y + spotlight_radius + TOOLTIP_GAP)
    } else if space_above > 0.0 {
        VerticalPlacement::from_bottom(screen.height - spotlight_y + spotlight_radius + TOOLTIP_GAP)
    } else {
        centered(screen)
    }
}

/// Placement for steps with no target at all: fixed padding off the safe
/// area, or dead-center.
#[must_use]
pub fn info_step_position(position: FallbackPosition, screen: &ScreenInfo) -> VerticalPlacement {
    match position {
        FallbackPosition::Top => {
            VerticalPlacement::from_top(screen.safe_area.top + INFO_STEP_INSET)
        }
        FallbackPosition::Center => centered(screen),
        FallbackPosition::Bottom => {
            VerticalPlacement::from_bottom(screen.safe_area.bottom + INFO_STEP_INSET)
        }
    }
}

/// Spotlight radius for a measured target: half its larger dimension plus
/// breathing room, clamped to a useful minimum.
#[must_use]
pub fn spotlight_radius(target: Rect) -> f32 {
    (target.width.max(target.height) / 2.0 + SPOTLIGHT_PADDING).max(SPOTLIGHT_MIN_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeshelf_core::screen::Platform;

    fn phone() -> ScreenInfo {
        ScreenInfo::classify(390.0, 844.0, Platform::Ios)
    }

    fn tablet() -> ScreenInfo {
        ScreenInfo::classify(834.0, 1194.0, Platform::Ios)
    }

    #[test]
    fn dimension_tiers_grow_with_device() {
        let small = tooltip_dimensions(DeviceClass::SmallPhone);
        let large = tooltip_dimensions(DeviceClass::LargePhone);
        let tab = tooltip_dimensions(DeviceClass::Tablet);
        assert!(small.max_width < large.max_width);
        assert!(large.max_width < tab.max_width);
        assert!(small.body_font < tab.body_font);
    }

    #[test]
    fn curated_step_ignores_measured_position() {
        let screen = phone();
        for y in [0.0, 120.0, 555.5, 9999.0] {
            let placement = smart_tooltip_position("community", Some((y, 60.0)), &screen);
            assert_eq!(placement.top, Some(0.55 * screen.height));
            assert_eq!(placement.bottom, None);
        }
        // Even with no measurement at all.
        let placement = smart_tooltip_position("community", None, &screen);
        assert_eq!(placement.top, Some(0.55 * screen.height));
    }

    #[test]
    fn quick_access_sits_at_35_percent() {
        let screen = phone();
        let placement = smart_tooltip_position("quick-access", Some((700.0, 50.0)), &screen);
        assert_eq!(placement.top, Some(0.35 * screen.height));
    }

    #[test]
    fn ask_ai_is_centered() {
        let screen = tablet();
        let dims = tooltip_dimensions(screen.device_class);
        let placement = smart_tooltip_position("ask-ai", Some((100.0, 40.0)), &screen);
        assert_eq!(placement.top, Some((screen.height - dims.max_height) / 2.0));
    }

    #[test]
    fn unknown_step_with_measurement_goes_generic() {
        let screen = phone();
        // Target near the top: plenty of room below.
        let placement = smart_tooltip_position("mystery", Some((150.0, 50.0)), &screen);
        assert_eq!(placement.top, Some(150.0 + 50.0 + TOOLTIP_GAP));
    }

    #[test]
    fn unknown_step_without_measurement_centers() {
        let screen = phone();
        let dims = tooltip_dimensions(screen.device_class);
        let placement = smart_tooltip_position("mystery", None, &screen);
        assert_eq!(placement.top, Some((screen.height - dims.max_height) / 2.0));
    }

    #[test]
    fn generic_prefers_below_then_above_then_center() {
        let screen = phone();

        let below = calculate_tooltip_position(150.0, 40.0, &screen);
        assert!(below.top.is_some());

        let above = calculate_tooltip_position(700.0, 40.0, &screen);
        assert_eq!(
            above.bottom,
            Some(screen.height - 700.0 + 40.0 + TOOLTIP_GAP)
        );

        // A spotlight swallowing the whole screen leaves no room either way.
        let center = calculate_tooltip_position(screen.height / 2.0, 400.0, &screen);
        let dims = tooltip_dimensions(screen.device_class);
        assert_eq!(center.top, Some((screen.height - dims.max_height) / 2.0));
    }

    #[test]
    fn negative_measured_y_falls_back_to_center() {
        let screen = phone();
        let dims = tooltip_dimensions(screen.device_class);
        let placement = smart_tooltip_position("mystery", Some((-20.0, 40.0)), &screen);
        assert_eq!(placement.top, Some((screen.height - dims.max_height) / 2.0));
    }

    #[test]
    fn info_positions() {
        let screen = phone();
        assert_eq!(
            info_step_position(FallbackPosition::Top, &screen).top,
            Some(screen.safe_area.top + INFO_STEP_INSET)
        );
        assert_eq!(
            info_step_position(FallbackPosition::Bottom, &screen).bottom,
            Some(screen.safe_area.bottom + INFO_STEP_INSET)
        );
        assert!(info_step_position(FallbackPosition::Center, &screen).top.is_some());
    }

    #[test]
    fn spotlight_radius_clamps_to_minimum() {
        assert_eq!(spotlight_radius(Rect::new(0.0, 0.0, 10.0, 10.0)), 40.0);
        assert_eq!(spotlight_radius(Rect::new(0.0, 0.0, 200.0, 48.0)), 112.0);
    }

    #[test]
    fn rotation_recomputes_from_fresh_screen_info() {
        let portrait = ScreenInfo::classify(390.0, 844.0, Platform::Ios);
        let landscape = ScreenInfo::classify(844.0, 390.0, Platform::Ios);
        let a = smart_tooltip_position("community", None, &portrait);
        let b = smart_tooltip_position("community", None, &landscape);
        assert_eq!(a.top, Some(0.55 * 844.0));
        assert_eq!(b.top, Some(0.55 * 390.0));
    }
}
