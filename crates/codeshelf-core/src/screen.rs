#![forbid(unsafe_code)]

//! Viewport classification: device class and safe-area computation.
//!
//! [`ScreenInfo::classify`] is a pure function over the current viewport.
//! It never caches: callers re-invoke it on every resize or orientation
//! change and thread the snapshot through whatever needs it.
//!
//! # Invariants
//!
//! 1. Classification is deterministic given (width, height, platform).
//! 2. Thresholds are inclusive: width ≥ 768 ⇒ tablet, width ≥ 600 ⇒ large
//!    phone, otherwise small phone.
//! 3. The bottom safe area always reserves the tab bar plus its margin.

use crate::geometry::EdgeInsets;

/// Minimum width for the tablet tier.
pub const TABLET_MIN_WIDTH: f32 = 768.0;
/// Minimum width for the large-phone tier.
pub const LARGE_PHONE_MIN_WIDTH: f32 = 600.0;

/// Status-bar height on Android-family devices.
pub const STATUS_BAR_ANDROID: f32 = 24.0;
/// Status-bar height on iOS-family devices.
pub const STATUS_BAR_IOS: f32 = 44.0;
/// Fixed tab-bar height at the bottom of every screen.
pub const TAB_BAR_HEIGHT: f32 = 56.0;
/// Breathing room above the tab bar.
pub const TAB_BAR_MARGIN: f32 = 10.0;

/// Platform family, used only for the status-bar height table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Android-family: 24 px status bar.
    Android,
    /// iOS-family: 44 px status bar.
    Ios,
}

/// Coarse device tier derived from viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Width below 600 px.
    SmallPhone,
    /// Width in [600, 768).
    LargePhone,
    /// Width ≥ 768 px.
    Tablet,
}

impl DeviceClass {
    /// Classify a viewport width into a device tier.
    #[must_use]
    pub fn from_width(width: f32) -> Self {
        if width >= TABLET_MIN_WIDTH {
            Self::Tablet
        } else if width >= LARGE_PHONE_MIN_WIDTH {
            Self::LargePhone
        } else {
            Self::SmallPhone
        }
    }
}

/// Snapshot of the current viewport: dimensions, tier, and safe area.
///
/// Ephemeral by design — recompute on every dimension change rather than
/// holding a stale copy across rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenInfo {
    /// Viewport width in logical pixels.
    pub width: f32,
    /// Viewport height in logical pixels.
    pub height: f32,
    /// Device tier derived from width.
    pub device_class: DeviceClass,
    /// Region reserved by system chrome and the tab bar.
    pub safe_area: EdgeInsets,
}

impl ScreenInfo {
    /// Classify the current viewport. Pure and deterministic.
    #[must_use]
    pub fn classify(width: f32, height: f32, platform: Platform) -> Self {
        let status_bar = match platform {
            Platform::Android => STATUS_BAR_ANDROID,
            Platform::Ios => STATUS_BAR_IOS,
        };
        Self {
            width,
            height,
            device_class: DeviceClass::from_width(width),
            safe_area: EdgeInsets::vertical(status_bar, TAB_BAR_HEIGHT + TAB_BAR_MARGIN),
        }
    }

    /// Height available between the safe-area edges.
    #[must_use]
    pub fn usable_height(&self) -> f32 {
        (self.height - self.safe_area.top - self.safe_area.bottom).max(0.0)
    }
}
