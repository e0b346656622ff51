#![forbid(unsafe_code)]

//! Guided onboarding tour engine.
//!
//! # Role in Codeshelf
//! Sequences the first-launch walkthrough: navigates between screens,
//! scrolls targets into view, measures them, and publishes the state the
//! overlay paints (dim backdrop, spotlight ring, tooltip card).
//!
//! # Primary responsibilities
//! - **TourEngine**: the step state machine, tick-driven and preemptible.
//! - **Positioning policy**: curated per-step tooltip placements with a
//!   generic geometric fallback.
//! - **TargetRegistry**: injected name → handle lookup populated by screens.
//! - **OnboardingStore**: the three persisted flags, version-aware.
//! - **OverlayModel**: deterministic animation state for the renderer.
//!
//! # Design constraints
//! The tour is a non-critical enhancement layer: every failure inside it
//! (missing handle, failed measurement, broken storage) degrades to "the
//! tour continues, possibly without precise highlighting" and is logged,
//! never surfaced. Nothing here may block core app usage.

pub mod engine;
pub mod overlay;
pub mod persist;
pub mod placement;
pub mod registry;
pub mod step;

pub use engine::{TourEngine, TourEngineConfig, TourEvent, TourPhase, TourWarning};
pub use overlay::{OverlayFrame, OverlayModel, SpotlightRing, TooltipCard};
pub use persist::{OnboardingStatus, OnboardingStore};
pub use placement::{TooltipDimensions, VerticalPlacement};
pub use registry::{MeasureError, Measurable, Scrollable, TargetRegistry};
pub use step::{FallbackPosition, TourStep, default_steps};
