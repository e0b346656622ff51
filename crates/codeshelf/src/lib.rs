#![forbid(unsafe_code)]

//! Codeshelf: a pocket reference library with a guided onboarding tour.
//!
//! This umbrella crate re-exports the workspace's public surface:
//!
//! - [`core`] — geometry, screen classification, gestures, animation.
//! - [`catalog`] — the in-memory reference content and favorites.
//! - [`nav`] — the tab/stack navigation host.
//! - [`store`] — flat key-value persistence.
//! - [`tour`] — the onboarding tour engine and overlay model.
//!
//! # Wiring example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! use codeshelf::nav::{NavHost, TabSpec};
//! use codeshelf::store::MemoryStore;
//! use codeshelf::tour::{TargetRegistry, TourEngine, TourEngineConfig, default_steps};
//! use codeshelf::core::screen::{Platform, ScreenInfo};
//!
//! let registry = Arc::new(TargetRegistry::new());
//! let nav = Arc::new(NavHost::new(vec![
//!     TabSpec::new("Home", &["Home", "Browse"]),
//!     TabSpec::new("Community", &["Community"]),
//!     TabSpec::new("Assistant", &["Assistant"]),
//! ]));
//!
//! let mut engine = TourEngine::new(
//!     TourEngineConfig {
//!         steps: default_steps(),
//!         app_version: "1.0".to_string(),
//!         screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
//!     },
//!     registry,
//!     Arc::new(MemoryStore::new()),
//! )
//! .with_navigator(nav);
//!
//! let events = engine.start(Instant::now());
//! assert!(!events.is_empty());
//! ```

pub use codeshelf_catalog as catalog;
pub use codeshelf_core as core;
pub use codeshelf_nav as nav;
pub use codeshelf_store as store;
pub use codeshelf_tour as tour;
