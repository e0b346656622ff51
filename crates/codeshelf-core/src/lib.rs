#![forbid(unsafe_code)]

//! Core: geometry, screen classification, input events, and animation.
//!
//! # Role in Codeshelf
//! `codeshelf-core` is the dependency-light leaf crate. It owns the value
//! types every other crate speaks in: screen-space geometry, viewport
//! classification, touch events, the swipe recognizer, and the deterministic
//! animation primitives the overlay composes.
//!
//! # Primary responsibilities
//! - **ScreenInfo**: pure viewport → device-class/safe-area classification.
//! - **SwipeRecognizer**: displacement-based horizontal swipe detection.
//! - **Animation**: tick-driven, time-deterministic fade/pulse/tween values.
//!
//! # How it fits in the system
//! The tour engine (`codeshelf-tour`) consumes these types to sequence steps
//! and publish overlay state. Nothing in this crate performs I/O or holds
//! global state.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod screen;

pub use event::{TouchEvent, TouchPhase, ViewportChange};
pub use geometry::{EdgeInsets, Point, Rect};
pub use gesture::{SwipeConfig, SwipeEvent, SwipeRecognizer};
pub use screen::{DeviceClass, Platform, ScreenInfo};
