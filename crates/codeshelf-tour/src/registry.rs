#![forbid(unsafe_code)]

//! Target registry: logical names → measurable UI handles.
//!
//! Screens register their spotlight targets and scroll hosts on mount; the
//! tour engine looks them up by name when a step activates. The registry is
//! an explicit object created by the app root and passed by handle to both
//! sides — there is no ambient global.
//!
//! # Invariants
//!
//! 1. The registry never extends a handle's lifetime: entries are `Weak`,
//!    and a handle whose screen unmounted behaves as unregistered.
//! 2. Last registration for a name wins; re-mounting a screen overwrites
//!    its previous entries, nothing merges.
//! 3. Lookups racing registration are benign: navigation plus the settle
//!    wait guarantee the owning screen mounted before the engine asks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use codeshelf_core::geometry::Rect;
use thiserror::Error;

/// Why a measurement failed.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("target is not attached to a window")]
    Detached,

    #[error("measurement unavailable: {message}")]
    Unavailable { message: String },
}

impl MeasureError {
    /// Construct an availability failure with a free-form message.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// A UI element that can report its on-screen frame.
pub trait Measurable: Send + Sync {
    /// Measure the element's current frame in screen coordinates.
    fn measure(&self) -> Result<Rect, MeasureError>;
}

/// A scrollable container that can be driven to an offset.
///
/// `scroll_to` is fire-and-forget; the platform primitive exposes no
/// completion callback, which is why the engine waits on a settle signal
/// or deadline after calling it.
pub trait Scrollable: Send + Sync {
    /// Scroll so the given vertical offset is at the top of the viewport.
    fn scroll_to(&self, offset: f32, animated: bool);
}

#[derive(Default)]
struct RegistryState {
    /// target name → (owning screen, handle)
    targets: HashMap<String, (String, Weak<dyn Measurable>)>,
    /// screen name → scroll host
    scroll_hosts: HashMap<String, Weak<dyn Scrollable>>,
}

/// Shared lookup from logical names to live UI handles.
#[derive(Default)]
pub struct TargetRegistry {
    state: Mutex<RegistryState>,
}

impl std::fmt::Debug for TargetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("TargetRegistry")
            .field("targets", &state.targets.len())
            .field("scroll_hosts", &state.scroll_hosts.len())
            .finish()
    }
}

impl TargetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spotlight target. The registry stores only a weak
    /// reference; the screen keeps ownership.
    pub fn register(&self, screen: &str, name: &str, handle: &Arc<dyn Measurable>) {
        let mut state = self.lock();
        state
            .targets
            .insert(name.to_string(), (screen.to_string(), Arc::downgrade(handle)));
    }

    /// Register a screen's scroll host.
    pub fn register_scroll_host(&self, screen: &str, handle: &Arc<dyn Scrollable>) {
        let mut state = self.lock();
        state
            .scroll_hosts
            .insert(screen.to_string(), Arc::downgrade(handle));
    }

    /// Drop every entry a screen registered (called on unmount; optional,
    /// since dead weak refs already behave as unregistered).
    pub fn unregister_screen(&self, screen: &str) {
        let mut state = self.lock();
        state.targets.retain(|_, (owner, _)| owner != screen);
        state.scroll_hosts.remove(screen);
    }

    /// Resolve a target by logical name. Returns `None` for unknown names
    /// and for handles whose owner has unmounted.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Measurable>> {
        let state = self.lock();
        state.targets.get(name).and_then(|(_, weak)| weak.upgrade())
    }

    /// Resolve a screen's scroll host.
    #[must_use]
    pub fn scroll_host(&self, screen: &str) -> Option<Arc<dyn Scrollable>> {
        let state = self.lock();
        state.scroll_hosts.get(screen).and_then(Weak::upgrade)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
