#![forbid(unsafe_code)]

//! Navigation host: tabs → stacks → screens.
//!
//! # Role in Codeshelf
//! The shell is a tab bar where each tab owns a stack of routes. Screens
//! are addressed by name; [`NavHost::navigate_to`] switches to the owning
//! tab and pushes the route. The tour engine drives navigation through the
//! [`Navigator`] trait so tests can substitute a recording fake.
//!
//! # Invariants
//!
//! 1. Every tab's stack always holds at least its root route.
//! 2. `current_route()` is the top of the active tab's stack.
//! 3. Navigating to a screen already on top replaces its params instead of
//!    stacking a duplicate.
//! 4. Unknown screen names are a logged no-op — navigation is fire-and-forget
//!    with no completion signal, and a bad route must not take the caller
//!    down with it.

use std::collections::BTreeMap;
use std::sync::Mutex;

/// Query-style parameters carried by a route.
pub type RouteParams = BTreeMap<String, String>;

/// One entry in a tab's stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Screen name, unique across the whole host.
    pub screen: String,
    /// Parameters handed to the screen on mount.
    pub params: RouteParams,
}

impl Route {
    /// Create a parameterless route.
    #[must_use]
    pub fn new(screen: impl Into<String>) -> Self {
        Self {
            screen: screen.into(),
            params: RouteParams::new(),
        }
    }
}

/// Imperative navigation consumed by the tour engine.
///
/// `navigate_to` is fire-and-forget: the host offers no completion signal,
/// which is why callers that must observe the destination wait for an
/// explicit settle notification or a deadline.
pub trait Navigator: Send + Sync {
    /// Navigate to a named screen, switching tabs if necessary.
    fn navigate_to(&self, screen: &str, params: RouteParams);

    /// Name of the currently visible screen.
    fn current_route(&self) -> String;
}

/// Declarative description of one tab.
#[derive(Debug, Clone)]
pub struct TabSpec {
    /// Tab name (e.g. `"Home"`).
    pub name: String,
    /// Screens owned by this tab; the first is the tab's root.
    pub screens: Vec<String>,
}

impl TabSpec {
    /// Create a tab owning the given screens. The first screen is the root.
    #[must_use]
    pub fn new(name: impl Into<String>, screens: &[&str]) -> Self {
        Self {
            name: name.into(),
            screens: screens.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[derive(Debug)]
struct TabState {
    name: String,
    screens: Vec<String>,
    stack: Vec<Route>,
}

#[derive(Debug)]
struct NavState {
    tabs: Vec<TabState>,
    active: usize,
}

/// The navigation host. Created once at app start and shared by handle;
/// screens and the tour engine hold the same instance.
#[derive(Debug)]
pub struct NavHost {
    state: Mutex<NavState>,
}

impl NavHost {
    /// Build a host from tab specs.
    ///
    /// # Panics
    ///
    /// Panics if `tabs` is empty or any tab has no screens — that is a
    /// wiring defect in the app shell, not a runtime condition.
    #[must_use]
    pub fn new(tabs: Vec<TabSpec>) -> Self {
        assert!(!tabs.is_empty(), "NavHost requires at least one tab");
        let tabs = tabs
            .into_iter()
            .map(|spec| {
                assert!(
                    !spec.screens.is_empty(),
                    "tab {:?} declares no screens",
                    spec.name
                );
                let root = Route::new(spec.screens[0].clone());
                TabState {
                    name: spec.name,
                    screens: spec.screens,
                    stack: vec![root],
                }
            })
            .collect();
        Self {
            state: Mutex::new(NavState { tabs, active: 0 }),
        }
    }

    /// Name of the active tab.
    #[must_use]
    pub fn active_tab(&self) -> String {
        let state = self.lock();
        state.tabs[state.active].name.clone()
    }

    /// Pop the active tab's stack. The root route is never popped.
    pub fn pop(&self) {
        let mut state = self.lock();
        let active = state.active;
        let stack = &mut state.tabs[active].stack;
        if stack.len() > 1 {
            stack.pop();
        }
    }

    /// Switch to a tab by name without touching its stack.
    pub fn switch_tab(&self, name: &str) {
        let mut state = self.lock();
        match state.tabs.iter().position(|t| t.name == name) {
            Some(idx) => state.active = idx,
            None => tracing::warn!(tab = name, "switch_tab: unknown tab"),
        }
    }

    /// Depth of the active tab's stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        let state = self.lock();
        state.tabs[state.active].stack.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Navigator for NavHost {
    fn navigate_to(&self, screen: &str, params: RouteParams) {
        let mut state = self.lock();
        let Some(tab_idx) = state.tabs.iter().position(|t| t.screens.iter().any(|s| s == screen))
        else {
            tracing::warn!(screen, "navigate_to: unknown screen, ignoring");
            return;
        };

        state.active = tab_idx;
        let stack = &mut state.tabs[tab_idx].stack;
        if let Some(top) = stack.last_mut()
            && top.screen == screen
        {
            top.params = params;
            return;
        }
        stack.push(Route {
            screen: screen.to_string(),
            params,
        });
    }

    fn current_route(&self) -> String {
        let state = self.lock();
        state.tabs[state.active]
            .stack
            .last()
            .map(|r| r.screen.clone())
            .unwrap_or_default()
    }
}
