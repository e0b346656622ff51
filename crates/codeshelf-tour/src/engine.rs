#![forbid(unsafe_code)]

//! The tour state machine.
//!
//! Phases run `Inactive → Active(step) → Finishing → Completed`. Within a
//! step, a sub-procedure sequences navigation, scroll, and measurement
//! before arming the spotlight. All waiting is a single stored deadline
//! polled by [`tick`](TourEngine::tick): there are no background timers to
//! leak, and dropping the engine cancels everything.
//!
//! # Invariants
//!
//! 1. `step_index` is always within `0..step_count` while active; `next`
//!    at the last step completes, it never increments past the bound.
//! 2. The spotlight never arms before its step's positioning resolved —
//!    entering a step always clears `spotlight_ready` first, so a stale
//!    highlight can't flash at the wrong coordinates.
//! 3. At most one wait is pending at a time. Entering a step (or finishing
//!    the tour) clears any in-flight wait before arming a new one, so a
//!    preempted step's timer can never fire into the new step.
//! 4. The step-entry procedure cannot fail: every internal error degrades
//!    to "arm the spotlight anyway" and a logged [`TourWarning`].
//!
//! # Timing
//!
//! Navigation and scroll primitives are fire-and-forget, so the engine
//! waits for the embedder's settle notification when one exists and falls
//! back to a fixed deadline otherwise (400 ms after navigation, 700 ms
//! after scroll — the source platform's transition and scroll animations
//! comfortably fit). The deadline is an upper bound, not the mechanism:
//! ticks arriving arbitrarily late still arm the spotlight.

use std::sync::Arc;
use std::time::{Duration, Instant};

use codeshelf_core::event::{TouchEvent, ViewportChange};
use codeshelf_core::geometry::Rect;
use codeshelf_core::gesture::{SwipeEvent, SwipeRecognizer};
use codeshelf_core::screen::{DeviceClass, Platform, ScreenInfo};
use codeshelf_nav::{Navigator, RouteParams};
use codeshelf_store::KeyValueStore;

use crate::persist::OnboardingStore;
use crate::registry::TargetRegistry;
use crate::step::{TourStep, requires_scroll};

/// Upper bound on the navigation transition animation.
pub const NAVIGATION_SETTLE: Duration = Duration::from_millis(400);
/// Upper bound on the scroll animation.
pub const SCROLL_SETTLE: Duration = Duration::from_millis(700);
/// Overlay fade-out before the tour unmounts.
pub const COMPLETION_FADE: Duration = Duration::from_millis(300);

/// Scroll padding above the target, by device tier.
#[must_use]
pub fn scroll_padding(class: DeviceClass) -> f32 {
    match class {
        DeviceClass::SmallPhone => 80.0,
        DeviceClass::Tablet => 140.0,
        DeviceClass::LargePhone => 100.0,
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lifecycle phase of the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPhase {
    /// Not started (or persisted state says it shouldn't run).
    Inactive,
    /// Showing a step.
    Active,
    /// Completion fade in progress; overlay still mounted.
    Finishing,
    /// Done; overlay may unmount.
    Completed,
}

/// Observable engine transitions, returned from every command and tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourEvent {
    /// The tour activated at the given step.
    Started { step: &'static str },
    /// The visible step changed.
    StepChanged {
        from: &'static str,
        to: &'static str,
    },
    /// Positioning resolved; the spotlight may render.
    SpotlightArmed { step: &'static str },
    /// The tour is completing (fade started). `skipped` distinguishes the
    /// skip control from reaching the end.
    CompletionRequested { skipped: bool },
    /// The fade elapsed; the overlay should unmount.
    Dismissed,
}

/// Non-fatal degradations, logged and retained for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourWarning {
    /// No scroll host registered for the step's screen.
    MissingScrollHost { screen: String },
    /// No live target handle under the step's logical name.
    MissingTarget { name: String },
    /// The handle existed but measurement failed.
    MeasureFailed { name: String, message: String },
}

#[derive(Debug, Clone, Copy)]
enum PendingWait {
    NavigationSettle { deadline: Instant },
    ScrollSettle { deadline: Instant },
    CompletionFade { deadline: Instant },
}

/// Static configuration handed to [`TourEngine::new`].
#[derive(Debug, Clone)]
pub struct TourEngineConfig {
    /// The storyboard; must not be empty.
    pub steps: Vec<TourStep>,
    /// Current app version, compared against the persisted one.
    pub app_version: String,
    /// Initial viewport snapshot.
    pub screen: ScreenInfo,
}

// ---------------------------------------------------------------------------
// TourEngine
// ---------------------------------------------------------------------------

/// The onboarding tour state machine.
pub struct TourEngine {
    steps: Vec<TourStep>,
    registry: Arc<TargetRegistry>,
    navigator: Option<Arc<dyn Navigator>>,
    store: OnboardingStore,
    app_version: String,
    screen: ScreenInfo,

    phase: TourPhase,
    current: usize,
    spotlight_ready: bool,
    target_rect: Option<Rect>,
    pending: Option<PendingWait>,
    swipe: SwipeRecognizer,
    warnings: Vec<TourWarning>,
}

impl std::fmt::Debug for TourEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourEngine")
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("spotlight_ready", &self.spotlight_ready)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl TourEngine {
    /// Create an engine over its collaborators.
    ///
    /// # Panics
    ///
    /// Panics if `config.steps` is empty — an empty storyboard is a wiring
    /// defect in the app shell, not a runtime condition.
    #[must_use]
    pub fn new(
        config: TourEngineConfig,
        registry: Arc<TargetRegistry>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        assert!(
            !config.steps.is_empty(),
            "TourEngine requires a non-empty storyboard"
        );
        Self {
            steps: config.steps,
            registry,
            navigator: None,
            store: OnboardingStore::new(store),
            app_version: config.app_version,
            screen: config.screen,
            phase: TourPhase::Inactive,
            current: 0,
            spotlight_ready: false,
            target_rect: None,
            pending: None,
            swipe: SwipeRecognizer::default(),
            warnings: Vec::new(),
        }
    }

    /// Attach the navigation handle (builder pattern). Without one, steps
    /// that declare a navigation target skip the navigate call.
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    // -- accessors ----------------------------------------------------------

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    /// Index of the visible step.
    #[inline]
    #[must_use]
    pub fn step_index(&self) -> usize {
        self.current
    }

    /// Total number of steps.
    #[inline]
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The visible step, while the overlay is mounted.
    #[must_use]
    pub fn current_step(&self) -> Option<&TourStep> {
        matches!(self.phase, TourPhase::Active | TourPhase::Finishing)
            .then(|| &self.steps[self.current])
    }

    /// Whether the spotlight may render for the current step.
    #[inline]
    #[must_use]
    pub fn is_spotlight_ready(&self) -> bool {
        self.spotlight_ready
    }

    /// Measured frame of the current step's target, if any.
    #[inline]
    #[must_use]
    pub fn target_rect(&self) -> Option<Rect> {
        self.target_rect
    }

    /// Last-observed viewport snapshot.
    #[inline]
    #[must_use]
    pub fn screen(&self) -> ScreenInfo {
        self.screen
    }

    /// Degradations recorded so far (diagnostics; the tour never stops
    /// over them).
    #[must_use]
    pub fn warnings(&self) -> &[TourWarning] {
        &self.warnings
    }

    // -- commands -----------------------------------------------------------

    /// Activate the tour if persisted state says it should run.
    ///
    /// No-op unless the engine is `Inactive`. Returns the events produced;
    /// an empty vec means the tour stayed down.
    pub fn start(&mut self, now: Instant) -> Vec<TourEvent> {
        let mut events = Vec::new();
        if self.phase != TourPhase::Inactive {
            return events;
        }
        let status = self.store.load();
        if !status.should_show(&self.app_version) {
            return events;
        }

        self.phase = TourPhase::Active;
        self.current = 0;
        events.push(TourEvent::Started {
            step: self.steps[0].id,
        });
        self.enter_step(now, &mut events);
        events
    }

    /// Advance to the next step, or complete at the last one.
    pub fn next(&mut self, now: Instant) -> Vec<TourEvent> {
        let mut events = Vec::new();
        if self.phase != TourPhase::Active {
            return events;
        }
        if self.current + 1 >= self.steps.len() {
            self.finish(now, false, &mut events);
            return events;
        }
        let from = self.steps[self.current].id;
        self.current += 1;
        events.push(TourEvent::StepChanged {
            from,
            to: self.steps[self.current].id,
        });
        self.enter_step(now, &mut events);
        events
    }

    /// Go back one step. No-op at the first step.
    pub fn previous(&mut self, now: Instant) -> Vec<TourEvent> {
        let mut events = Vec::new();
        if self.phase != TourPhase::Active || self.current == 0 {
            return events;
        }
        let from = self.steps[self.current].id;
        self.current -= 1;
        events.push(TourEvent::StepChanged {
            from,
            to: self.steps[self.current].id,
        });
        self.enter_step(now, &mut events);
        events
    }

    /// Dismiss the tour immediately (same path as reaching the end).
    pub fn skip(&mut self, now: Instant) -> Vec<TourEvent> {
        let mut events = Vec::new();
        if self.phase == TourPhase::Active {
            self.finish(now, true, &mut events);
        }
        events
    }

    /// Feed a raw touch sample. A qualifying left swipe advances, a right
    /// swipe retreats.
    pub fn handle_touch(&mut self, event: &TouchEvent, now: Instant) -> Vec<TourEvent> {
        match self.swipe.process(event) {
            Some(SwipeEvent::Left) => self.next(now),
            Some(SwipeEvent::Right) => self.previous(now),
            None => Vec::new(),
        }
    }

    /// Record a new viewport snapshot (resize/orientation). Mutates render
    /// state only; never touches step sequencing.
    pub fn set_screen_info(&mut self, screen: ScreenInfo) {
        self.screen = screen;
    }

    /// Convenience for the dimension-change subscription: reclassify the
    /// viewport and store the fresh snapshot.
    pub fn handle_viewport_change(&mut self, change: ViewportChange, platform: Platform) {
        self.set_screen_info(ScreenInfo::classify(change.width, change.height, platform));
    }

    /// The embedder observed the navigation transition finish. Completes a
    /// pending navigation wait ahead of its deadline.
    pub fn notify_navigation_settled(&mut self, now: Instant) -> Vec<TourEvent> {
        let mut events = Vec::new();
        if let Some(PendingWait::NavigationSettle { .. }) = self.pending {
            self.pending = None;
            self.position_step(now, &mut events);
        }
        events
    }

    /// The embedder observed the scroll animation finish. Completes a
    /// pending scroll wait ahead of its deadline.
    pub fn notify_scroll_settled(&mut self, _now: Instant) -> Vec<TourEvent> {
        let mut events = Vec::new();
        if let Some(PendingWait::ScrollSettle { .. }) = self.pending {
            self.pending = None;
            self.arm_spotlight(&mut events);
        }
        events
    }

    /// Poll pending deadlines. Call on every frame/tick; late calls are
    /// fine — a deadline long past still fires exactly once.
    pub fn tick(&mut self, now: Instant) -> Vec<TourEvent> {
        let mut events = Vec::new();
        match self.pending {
            Some(PendingWait::NavigationSettle { deadline }) if now >= deadline => {
                self.pending = None;
                self.position_step(now, &mut events);
            }
            Some(PendingWait::ScrollSettle { deadline }) if now >= deadline => {
                self.pending = None;
                self.arm_spotlight(&mut events);
            }
            Some(PendingWait::CompletionFade { deadline }) if now >= deadline => {
                self.pending = None;
                self.phase = TourPhase::Completed;
                events.push(TourEvent::Dismissed);
            }
            _ => {}
        }
        events
    }

    // -- step-entry procedure ----------------------------------------------

    /// Steps 1–2 of the entry procedure: reset spotlight state, preempt any
    /// in-flight wait, then navigate (with settle wait) or position
    /// immediately.
    fn enter_step(&mut self, now: Instant, events: &mut Vec<TourEvent>) {
        self.pending = None;
        self.spotlight_ready = false;
        self.target_rect = None;
        self.store.record_step(self.current);

        let step = &self.steps[self.current];
        if let Some(screen_name) = step.navigation_target
            && let Some(navigator) = &self.navigator
        {
            navigator.navigate_to(screen_name, RouteParams::new());
            self.pending = Some(PendingWait::NavigationSettle {
                deadline: now + NAVIGATION_SETTLE,
            });
            return;
        }
        self.position_step(now, events);
    }

    /// Steps 3–6: scroll the target into view when the step needs it, then
    /// arm. Every failure lands in the step-3 fallback (arm immediately).
    fn position_step(&mut self, now: Instant, events: &mut Vec<TourEvent>) {
        let step = &self.steps[self.current];
        if !requires_scroll(step.id) {
            // Best effort: measure a target that's already on screen so the
            // ring has a center, but never wait for it.
            if let Some(name) = step.target {
                match self.resolve_and_measure(name) {
                    Ok(rect) => self.target_rect = Some(rect),
                    Err(warning) => self.warn(warning),
                }
            }
            self.arm_spotlight(events);
            return;
        }

        match self.prepare_scroll() {
            Ok(()) => {
                self.pending = Some(PendingWait::ScrollSettle {
                    deadline: now + SCROLL_SETTLE,
                });
            }
            Err(warning) => {
                self.warn(warning);
                self.arm_spotlight(events);
            }
        }
    }

    /// Resolve handles, measure, and issue the scroll for the current step.
    fn prepare_scroll(&mut self) -> Result<(), TourWarning> {
        let step = &self.steps[self.current];
        let screen_name = step
            .navigation_target
            .map(str::to_string)
            .or_else(|| self.navigator.as_ref().map(|n| n.current_route()))
            .ok_or_else(|| TourWarning::MissingScrollHost {
                screen: "<unknown>".to_string(),
            })?;

        let host = self
            .registry
            .scroll_host(&screen_name)
            .ok_or(TourWarning::MissingScrollHost {
                screen: screen_name,
            })?;

        let name = step.target.ok_or(TourWarning::MissingTarget {
            name: step.id.to_string(),
        })?;
        let rect = self.resolve_and_measure(name)?;
        self.target_rect = Some(rect);

        let offset = (rect.y - scroll_padding(self.screen.device_class)).max(0.0);
        host.scroll_to(offset, true);
        Ok(())
    }

    fn resolve_and_measure(&self, name: &str) -> Result<Rect, TourWarning> {
        let handle = self
            .registry
            .lookup(name)
            .ok_or_else(|| TourWarning::MissingTarget {
                name: name.to_string(),
            })?;
        handle.measure().map_err(|err| TourWarning::MeasureFailed {
            name: name.to_string(),
            message: err.to_string(),
        })
    }

    /// Step 7 converges here from every path.
    fn arm_spotlight(&mut self, events: &mut Vec<TourEvent>) {
        self.spotlight_ready = true;
        events.push(TourEvent::SpotlightArmed {
            step: self.steps[self.current].id,
        });
    }

    fn finish(&mut self, now: Instant, skipped: bool, events: &mut Vec<TourEvent>) {
        self.store.mark_completed(&self.app_version);
        self.phase = TourPhase::Finishing;
        self.spotlight_ready = false;
        self.pending = Some(PendingWait::CompletionFade {
            deadline: now + COMPLETION_FADE,
        });
        events.push(TourEvent::CompletionRequested { skipped });
    }

    fn warn(&mut self, warning: TourWarning) {
        tracing::warn!(?warning, "tour step degraded, continuing without it");
        self.warnings.push(warning);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use codeshelf_store::MemoryStore;

    fn engine() -> TourEngine {
        TourEngine::new(
            TourEngineConfig {
                steps: crate::step::default_steps(),
                app_version: "1.0".to_string(),
                screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
            },
            Arc::new(TargetRegistry::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    fn t0() -> Instant {
        Instant::now()
    }

    #[test]
    fn starts_at_step_zero_when_fresh() {
        let mut eng = engine();
        let events = eng.start(t0());
        assert_eq!(eng.phase(), TourPhase::Active);
        assert_eq!(eng.step_index(), 0);
        assert!(matches!(events[0], TourEvent::Started { step: "welcome" }));
        // welcome has no navigation and no scroll: armed immediately.
        assert!(eng.is_spotlight_ready());
    }

    #[test]
    fn start_is_noop_when_completed_on_same_version() {
        let store = Arc::new(MemoryStore::new());
        OnboardingStore::new(store.clone()).mark_completed("1.0");

        let mut eng = TourEngine::new(
            TourEngineConfig {
                steps: crate::step::default_steps(),
                app_version: "1.0".to_string(),
                screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
            },
            Arc::new(TargetRegistry::new()),
            store,
        );
        assert!(eng.start(t0()).is_empty());
        assert_eq!(eng.phase(), TourPhase::Inactive);
    }

    #[test]
    fn version_mismatch_replays() {
        let store = Arc::new(MemoryStore::new());
        OnboardingStore::new(store.clone()).mark_completed("1.0");

        let mut eng = TourEngine::new(
            TourEngineConfig {
                steps: crate::step::default_steps(),
                app_version: "1.1".to_string(),
                screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
            },
            Arc::new(TargetRegistry::new()),
            store,
        );
        assert!(!eng.start(t0()).is_empty());
        assert_eq!(eng.phase(), TourPhase::Active);
    }

    #[test]
    fn previous_at_first_step_is_noop() {
        let mut eng = engine();
        eng.start(t0());
        assert!(eng.previous(t0()).is_empty());
        assert_eq!(eng.step_index(), 0);
    }

    #[test]
    fn next_at_last_step_completes_not_increments() {
        let mut eng = engine();
        let now = t0();
        eng.start(now);
        let last = eng.step_count() - 1;
        // Walk to the last step; each entry may park a settle wait, which
        // the next command preempts.
        for _ in 0..last {
            eng.next(now);
        }
        assert_eq!(eng.step_index(), last);

        let events = eng.next(now);
        assert_eq!(eng.phase(), TourPhase::Finishing);
        assert_eq!(eng.step_index(), last);
        assert!(events.contains(&TourEvent::CompletionRequested { skipped: false }));

        // Fade elapses → Completed.
        let events = eng.tick(now + COMPLETION_FADE);
        assert!(events.contains(&TourEvent::Dismissed));
        assert_eq!(eng.phase(), TourPhase::Completed);
    }

    #[test]
    fn skip_completes_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut eng = TourEngine::new(
            TourEngineConfig {
                steps: crate::step::default_steps(),
                app_version: "2.3".to_string(),
                screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
            },
            Arc::new(TargetRegistry::new()),
            store.clone(),
        );
        let now = t0();
        eng.start(now);
        let events = eng.skip(now);
        assert!(events.contains(&TourEvent::CompletionRequested { skipped: true }));

        let status = OnboardingStore::new(store).load();
        assert!(status.completed);
        assert_eq!(status.version.as_deref(), Some("2.3"));
    }

    #[test]
    fn commands_after_finishing_are_noops() {
        let mut eng = engine();
        let now = t0();
        eng.start(now);
        eng.skip(now);
        assert!(eng.next(now).is_empty());
        assert!(eng.previous(now).is_empty());
        assert!(eng.skip(now).is_empty());
    }

    #[test]
    fn spotlight_resets_on_every_step_change() {
        let mut eng = engine();
        let now = t0();
        eng.start(now);
        assert!(eng.is_spotlight_ready());

        // Entering quick-access (no navigator attached, but scrollable with
        // no registered host) clears readiness, then fails open to ready.
        let events = eng.next(now);
        assert!(
            events.contains(&TourEvent::SpotlightArmed {
                step: "quick-access"
            })
        );
        assert!(eng.is_spotlight_ready());
        assert!(
            eng.warnings()
                .iter()
                .any(|w| matches!(w, TourWarning::MissingScrollHost { .. }))
        );
    }

    #[test]
    fn resize_updates_snapshot_only() {
        let mut eng = engine();
        let now = t0();
        eng.start(now);
        let index = eng.step_index();
        eng.set_screen_info(ScreenInfo::classify(844.0, 390.0, Platform::Ios));
        assert_eq!(eng.step_index(), index);
        assert_eq!(eng.screen().width, 844.0);
    }

    #[test]
    fn viewport_change_reclassifies() {
        let mut eng = engine();
        eng.handle_viewport_change(
            ViewportChange {
                width: 834.0,
                height: 1194.0,
            },
            Platform::Ios,
        );
        assert_eq!(eng.screen().device_class, DeviceClass::Tablet);
        assert_eq!(eng.screen().safe_area.top, 44.0);
    }

    #[test]
    #[should_panic(expected = "non-empty storyboard")]
    fn empty_storyboard_is_a_wiring_defect() {
        let _ = TourEngine::new(
            TourEngineConfig {
                steps: Vec::new(),
                app_version: "1.0".to_string(),
                screen: ScreenInfo::classify(390.0, 844.0, Platform::Ios),
            },
            Arc::new(TargetRegistry::new()),
            Arc::new(MemoryStore::new()),
        );
    }
}
