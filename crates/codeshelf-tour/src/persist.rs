#![forbid(unsafe_code)]

//! Onboarding persistence: three flat flags behind a fail-open adapter.
//!
//! Storage may be broken on any given launch. The contract is asymmetric:
//! a read failure means "show the tour" (guidance beats silence), a write
//! failure is logged and forgotten (the user already saw the outcome; a
//! retry buys nothing). Nothing here returns an error to the caller.

use std::sync::Arc;

use codeshelf_store::KeyValueStore;

/// Key for the completion flag.
pub const KEY_COMPLETED: &str = "onboarding_completed";
/// Key for the most recently entered step index.
pub const KEY_LAST_STEP: &str = "onboarding_last_step";
/// Key for the app version that completed the tour.
pub const KEY_VERSION: &str = "onboarding_version";

/// Decoded persisted state, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OnboardingStatus {
    pub completed: bool,
    pub last_step: usize,
    /// Version that completed the tour, if any.
    pub version: Option<String>,
}

impl OnboardingStatus {
    /// Whether the tour should run: never completed, or completed by a
    /// different app version (deliberate replay-on-upgrade policy).
    #[must_use]
    pub fn should_show(&self, current_version: &str) -> bool {
        !self.completed || self.version.as_deref() != Some(current_version)
    }
}

/// Adapter over the key-value store for the three onboarding flags.
pub struct OnboardingStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for OnboardingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnboardingStore").finish_non_exhaustive()
    }
}

impl OnboardingStore {
    /// Create an adapter over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load persisted state. Each key is read independently; a missing or
    /// unreadable key yields its default, so a broken store means "not
    /// completed" and the tour runs.
    #[must_use]
    pub fn load(&self) -> OnboardingStatus {
        let completed = self
            .read(KEY_COMPLETED)
            .map(|v| v == "true")
            .unwrap_or(false);
        let last_step = self
            .read(KEY_LAST_STEP)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        let version = self.read(KEY_VERSION);

        OnboardingStatus {
            completed,
            last_step,
            version,
        }
    }

    /// Record the step the user most recently reached.
    pub fn record_step(&self, index: usize) {
        self.write(KEY_LAST_STEP, &index.to_string());
    }

    /// Mark the tour completed by the given app version.
    pub fn mark_completed(&self, version: &str) {
        self.write(KEY_COMPLETED, "true");
        self.write(KEY_VERSION, version);
    }

    /// Remove all onboarding flags. Idempotent: clearing an already-clear
    /// store succeeds.
    pub fn reset(&self) {
        for key in [KEY_COMPLETED, KEY_LAST_STEP, KEY_VERSION] {
            if let Err(err) = self.store.remove(key) {
                tracing::warn!(key, error = %err, "onboarding reset: remove failed, continuing");
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "onboarding read failed, using default");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            tracing::warn!(key, error = %err, "onboarding write failed, proceeding without retry");
        }
    }
}
