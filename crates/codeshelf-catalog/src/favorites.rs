#![forbid(unsafe_code)]

//! Persisted favorites: the starred-language set.
//!
//! Stored as one comma-joined value under a single key. Storage failures
//! degrade to an empty set on read and are logged-and-swallowed on write —
//! losing a star is annoying, failing the screen over it is worse.

use std::collections::BTreeSet;
use std::sync::Arc;

use codeshelf_store::KeyValueStore;

const FAVORITES_KEY: &str = "favorite_languages";

/// Handle to the persisted favorites set.
pub struct Favorites {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Favorites").finish_non_exhaustive()
    }
}

impl Favorites {
    /// Create a favorites adapter over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the starred ids. Read failures yield an empty set.
    #[must_use]
    pub fn load(&self) -> BTreeSet<String> {
        match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Ok(None) => BTreeSet::new(),
            Err(err) => {
                tracing::warn!(error = %err, "favorites load failed, treating as empty");
                BTreeSet::new()
            }
        }
    }

    /// Whether a language is starred.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.load().contains(id)
    }

    /// Star/unstar a language. Returns the new starred state.
    pub fn toggle(&self, id: &str) -> bool {
        let mut set = self.load();
        let now_starred = if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        };
        self.save(&set);
        now_starred
    }

    fn save(&self, set: &BTreeSet<String>) {
        let joined = set.iter().cloned().collect::<Vec<_>>().join(",");
        if let Err(err) = self.store.set(FAVORITES_KEY, &joined) {
            tracing::warn!(error = %err, "favorites save failed, keeping in-memory state");
        }
    }
}
