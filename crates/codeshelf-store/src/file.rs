#![forbid(unsafe_code)]

//! JSON-file key-value backend.
//!
//! The whole store is one JSON object on disk. Every write serializes the
//! full map to a sibling temp file and renames it over the original, so a
//! crash mid-write leaves either the old document or the new one, never a
//! torn file.
//!
//! # Failure Modes
//!
//! - A missing file reads as an empty store (first launch).
//! - A corrupt document surfaces as [`StoreError::Serde`]; callers above
//!   this crate decide whether that degrades to defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{KeyValueStore, Result};

/// A store persisted as a single JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles between handles sharing one path.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by the given path. The file is created lazily
    /// on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_document(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_document()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_document(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_document()?;
        if entries.remove(key).is_some() {
            self.write_document(&entries)?;
        }
        Ok(())
    }
}
