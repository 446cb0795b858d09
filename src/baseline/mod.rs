//! First-milestone baseline persistence.
//!
//! The baseline is captured once, the first time an assessment reaches the
//! completion threshold, and then held fixed so later reports can show drift
//! against it. Storage is a single JSON file; a missing or corrupt file reads
//! as "not captured yet" rather than failing the run.

use crate::error::{ReadinessError, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Snapshot of overall and per-theme ratios at capture time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineSnapshot {
    /// `None` until the baseline has been captured
    pub overall: Option<f64>,
    #[serde(default)]
    pub themes: IndexMap<String, f64>,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
}

impl BaselineSnapshot {
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.overall.is_some()
    }
}

/// Storage abstraction for the baseline snapshot.
pub trait BaselineStore {
    fn read(&self) -> Result<BaselineSnapshot>;
    fn write(&self, snapshot: &BaselineSnapshot) -> Result<()>;
    fn reset(&self) -> Result<()>;
}

/// File-backed store, one JSON document per file.
pub struct FileBaselineStore {
    path: PathBuf,
}

impl FileBaselineStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform data directory, falling back to the working directory when
    /// the platform reports none.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("readiness-tools")
            .join("baseline.json")
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BaselineStore for FileBaselineStore {
    fn read(&self) -> Result<BaselineSnapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BaselineSnapshot::default());
            }
            Err(err) => return Err(ReadinessError::io(&self.path, err)),
        };
        match serde_json::from_str(&content) {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "baseline file unreadable, treating as not captured"
                );
                Ok(BaselineSnapshot::default())
            }
        }
    }

    fn write(&self, snapshot: &BaselineSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| ReadinessError::io(parent, err))?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json).map_err(|err| ReadinessError::io(&self.path, err))
    }

    fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ReadinessError::io(&self.path, err)),
        }
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryBaselineStore {
    snapshot: Mutex<BaselineSnapshot>,
}

impl BaselineStore for MemoryBaselineStore {
    fn read(&self) -> Result<BaselineSnapshot> {
        self.snapshot
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| ReadinessError::baseline("baseline store poisoned"))
    }

    fn write(&self, snapshot: &BaselineSnapshot) -> Result<()> {
        self.snapshot
            .lock()
            .map(|mut guard| *guard = snapshot.clone())
            .map_err(|_| ReadinessError::baseline("baseline store poisoned"))
    }

    fn reset(&self) -> Result<()> {
        self.write(&BaselineSnapshot::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn snapshot() -> BaselineSnapshot {
        let mut themes = IndexMap::new();
        themes.insert("Governance".to_string(), 0.8123);
        themes.insert("Technology".to_string(), 0.65);
        BaselineSnapshot {
            overall: Some(0.7512),
            themes,
            captured_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_missing_file_reads_as_uncaptured() {
        let dir = TempDir::new().unwrap();
        let store = FileBaselineStore::new(dir.path().join("baseline.json"));
        let read = store.read().unwrap();
        assert!(!read.is_captured());
        assert!(read.themes.is_empty());
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = TempDir::new().unwrap();
        // Nested path exercises parent-directory creation
        let store = FileBaselineStore::new(dir.path().join("nested/baseline.json"));
        store.write(&snapshot()).unwrap();
        let read = store.read().unwrap();
        assert_eq!(read.overall, Some(0.7512));
        assert_eq!(read.themes.get("Governance"), Some(&0.8123));
        assert!(read.captured_at.is_some());
    }

    #[test]
    fn test_corrupt_file_reads_as_uncaptured() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("baseline.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = FileBaselineStore::new(&path);
        assert!(!store.read().unwrap().is_captured());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileBaselineStore::new(dir.path().join("baseline.json"));
        store.write(&snapshot()).unwrap();
        store.reset().unwrap();
        assert!(!store.read().unwrap().is_captured());
        // Resetting an absent file succeeds
        store.reset().unwrap();
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryBaselineStore::default();
        assert!(!store.read().unwrap().is_captured());
        store.write(&snapshot()).unwrap();
        assert!(store.read().unwrap().is_captured());
        store.reset().unwrap();
        assert!(!store.read().unwrap().is_captured());
    }
}
