//! Durable client-side selection storage, the localStorage analog.
//!
//! Writes are best-effort: like browser storage, a failed write never takes
//! the UI down, it just loses the persisted copy. Failures are logged and
//! swallowed.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Storage keys, one per persisted piece of state.
pub mod keys {
    pub const MOVIE: &str = "movie";
    pub const SLOT: &str = "slot";
    pub const SEATS: &str = "seats";
    pub const DARK_MODE: &str = "darkMode";
}

pub trait SelectionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// JSON-file-backed store. The whole map is rewritten on every change; the
/// values are tiny and the cadence is human-driven.
pub struct FileSelectionStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSelectionStore {
    /// Opens the store, starting empty when the file is missing or
    /// unreadable (a corrupt file is not an error, it is a fresh session).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Ignoring corrupt selection file {}: {}", path.display(), err);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string_pretty(entries) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Failed to serialize selections: {}", err);
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, raw) {
            warn!("Failed to persist selections to {}: {}", self.path.display(), err);
        }
    }
}

impl SelectionStore for FileSelectionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let Ok(mut entries) = self.entries.lock() else { return };
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let Ok(mut entries) = self.entries.lock() else { return };
        entries.remove(key);
        self.flush(&entries);
    }
}

/// Map-backed store for tests.
#[derive(Default)]
pub struct MemorySelectionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemorySelectionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}
