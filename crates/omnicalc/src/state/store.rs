//! The storage port: load and save the serialized record.
//!
//! The port is injected into [`crate::app::App`]; nothing in the
//! engine reaches for an ambient store.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::CalcResult;
use crate::state::AppState;

/// Load/save seam for the persisted record
pub trait StateStore: Send {
    /// Loads the saved record; `None` when nothing was saved yet
    fn load(&self) -> CalcResult<Option<AppState>>;

    /// Persists the record
    fn save(&self, state: &AppState) -> CalcResult<()>;
}

/// JSON file-backed store.
///
/// A missing file loads as `None`; a corrupt file is logged and also
/// loads as `None`, so a damaged record degrades to factory defaults
/// instead of wedging startup.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at the given path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> CalcResult<Option<AppState>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&text) {
            Ok(state) => {
                debug!(path = %self.path.display(), "state loaded");
                Ok(Some(state))
            }
            Err(e) => {
                warn!(path = %self.path.display(), %e, "corrupt state file, using defaults");
                Ok(None)
            }
        }
    }

    fn save(&self, state: &AppState) -> CalcResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(state)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first save lands
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot.lock().map(|s| s.is_none()).unwrap_or(true)
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> CalcResult<Option<AppState>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| std::io::Error::other("store poisoned"))?;
        match slot.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &AppState) -> CalcResult<()> {
        let json = serde_json::to_string(state)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| std::io::Error::other("store poisoned"))?;
        *slot = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Mode;

    // ===== MemoryStore tests =====

    #[test]
    fn test_memory_store_empty_load() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let mut state = AppState::new();
        state.active = Mode::Conversion;

        store.save(&state).unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.load().unwrap().unwrap(), state);
    }

    // ===== JsonFileStore tests =====

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let mut state = AppState::new();
        state.basic.press_digit(4);
        state.graphing.functions.y[2] = "x^3".into();

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), state);
    }

    #[test]
    fn test_file_store_corrupt_file_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json!").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper/state.json"));
        store.save(&AppState::new()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn test_file_store_overwrites_previous_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let mut state = AppState::new();
        store.save(&state).unwrap();
        state.active = Mode::Graphing;
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap().unwrap().active, Mode::Graphing);
    }
}
