//! # Persistent Values
//!
//! A string value mirrored between memory and a key/value store, restored on
//! startup. The store on disk is a flat JSON object at
//! `~/.hacker-stories/storage.json`:
//!
//! ```json
//! { "search": "Redux" }
//! ```
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`).

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "storage parse error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// External key/value storage for persisted UI state.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path).map_err(StoreError::Io)?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&json).map_err(StoreError::Parse)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    /// A file that no longer parses is replaced rather than blocking every
    /// later write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StoreError::Parse(e)) => {
                warn!(
                    "Store {} is corrupt ({}), overwriting it",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Io)?;
        }
        atomic_write_json(&self.path, &entries)
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json(path: &Path, data: &BTreeMap<String, String>) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data).map_err(StoreError::Parse)?;
    fs::write(&tmp_path, json).map_err(StoreError::Io)?;
    fs::rename(&tmp_path, path).map_err(StoreError::Io)?;
    Ok(())
}

/// A string value restored from a store on construction and written back
/// whenever `persist()` runs.
pub struct SemiPersistentState {
    store: Box<dyn KeyValueStore>,
    key: String,
    value: String,
}

impl SemiPersistentState {
    /// Restores the value under `key`, or `default` when it is absent or empty.
    /// The initial value is written back once, so a fresh store ends up
    /// holding the default.
    pub fn new(store: Box<dyn KeyValueStore>, key: &str, default: &str) -> Self {
        let restored = match store.get(key) {
            Ok(Some(value)) if !value.is_empty() => {
                debug!("Restored '{}' from storage", key);
                Some(value)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read '{}' from storage: {}", key, e);
                None
            }
        };

        let mut state = Self {
            store,
            key: key.to_string(),
            value: restored.unwrap_or_else(|| default.to_string()),
        };
        if let Err(e) = state.persist() {
            warn!("Failed to write initial '{}' to storage: {}", state.key, e);
        }
        state
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Updates the in-memory value. The caller schedules `persist()`.
    pub fn set(&mut self, value: String) {
        self.value = value;
    }

    /// Writes the current value under the key, verbatim.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        self.store.set(&self.key, &self.value)
    }
}
