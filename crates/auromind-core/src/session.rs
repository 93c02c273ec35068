//! Session identity and the durable key-value storage it lives in.
//!
//! The identity is created on first use and then reused until the storage is
//! cleared from outside. It is never torn down by the application.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::errors::StorageError;

pub const SESSION_ID_KEY: &str = "chatSessionId";
const SUFFIX_LEN: usize = 7;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Synchronous string storage that outlives the process.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub type KeyValueStoreBox = Box<dyn KeyValueStore>;

/// A flat JSON object on disk, rewritten on every change.
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<data dir>/auromind/storage.json`
    pub fn default_path() -> Result<PathBuf, StorageError> {
        dirs::data_local_dir()
            .map(|dir| dir.join("auromind").join("storage.json"))
            .ok_or_else(|| StorageError::Unavailable("no local data directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// `session-<millis>-<7 base36 chars>`
pub fn generate_session_id<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("session-{}-{}", now.timestamp_millis(), suffix)
}

/// Owner of the process-wide session identity.
pub struct SessionContext {
    store: KeyValueStoreBox,
    // Holds an id that could not be persisted so later sends still agree on it.
    unsaved: Mutex<Option<String>>,
}

impl SessionContext {
    pub fn new(store: KeyValueStoreBox) -> Self {
        Self {
            store,
            unsaved: Mutex::new(None),
        }
    }

    /// The durable storage behind this context, shared with other client state.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// The stored identity, if any. Storage failures read as "no identity".
    pub fn current(&self) -> Option<String> {
        match self.store.get(SESSION_ID_KEY) {
            Ok(Some(id)) if !id.is_empty() => Some(id),
            Ok(_) => self.unsaved_id(),
            Err(e) => {
                log::warn!("Failed to read session id: {}", e);
                self.unsaved_id()
            }
        }
    }

    /// Returns the stored identity, creating and persisting one when absent.
    pub fn get_or_create(&self) -> String {
        if let Some(id) = self.current() {
            return id;
        }

        let id = generate_session_id(Utc::now(), &mut rand::thread_rng());
        match self.store.set(SESSION_ID_KEY, &id) {
            Ok(()) => log::info!("Created chat session {}", id),
            Err(e) => {
                log::warn!("Failed to persist session id {}: {}", id, e);
                *self.unsaved.lock().unwrap_or_else(|p| p.into_inner()) = Some(id.clone());
            }
        }
        id
    }

    fn unsaved_id(&self) -> Option<String> {
        self.unsaved
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}
