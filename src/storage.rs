//! Persistence of the planner document
//!
//! The medium is a plain string-keyed slot store. `Store` keeps the whole
//! document under one key and replaces it wholesale on every save.

use crate::error::{PlannerResult, StorageError};
use crate::planner::Document;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Default key of the planner document
pub const DEFAULT_STORAGE_KEY: &str = "studyPlannerData";

/// Durable synchronous string store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        // Write beside the target and rename so readers never see a partial file
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, mainly for tests
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots().remove(key);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Whole-document persistence with first-use initialisation
///
/// Every operation holds `guard` for its full duration, so no caller can
/// observe a document between the load and the save of another one.
pub struct Store {
    medium: Box<dyn KeyValueStore>,
    key: String,
    defaults: Document,
    guard: Mutex<()>,
}

impl Store {
    pub fn new(medium: impl KeyValueStore + 'static) -> Self {
        Self::with_defaults(medium, DEFAULT_STORAGE_KEY, Document::default())
    }

    pub fn with_defaults(
        medium: impl KeyValueStore + 'static,
        key: impl Into<String>,
        defaults: Document,
    ) -> Self {
        Self {
            medium: Box::new(medium),
            key: key.into(),
            defaults,
            guard: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load the document, initialising it on first use
    pub fn load(&self) -> PlannerResult<Document> {
        let _guard = self.lock();
        self.load_locked()
    }

    /// Overwrite the persisted document
    pub fn save(&self, document: &Document) -> PlannerResult<()> {
        let _guard = self.lock();
        self.save_locked(document)
    }

    /// Erase persisted state and start over from the defaults
    pub fn clear(&self) -> PlannerResult<Document> {
        let _guard = self.lock();
        self.medium.remove(&self.key)?;
        info!(key = %self.key, "cleared planner data");
        self.load_locked()
    }

    /// Load, mutate a copy, save; nothing is written when `mutate` fails
    pub fn update<R>(
        &self,
        mutate: impl FnOnce(&mut Document) -> PlannerResult<R>,
    ) -> PlannerResult<R> {
        let _guard = self.lock();
        let mut document = self.load_locked()?;
        let result = mutate(&mut document)?;
        self.save_locked(&document)?;
        Ok(result)
    }

    fn load_locked(&self) -> PlannerResult<Document> {
        let Some(content) = self.medium.get(&self.key)? else {
            info!(key = %self.key, "initialising planner data with defaults");
            self.save_locked(&self.defaults)?;
            return Ok(self.defaults.clone());
        };
        let document = serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            key: self.key.clone(),
            source,
        })?;
        debug!(key = %self.key, bytes = content.len(), "loaded planner data");
        Ok(document)
    }

    fn save_locked(&self, document: &Document) -> PlannerResult<()> {
        let content = serde_json::to_string(document).map_err(StorageError::Encode)?;
        self.medium.set(&self.key, &content)?;
        debug!(key = %self.key, bytes = content.len(), "saved planner data");
        Ok(())
    }
}
