//! Durable key-value storage for the persisted selection.
//!
//! Values are opaque strings; writes overwrite the whole value under a key.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// Key under which the selection is persisted.
pub const STORAGE_KEY: &str = "language";

/// A simple string key-value store that survives across sessions.
pub trait SelectionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `key = value`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl SelectionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk.
///
/// Every `set` rewrites the whole file through a temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(raw) if raw.is_empty() => Ok(HashMap::new()),
            Ok(raw) => serde_json::from_slice(&raw)
                .with_context(|| format!("Failed to parse store at {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read store at {}", self.path.display())),
        }
    }
}

impl SelectionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let serialized = serde_json::to_vec_pretty(&values).context("Failed to serialize store")?;
        std::fs::write(&tmp, serialized)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ==================== MemoryStore ====================

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);

        store.set(STORAGE_KEY, "one").unwrap();
        store.set(STORAGE_KEY, "two").unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let view = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(view.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store_with_value() {
        let store = MemoryStore::with_value(STORAGE_KEY, "{}");
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("{}"));
    }

    // ==================== FileStore ====================

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        FileStore::new(&path).set(STORAGE_KEY, "value").unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(STORAGE_KEY).unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_file_store_overwrites_single_key() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        store.set("other", "kept").unwrap();
        store.set(STORAGE_KEY, "first").unwrap();
        store.set(STORAGE_KEY, "second").unwrap();

        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("second"));
        assert_eq!(store.get("other").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        let err = store.get(STORAGE_KEY).unwrap_err();
        assert!(err.to_string().contains("Failed to parse store"));
    }
}
