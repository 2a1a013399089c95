//! Key-value backends
//!
//! The repositories only need string get/set/remove by key, the same surface
//! as the browser's local storage. `MemoryStore` backs tests; `FileStore`
//! keeps one JSON file per key in a data directory.

use crate::error::StoreError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
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

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store, one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        // Write beside the target and rename so readers never see a torn value
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set("bridgeInspections", "[]").unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("bridgeInspections").unwrap(),
            Some("[]".to_string())
        );
        assert!(dir.path().join("bridgeInspections.json").exists());
        assert!(!dir.path().join("bridgeInspections.json.tmp").exists());
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(store.remove("nothing").is_ok());
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }
}
