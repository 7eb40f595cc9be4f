//! String key-value persistence, the shape of browser `localStorage`.

use hashbrown::HashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::KeyValueStore;
    use crate::error::StorageError;

    /// All entries live in one JSON object on disk; every write rewrites it.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
        entries: BTreeMap<String, String>,
    }

    impl FileStore {
        pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
            let path = path.into();
            let entries = if path.exists() {
                let raw = fs::read_to_string(&path)?;
                if raw.trim().is_empty() {
                    BTreeMap::new()
                } else {
                    serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                        key: path.display().to_string(),
                        source,
                    })?
                }
            } else {
                BTreeMap::new()
            };
            Ok(Self { path, entries })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn flush(&self) -> Result<(), StorageError> {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir)?;
            }
            let raw = serde_json::to_string_pretty(&self.entries).map_err(|source| {
                StorageError::Corrupt {
                    key: self.path.display().to_string(),
                    source,
                }
            })?;
            // Write-then-rename so a crash never leaves a half-written file.
            let tmp = self.path.with_extension("json.tmp");
            fs::write(&tmp, raw)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            let previous = self.entries.insert(key.to_string(), value.to_string());
            if let Err(e) = self.flush() {
                match previous {
                    Some(v) => self.entries.insert(key.to_string(), v),
                    None => self.entries.remove(key),
                };
                return Err(e);
            }
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            let Some(previous) = self.entries.remove(key) else {
                return Ok(());
            };
            if let Err(e) = self.flush() {
                self.entries.insert(key.to_string(), previous);
                return Err(e);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_json() {
        let mut store = MemoryStore::new();
        store.set_json("k", &vec![1u32, 2, 3]).unwrap();
        let back: Option<Vec<u32>> = store.get_json("k").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));

        store.remove("k").unwrap();
        assert!(store.is_empty());
        let gone: Option<Vec<u32>> = store.get_json("k").unwrap();
        assert!(gone.is_none());
    }

    #[test]
    fn corrupt_json_is_reported_with_key() {
        let mut store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();
        let err = store.get_json::<Vec<u32>>("broken").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref key, .. } if key == "broken"));
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("nanofi.session", "ada@example.com").unwrap();
        store.set("other", "x").unwrap();
        store.remove("other").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("nanofi.session").unwrap().as_deref(),
            Some("ada@example.com")
        );
        assert_eq!(reopened.get("other").unwrap(), None);
    }

    #[test]
    fn file_store_keeps_entries_when_flush_fails() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("data");
        let path = parent.join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();

        // A plain file where the data directory was makes every flush fail.
        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, "not a directory").unwrap();

        assert!(store.remove("k").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        assert!(store.set("k", "w").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_store_rejects_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1,2").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
