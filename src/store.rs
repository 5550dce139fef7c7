//! Persistence: an opaque key-value substrate plus the storage adapter.
//!
//! The whole collection lives under one namespaced key and is read fully
//! and written fully on every mutation. Loading fails closed: corrupt
//! stored state degrades to an empty collection instead of blocking the
//! app.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::core::Collection;

/// The namespaced key the collection is persisted under. Kept identical
/// to the original store so existing data keeps loading.
pub const STORE_KEY: &str = "cosplay-projects-v1";

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    #[error("failed to write store at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Opaque synchronous key-value substrate: get/set over strings for one
/// pre-namespaced key.
pub trait KvStore {
    fn get(&self) -> Option<String>;
    fn set(&self, raw: &str) -> Result<(), StoreError>;
}

/// File-backed substrate: the key's value is one JSON file under the
/// data directory.
#[derive(Debug, Clone)]
pub struct FileKv {
    path: PathBuf,
}

impl FileKv {
    /// Store file for `STORE_KEY` under the given data directory.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{STORE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KvStore for FileKv {
    fn get(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn set(&self, raw: &str) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        // Write-then-rename so readers never observe a torn file.
        let temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(temp.path(), raw.as_bytes()).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        temp.persist(&self.path).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}

/// In-memory substrate for tests and fakes.
#[derive(Debug, Default)]
pub struct MemoryKv {
    value: Mutex<Option<String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with a raw value (possibly corrupt, for failure tests).
    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
        }
    }
}

impl KvStore for MemoryKv {
    fn get(&self) -> Option<String> {
        self.value.lock().expect("kv mutex poisoned").clone()
    }

    fn set(&self, raw: &str) -> Result<(), StoreError> {
        *self.value.lock().expect("kv mutex poisoned") = Some(raw.to_string());
        Ok(())
    }
}

/// Storage adapter: (de)serialization over the substrate.
#[derive(Debug)]
pub struct Storage<S: KvStore> {
    kv: S,
}

impl<S: KvStore> Storage<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Read the full collection. Absent key or undecodable payload both
    /// yield an empty collection; corruption is logged, never propagated.
    pub fn load_collection(&self) -> Collection {
        let Some(raw) = self.kv.get() else {
            return Collection::new();
        };
        match serde_json::from_str(&raw) {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!("stored collection undecodable, starting empty: {e}");
                Collection::new()
            }
        }
    }

    /// Serialize and overwrite the key with the full collection.
    pub fn save_collection(&self, collection: &Collection) -> Result<(), StoreError> {
        let raw = serde_json::to_string(collection)?;
        self.kv.set(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Project;

    #[test]
    fn absent_key_loads_empty() {
        let storage = Storage::new(MemoryKv::new());
        assert!(storage.load_collection().is_empty());
    }

    #[test]
    fn corrupt_payload_fails_closed() {
        for raw in ["not json", "{\"oops\":1}", "[{\"id\":\"\"}]"] {
            let storage = Storage::new(MemoryKv::with_value(raw));
            assert!(storage.load_collection().is_empty(), "payload {raw:?}");
        }
    }

    #[test]
    fn save_then_load_roundtrips() {
        let storage = Storage::new(MemoryKv::new());
        let c: Collection = vec![Project::new("Aloy"), Project::new("2B")].into();
        storage.save_collection(&c).unwrap();
        assert_eq!(storage.load_collection(), c);
    }

    #[test]
    fn save_overwrites_prior_content() {
        let storage = Storage::new(MemoryKv::new());
        let big: Collection = vec![Project::new("Aloy"), Project::new("2B")].into();
        storage.save_collection(&big).unwrap();
        let small: Collection = vec![Project::new("Link")].into();
        storage.save_collection(&small).unwrap();
        assert_eq!(storage.load_collection(), small);
    }

    #[test]
    fn file_store_roundtrips_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(FileKv::in_dir(dir.path()));
        let c: Collection = vec![Project::new("Aloy")].into();
        storage.save_collection(&c).unwrap();
        assert_eq!(storage.load_collection(), c);

        // A second adapter over the same directory sees the same data.
        let reread = Storage::new(FileKv::in_dir(dir.path()));
        assert_eq!(reread.load_collection(), c);
    }

    #[test]
    fn file_store_missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(FileKv::in_dir(dir.path()));
        assert!(storage.load_collection().is_empty());
    }

    #[test]
    fn file_store_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let kv = FileKv::in_dir(dir.path());
        std::fs::write(kv.path(), b"{{{{").unwrap();
        let storage = Storage::new(kv);
        assert!(storage.load_collection().is_empty());
    }
}
