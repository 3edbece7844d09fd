//! Durable key-value persistence for the cart and wishlist.
//!
//! [`Persistence`] is the only thing the stores talk to. It never fails:
//! reads of missing, unreadable or malformed values come back as an empty
//! collection (malformed ones are deleted), and failed writes are logged
//! and dropped. The in-memory store
//! stays authoritative either way.
//!
//! Values are JSON arrays stored under fixed keys (see [`keys`]) in a
//! [`StorageBackend`]. Three backends ship with the crate:
//!
//! - [`FileStorage`] - one `<key>.json` file per key under a directory
//! - [`MemoryStorage`] - shared in-process map with an optional byte quota
//! - [`UnavailableStorage`] - no backend; every call fails

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys for persisted collections.
pub mod keys {
    /// Key for the cart's line items.
    pub const CART: &str = "cart";

    /// Key for the wishlist entries.
    pub const WISHLIST: &str = "wishlist";
}

/// Errors raised by a [`StorageBackend`].
///
/// These never escape [`Persistence`]; they exist so backends can say what
/// went wrong and the adapter can log it.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No durable storage exists in this execution context.
    #[error("storage backend unavailable")]
    Unavailable,

    /// The write would exceed the backend's capacity.
    #[error("storage quota exceeded writing {key} ({needed} bytes, limit {limit})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding shared state was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-keyed, string-valued durable store.
pub trait StorageBackend: Send + Sync {
    /// Read the value at `key`, or `None` if nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value at `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// Adapter
// =============================================================================

/// Fail-soft JSON persistence over a shared [`StorageBackend`].
///
/// Cheap to clone; clones write to the same backend.
#[derive(Clone)]
pub struct Persistence {
    backend: Arc<dyn StorageBackend>,
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Create an adapter over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// An adapter with no backend: loads are empty, saves are dropped.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(Arc::new(UnavailableStorage))
    }

    /// Load the collection stored at `key`.
    ///
    /// Returns an empty vector when the key is missing, the backend is
    /// unavailable or the stored value does not parse.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted state");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Discarding malformed persisted state");
            self.discard(key);
            Vec::new()
        })
    }

    /// Delete whatever is stored at `key`.
    ///
    /// Used when a stored value can never be loaded, so it is not read
    /// again on every start. Failures are logged and otherwise ignored.
    pub fn discard(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            tracing::warn!(key, error = %e, "Failed to discard persisted state");
        }
    }

    /// Overwrite `key` with the full collection.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize state");
                return;
            }
        };

        if let Err(e) = self.backend.set_item(key, &json) {
            tracing::warn!(key, error = %e, "Failed to persist state");
        } else {
            tracing::trace!(key, bytes = json.len(), "Persisted state");
        }
    }
}

// =============================================================================
// Backends
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
///
/// The directory is created on first write. Writes go through a temporary
/// file and a rename so a crash never leaves half a document behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file backend rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process map shared between clones.
///
/// Two stores built over clones of the same `MemoryStorage` see each
/// other's writes, which is how tests model a page reload. An optional
/// quota caps the total bytes held across all keys.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unbounded map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map that rejects writes beyond `bytes` in total.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: Arc::default(),
            quota: Some(bytes),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Poisoned)?;
        if let Some(limit) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// The absence of a durable backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl StorageBackend for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        n: u32,
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry {
                id: "b".to_string(),
                n: 2,
            },
            Entry {
                id: "a".to_string(),
                n: 1,
            },
        ]
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let persistence = Persistence::new(Arc::new(MemoryStorage::new()));
        persistence.save(keys::CART, &entries());
        assert_eq!(persistence.load::<Entry>(keys::CART), entries());
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let persistence = Persistence::new(Arc::new(MemoryStorage::new()));
        assert!(persistence.load::<Entry>(keys::WISHLIST).is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::CART, "{not json").unwrap();
        storage.set_item(keys::WISHLIST, "{\"id\":\"a\"}").unwrap();

        let persistence = Persistence::new(Arc::new(storage.clone()));
        assert!(persistence.load::<Entry>(keys::CART).is_empty());
        assert!(persistence.load::<Entry>(keys::WISHLIST).is_empty());

        // Unloadable values are dropped rather than re-read on every start.
        assert_eq!(storage.get_item(keys::CART).unwrap(), None);
        assert_eq!(storage.get_item(keys::WISHLIST).unwrap(), None);
    }

    #[test]
    fn test_discard_on_unavailable_backend_is_silent() {
        Persistence::unavailable().discard(keys::CART);
    }

    #[test]
    fn test_unavailable_backend_is_silent() {
        let persistence = Persistence::unavailable();
        persistence.save(keys::CART, &entries());
        assert!(persistence.load::<Entry>(keys::CART).is_empty());
    }

    #[test]
    fn test_quota_rejects_large_write_and_keeps_previous_value() {
        let storage = MemoryStorage::with_quota(64);
        let persistence = Persistence::new(Arc::new(storage.clone()));

        persistence.save(keys::CART, &entries()[..1]);
        let big: Vec<Entry> = (0..20)
            .map(|n| Entry {
                id: format!("item-{n}"),
                n,
            })
            .collect();
        persistence.save(keys::CART, &big);

        assert_eq!(persistence.load::<Entry>(keys::CART), entries()[..1].to_vec());
        assert!(matches!(
            storage.set_item(keys::CART, &"x".repeat(100)),
            Err(StorageError::QuotaExceeded { limit: 64, .. })
        ));
    }

    #[test]
    fn test_memory_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set_item("k", "v").unwrap();
        assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));
        other.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get_item(keys::CART).unwrap(), None);
        storage.set_item(keys::CART, "[1,2]").unwrap();
        assert_eq!(storage.get_item(keys::CART).unwrap().as_deref(), Some("[1,2]"));
        assert!(dir.path().join("nested").join("cart.json").exists());

        storage.remove_item(keys::CART).unwrap();
        storage.remove_item(keys::CART).unwrap();
        assert_eq!(storage.get_item(keys::CART).unwrap(), None);
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.set_item("../escape", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            storage.get_item(""),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_file_storage_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wishlist.json"), "garbage").unwrap();

        let persistence = Persistence::new(Arc::new(FileStorage::new(dir.path())));
        assert!(persistence.load::<Entry>(keys::WISHLIST).is_empty());
        assert!(!dir.path().join("wishlist.json").exists());
    }
}
