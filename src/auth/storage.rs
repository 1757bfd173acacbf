//! Durable key-value media for persisted credentials.
//!
//! The [`SessionStore`](crate::auth::SessionStore) keeps the bearer token and
//! the user together as one JSON value under [`SESSION_KEY`] in a
//! [`CredentialStorage`]. Two media are provided:
//!
//! - [`MemoryStorage`]: lives as long as the process (the default)
//! - [`FileStorage`]: a JSON object on disk that survives restarts

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// Key under which the session (`{"token": .., "user": ..}`) is persisted.
pub const SESSION_KEY: &str = "session";

/// Error raised by a credential medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("credential storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The backing file does not contain a JSON object of strings.
    #[error("credential storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A string key-value medium for persisted credentials.
///
/// Implementations must be safe to share between threads and each call must
/// be atomic: after a failed `set` or `remove` the previous value is still in
/// place. The session store serializes its own writes.
pub trait CredentialStorage: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the removal could not be persisted.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: CredentialStorage + ?Sized> CredentialStorage for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process credential storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Credential storage backed by a JSON file.
///
/// The whole map is rewritten on every change, through a temporary file that
/// replaces the original with a rename, so a crash never leaves a truncated
/// file. Entries are cached in memory, so reads never touch the disk after
/// [`FileStorage::open`].
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Opens (or lazily creates) the storage file at `path`.
    ///
    /// A missing file is treated as empty storage.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => HashMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(entries)?;
        let staging = self.staging_path();

        fs::write(&staging, contents)?;
        fs::rename(&staging, &self.path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            StorageError::from(e)
        })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CredentialStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_string(), value.to_string());

        self.persist(&entries).map_err(|e| {
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
            e
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        self.persist(&entries).map_err(|e| {
            entries.insert(key.to_string(), previous);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "storefront-api-{name}-{}.json",
            std::process::id()
        ))
    }

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get(SESSION_KEY).is_none());

        storage.set(SESSION_KEY, "abc").unwrap();
        assert_eq!(storage.get(SESSION_KEY).as_deref(), Some("abc"));

        storage.remove(SESSION_KEY).unwrap();
        assert!(storage.get(SESSION_KEY).is_none());

        // Removing twice is fine
        storage.remove(SESSION_KEY).unwrap();
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set(SESSION_KEY, "persisted").unwrap();
            storage.set("other", "kept").unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(SESSION_KEY).as_deref(), Some("persisted"));
        assert_eq!(reopened.get("other").as_deref(), Some("kept"));

        reopened.remove(SESSION_KEY).unwrap();
        let again = FileStorage::open(&path).unwrap();
        assert!(again.get(SESSION_KEY).is_none());
        assert!(again.get("other").is_some());
        assert!(!again.staging_path().exists());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let storage = FileStorage::open(&path).unwrap();
        assert!(storage.get(SESSION_KEY).is_none());
        assert_eq!(storage.path(), path.as_path());
        assert!(!path.exists());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();

        let result = FileStorage::open(&path);
        assert!(matches!(result, Err(StorageError::Corrupt(_))));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_storage_failed_write_keeps_previous_value() {
        let dir = temp_path("unwritable-dir");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set(SESSION_KEY, "first").unwrap();

        // A directory in place of the staging file makes the next write fail
        fs::create_dir_all(storage.staging_path()).unwrap();

        assert!(storage.set(SESSION_KEY, "second").is_err());
        assert_eq!(storage.get(SESSION_KEY).as_deref(), Some("first"));
        assert!(storage.remove(SESSION_KEY).is_err());
        assert_eq!(storage.get(SESSION_KEY).as_deref(), Some("first"));

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(SESSION_KEY).as_deref(), Some("first"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
