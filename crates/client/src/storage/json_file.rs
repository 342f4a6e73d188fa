//! File-backed store: one JSON file per key under a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::LocalStore;

/// A [`LocalStore`] persisting each key as `<data_dir>/<key>.json`.
///
/// The directory is created lazily on first write, so constructing the store
/// never touches the filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl LocalStore for JsonFileStore {
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    tracing::debug!(key, error = %e, "unreadable store value, using default");
                    default
                }
            },
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::debug!(key, error = %e, "store read failed, using default");
                }
                default
            }
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let bytes = match serde_json::to_vec_pretty(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(key, error = %e, "store serialization failed");
                return false;
            }
        };

        if let Err(e) = fs::create_dir_all(&self.data_dir) {
            tracing::debug!(key, error = %e, "store directory creation failed");
            return false;
        }

        match fs::write(self.path_for(key), bytes) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(key, error = %e, "store write failed");
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => {
                tracing::debug!(key, error = %e, "store remove failed");
                false
            }
        }
    }

    fn clear(&self) -> bool {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return true,
            Err(e) => {
                tracing::debug!(error = %e, "store clear failed to list directory");
                return false;
            }
        };

        let mut ok = true;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") && fs::remove_file(&path).is_err()
            {
                ok = false;
            }
        }
        ok
    }
}
