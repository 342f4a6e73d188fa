//! In-memory store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::LocalStore;

/// A [`LocalStore`] held entirely in memory.
///
/// Clones share the same underlying map, which lets a test hand "the same
/// device storage" to two components.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Ok(values) = self.values.lock() else {
            return default;
        };
        values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default)
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let Ok(value) = serde_json::to_value(value) else {
            return false;
        };
        let Ok(mut values) = self.values.lock() else {
            return false;
        };
        values.insert(key.to_owned(), value);
        true
    }

    fn remove(&self, key: &str) -> bool {
        let Ok(mut values) = self.values.lock() else {
            return false;
        };
        values.remove(key);
        true
    }

    fn clear(&self) -> bool {
        let Ok(mut values) = self.values.lock() else {
            return false;
        };
        values.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", &42);
        assert_eq!(b.get("k", 0), 42);
    }

    #[test]
    fn test_default_for_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing", "d".to_owned()), "d");
    }
}
