//! Key-value store adapter.
//!
//! Wraps a directory of JSON files behind a localStorage-shaped
//! contract: reads fall back to a caller-supplied default, writes are
//! best-effort and report success as a boolean. Consumers agree
//! informally on the shape stored under each well-known key; nothing
//! here enforces a schema.

use super::atomic_json::AtomicJsonFile;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// A directory-backed key-value store, one JSON file per key.
///
/// Reads never fail: a missing key or an unparseable file yields the
/// caller's default (logged, not raised). Writes never panic: failures
/// are logged and reported as `false`, and callers must treat
/// persistence as best-effort.
///
/// `update` serializes read-modify-write cycles per key within the
/// process, on top of the advisory file lock the atomic layer takes.
pub struct JsonKvStore {
    dir: PathBuf,
    key_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl JsonKvStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the parsed value stored under `key`, or `default` when
    /// the key is absent or its contents cannot be deserialized.
    pub fn get<T>(&self, key: &str, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        match self.file::<T>(key).load() {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("kv store: falling back to default for key '{}': {}", key, e);
                default
            }
        }
    }

    /// Stores `value` under `key`. Returns `false` (logged) when the
    /// value cannot be serialized or written.
    pub fn set<T>(&self, key: &str, value: &T) -> bool
    where
        T: Serialize + DeserializeOwned,
    {
        match self.file::<T>(key).save(value) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("kv store: failed to write key '{}': {}", key, e);
                false
            }
        }
    }

    /// Applies `f` to the value under `key` (seeded with `default` when
    /// absent) and writes the result back, as one serialized cycle.
    ///
    /// Returns `false` (logged) when the cycle could not complete.
    pub fn update<T, F>(&self, key: &str, default: T, f: F) -> bool
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let guard = self.key_lock(key);
        let _held = guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let result = self.file::<T>(key).update(default, |value| {
            f(value);
            Ok(())
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("kv store: failed to update key '{}': {}", key, e);
                false
            }
        }
    }

    /// Deletes the entry under `key`, reporting whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        match self.file::<serde_json::Value>(key).remove() {
            Ok(existed) => existed,
            Err(e) => {
                tracing::error!("kv store: failed to remove key '{}': {}", key, e);
                false
            }
        }
    }

    /// Deletes every listed key.
    pub fn clear(&self, keys: &[&str]) {
        for key in keys {
            self.remove(key);
        }
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    fn file<T>(&self, key: &str) -> AtomicJsonFile<T>
    where
        T: Serialize + DeserializeOwned,
    {
        AtomicJsonFile::new(self.path_for(key))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .key_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(key.to_string()).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Nested {
        label: String,
        values: Vec<i64>,
    }

    #[test]
    fn test_round_trip_deep_equality() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonKvStore::new(temp_dir.path());

        let value = json!({
            "name": "déjà vu ☕",
            "nested": { "list": [1, 2, 3], "flag": true },
            "empty": []
        });

        assert!(store.set("blob", &value));
        let loaded = store.get("blob", json!(null));
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_missing_key_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonKvStore::new(temp_dir.path());

        let loaded: Vec<String> = store.get("absent", vec!["fallback".to_string()]);
        assert_eq!(loaded, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_corrupt_value_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonKvStore::new(temp_dir.path());

        std::fs::write(temp_dir.path().join("broken.json"), b"{not json at all").unwrap();

        let loaded: Nested = store.get(
            "broken",
            Nested {
                label: "default".to_string(),
                values: vec![],
            },
        );
        assert_eq!(loaded.label, "default");
    }

    #[test]
    fn test_update_seeds_default_then_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonKvStore::new(temp_dir.path());

        assert!(store.update("counter", 0u64, |n| *n += 3));
        assert!(store.update("counter", 0u64, |n| *n += 4));

        assert_eq!(store.get("counter", 0u64), 7);
    }

    #[test]
    fn test_remove_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonKvStore::new(temp_dir.path());

        store.set("a", &1u32);
        store.set("b", &2u32);

        assert!(store.remove("a"));
        assert!(!store.remove("a"));

        store.clear(&["b", "never-existed"]);
        assert!(!store.contains("b"));
    }
}
