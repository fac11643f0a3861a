//! File-backed session store.
//!
//! Persists the session map as a single JSON object in `session.json` with
//! restricted permissions (0600). Values are never logged in full.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use super::{SessionStore, StoreError};

/// Session store backed by a JSON file on local disk.
///
/// Operations are read-modify-write over the whole file, serialized by an
/// internal lock so concurrent writes from one process cannot interleave.
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Loads the session map from disk.
    /// Returns an empty map if the file doesn't exist.
    fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            StoreError::new(format!("failed to read {}: {e}", self.path.display()))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            StoreError::new(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    /// Saves the session map to disk with restricted permissions (0600).
    fn save(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let contents = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::new(format!("failed to serialize session map: {e}")))?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .map_err(|e| {
                    StoreError::new(format!("failed to open {}: {e}", self.path.display()))
                })?;
            file.write_all(contents.as_bytes()).map_err(|e| {
                StoreError::new(format!("failed to write {}: {e}", self.path.display()))
            })?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents).map_err(|e| {
                StoreError::new(format!("failed to write {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().expect("session store lock poisoned");
        Ok(self.load()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().expect("session store lock poisoned");
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().expect("session store lock poisoned");
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }

    async fn remove_many(&self, store_keys: &[&str]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().expect("session store lock poisoned");
        let mut map = self.load()?;
        let mut changed = false;
        for key in store_keys {
            changed |= map.remove(*key).is_some();
        }
        if changed {
            self.save(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: values survive a store reopen (process restart).
    #[tokio::test]
    async fn test_roundtrip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSessionStore::new(path.clone());
        store.set("auth_token", "abc123").await.unwrap();
        store.set("user_email", "a@b.com").await.unwrap();
        drop(store);

        let store = FileSessionStore::new(path);
        assert_eq!(store.get("auth_token").await.unwrap().as_deref(), Some("abc123"));
        assert_eq!(store.get("user_email").await.unwrap().as_deref(), Some("a@b.com"));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    /// Test: remove and remove_many tolerate absent keys.
    #[tokio::test]
    async fn test_remove_absent_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.remove("missing").await.unwrap();
        store.set("a", "1").await.unwrap();
        store.remove_many(&["a", "missing"]).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
    }

    /// Test: the session file is created with 0600 permissions.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(path.clone());
        store.set("auth_token", "abc123").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
