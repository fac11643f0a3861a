//! In-memory session store.
//!
//! Used by tests and anywhere a throwaway store is needed. Writes can be
//! toggled to fail so persistence-failure paths are exercisable.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{SessionStore, StoreError};

/// Session store backed by a process-local map.
#[derive(Default)]
pub struct MemorySessionStore {
    map: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write (set/remove) fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the current contents, for assertions.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.map.lock().expect("session store lock poisoned").clone()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::new("write failure (simulated)"));
        }
        Ok(())
    }
}

impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .map
            .lock()
            .expect("session store lock poisoned")
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.map
            .lock()
            .expect("session store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.map
            .lock()
            .expect("session store lock poisoned")
            .remove(key);
        Ok(())
    }

    async fn remove_many(&self, store_keys: &[&str]) -> Result<(), StoreError> {
        for key in store_keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: the failure toggle affects writes but not reads.
    #[tokio::test]
    async fn test_fail_writes_toggle() {
        let store = MemorySessionStore::new();
        store.set("a", "1").await.unwrap();

        store.fail_writes(true);
        assert!(store.set("b", "2").await.is_err());
        assert!(store.remove("a").await.is_err());
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));

        store.fail_writes(false);
        store.set("b", "2").await.unwrap();
        assert_eq!(store.snapshot().len(), 2);
    }
}
