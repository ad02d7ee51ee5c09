use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::errors::{Result, StoreError};

/// One named key-value table.
///
/// Reads hand out clones, never references into the table, so nothing can
/// alias the map across the lock boundary. Every successful write flips the
/// dirty flag shared with the owning [`Storage`](crate::Storage).
#[derive(Debug)]
pub struct Database {
    table: RwLock<HashMap<String, String>>,
    dirty: Arc<AtomicBool>,
}

impl Database {
    pub(crate) fn new(dirty: Arc<AtomicBool>) -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
            dirty,
        }
    }

    pub(crate) fn with_table(table: HashMap<String, String>, dirty: Arc<AtomicBool>) -> Self {
        Self {
            table: RwLock::new(table),
            dirty,
        }
    }

    /// Insert or overwrite. Setting an existing key silently replaces its
    /// value; there is no create-once variant.
    pub async fn set(&self, key: String, value: String) {
        self.table.write().await.insert(key, value);
        self.dirty.store(true, Ordering::Relaxed);
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.table.read().await.get(key).cloned()
    }

    /// Remove a key. Unlike `set`, deleting an absent key is an error.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let mut table = self.table.write().await;
        if table.remove(key).is_none() {
            return Err(StoreError::KeyNotFound(key.to_string()));
        }
        drop(table);
        self.dirty.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Current key names, in no particular order.
    pub async fn keys(&self) -> Vec<String> {
        self.table.read().await.keys().cloned().collect()
    }

    /// Copy of the full table, detached from the lock.
    pub async fn snapshot_table(&self) -> HashMap<String, String> {
        self.table.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.is_empty()
    }
}
