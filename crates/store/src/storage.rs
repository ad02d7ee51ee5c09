use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::database::Database;
use crate::errors::{Result, StoreError};

/// Full point-in-time copy of the store: database name -> key -> value.
pub type Snapshot = HashMap<String, HashMap<String, String>>;

/// The top-level registry of named databases.
///
/// The outer lock protects only the name -> database mapping; each
/// [`Database`] serializes access to its own table. Per-key operations run
/// with the registry lock already released, so traffic on different
/// databases never contends.
pub struct Storage {
    databases: RwLock<HashMap<String, Arc<Database>>>,
    dirty: Arc<AtomicBool>,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            databases: RwLock::new(HashMap::new()),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn create_database(&self, name: &str) -> Result<()> {
        let mut databases = self.databases.write().await;
        if databases.contains_key(name) {
            return Err(StoreError::DatabaseExists(name.to_string()));
        }
        databases.insert(
            name.to_string(),
            Arc::new(Database::new(self.dirty.clone())),
        );
        drop(databases);
        self.dirty.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Resolve a name to its database handle.
    ///
    /// The handle is independent of the registry lock: it stays usable to
    /// completion even if the database is deleted concurrently, and the
    /// table itself is freed once the last handle drops.
    pub async fn database(&self, name: &str) -> Result<Arc<Database>> {
        self.databases
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::DatabaseNotFound(name.to_string()))
    }

    pub async fn delete_database(&self, name: &str) -> Result<()> {
        let mut databases = self.databases.write().await;
        if databases.remove(name).is_none() {
            return Err(StoreError::DatabaseNotFound(name.to_string()));
        }
        drop(databases);
        self.dirty.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Current database names, in no particular order.
    pub async fn database_names(&self) -> Vec<String> {
        self.databases.read().await.keys().cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.databases.read().await.len()
    }

    /// Whether any mutation landed since the last successful snapshot write
    /// (or since startup, if none has).
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    pub(crate) fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::Relaxed);
    }

    /// Consistent copy of the whole store.
    ///
    /// The registry lock is held across the copy loop, so the database set
    /// is exact as of one instant; each table is cloned under its own read
    /// lock, which serializes the copy against writers of that table.
    pub async fn make_snapshot(&self) -> Snapshot {
        let databases = self.databases.read().await;
        let mut snapshot = Snapshot::with_capacity(databases.len());
        for (name, database) in databases.iter() {
            snapshot.insert(name.clone(), database.snapshot_table().await);
        }
        snapshot
    }

    /// Replace the store contents with a previously captured snapshot and
    /// leave it clean. Used to seed the registry at startup.
    pub async fn load(&self, snapshot: Snapshot) {
        let mut databases = self.databases.write().await;
        databases.clear();
        for (name, table) in snapshot {
            databases.insert(name, Arc::new(Database::with_table(table, self.dirty.clone())));
        }
        drop(databases);
        self.clear_dirty();
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
