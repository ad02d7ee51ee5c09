use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant};
use tracing::{debug, error, info};

use crate::snapshot;
use crate::storage::Storage;

/// Fixed delay between periodic snapshot attempts.
pub const SNAPSHOT_INTERVAL: Duration = Duration::from_secs(30);

/// Periodic snapshot loop.
///
/// Ticks every [`SNAPSHOT_INTERVAL`] and saves the store if it is dirty.
/// When the shutdown channel fires (or closes), makes one final attempt and
/// exits, whether or not that attempt succeeds.
pub async fn run(storage: Arc<Storage>, path: PathBuf, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = time::interval_at(Instant::now() + SNAPSHOT_INTERVAL, SNAPSHOT_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                perform_snapshot(&storage, &path).await;
            }
            _ = shutdown.changed() => {
                info!("performing final snapshot save");
                perform_snapshot(&storage, &path).await;
                return;
            }
        }
    }
}

/// One snapshot attempt: skipped while the store is clean; the dirty flag
/// is cleared only after the write lands, so a failed write is retried on
/// the next tick.
pub async fn perform_snapshot(storage: &Storage, path: &Path) {
    if !storage.is_dirty() {
        debug!("store unchanged since last snapshot, skipping save");
        return;
    }

    match snapshot::save(storage, path).await {
        Ok(()) => {
            storage.clear_dirty();
            info!(path = %path.display(), "snapshot saved");
        }
        Err(err) => {
            error!(error = %err, path = %path.display(), "snapshot save failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("hako_scheduler_{}.dat", uuid::Uuid::new_v4()))
    }

    async fn dirty_storage() -> Arc<Storage> {
        let storage = Arc::new(Storage::new());
        storage.create_database("users").await.unwrap();
        let db = storage.database("users").await.unwrap();
        db.set("alice".into(), "1".into()).await;
        storage
    }

    #[tokio::test]
    async fn clean_store_skips_the_write() {
        let storage = Storage::new();
        let path = temp_path();
        perform_snapshot(&storage, &path).await;
        assert!(tokio::fs::metadata(&path).await.is_err(), "no file expected");
    }

    #[tokio::test]
    async fn dirty_store_is_saved_and_flag_cleared() {
        let storage = dirty_storage().await;
        let path = temp_path();

        perform_snapshot(&storage, &path).await;

        assert!(!storage.is_dirty());
        let restored = snapshot::load_from_file(&path).await.unwrap();
        assert_eq!(restored["users"].get("alice").map(String::as_str), Some("1"));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn failed_write_leaves_dirty_set() {
        let storage = dirty_storage().await;
        // Parent directory does not exist, so the write fails.
        let path = temp_path().join("missing-dir").join("snap.dat");

        perform_snapshot(&storage, &path).await;

        assert!(storage.is_dirty(), "failed save must keep the store dirty");
    }

    #[tokio::test]
    async fn shutdown_signal_triggers_a_final_save() {
        let storage = dirty_storage().await;
        let path = temp_path();

        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(run(storage.clone(), path.clone(), rx));

        tx.send(true).unwrap();
        task.await.unwrap();

        assert!(!storage.is_dirty());
        assert!(snapshot::load_from_file(&path).await.is_ok());

        let _ = tokio::fs::remove_file(&path).await;
    }
}
