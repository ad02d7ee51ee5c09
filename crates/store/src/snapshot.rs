use std::path::Path;

use tracing::debug;

use crate::errors::Result;
use crate::storage::{Snapshot, Storage};

/// Serialize a snapshot into a single self-contained blob.
///
/// The blob carries no header or version field: a file produced by a
/// different format simply fails to decode and is treated as no snapshot.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>> {
    Ok(bincode::serialize(snapshot)?)
}

pub fn decode(bytes: &[u8]) -> Result<Snapshot> {
    Ok(bincode::deserialize(bytes)?)
}

/// Capture a consistent copy of `storage` and write it to `path`.
///
/// The file is created or truncated in place, not renamed into place: a
/// crash mid-write can leave a blob that fails to decode on the next start.
/// On encode failure nothing is written and the previous file is untouched.
pub async fn save(storage: &Storage, path: &Path) -> Result<()> {
    let snapshot = storage.make_snapshot().await;
    let bytes = encode(&snapshot)?;
    tokio::fs::write(path, bytes).await?;
    debug!(path = %path.display(), databases = snapshot.len(), "snapshot written");
    Ok(())
}

/// Read and decode a snapshot file. The caller is expected to fall back to
/// an empty store when this fails.
pub async fn load_from_file(path: &Path) -> Result<Snapshot> {
    let bytes = tokio::fs::read(path).await?;
    decode(&bytes)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::errors::StoreError;

    fn temp_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("hako_snapshot_{}.dat", uuid::Uuid::new_v4()))
    }

    #[test]
    fn round_trip_of_empty_store() {
        let snapshot = Snapshot::new();
        let bytes = encode(&snapshot).unwrap();
        assert_eq!(decode(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn round_trip_preserves_databases_and_empty_strings() {
        let mut users = HashMap::new();
        users.insert("alice".to_string(), "{\"age\":30}".to_string());
        users.insert(String::new(), String::new());

        let mut snapshot = Snapshot::new();
        snapshot.insert("users".to_string(), users);
        snapshot.insert("empty".to_string(), HashMap::new());

        let bytes = encode(&snapshot).unwrap();
        assert_eq!(decode(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn decode_rejects_foreign_bytes() {
        let err = decode(b"hako").unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }

    #[test]
    fn decode_rejects_truncated_blob() {
        let mut snapshot = Snapshot::new();
        let mut table = HashMap::new();
        table.insert("key".to_string(), "value".to_string());
        snapshot.insert("db".to_string(), table);

        let bytes = encode(&snapshot).unwrap();
        let err = decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }

    #[tokio::test]
    async fn save_then_load_file_round_trip() {
        let storage = Storage::new();
        storage.create_database("users").await.unwrap();
        let db = storage.database("users").await.unwrap();
        db.set("alice".into(), "1".into()).await;

        let path = temp_path();
        save(&storage, &path).await.unwrap();

        let restored = load_from_file(&path).await.unwrap();
        assert_eq!(restored, storage.make_snapshot().await);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn load_from_missing_file_is_an_io_error() {
        let err = load_from_file(&temp_path()).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
