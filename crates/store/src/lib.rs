//! In-memory multi-tenant key-value storage with snapshot persistence.
//!
//! Two-level structure: a registry ([`Storage`]) of named databases, each an
//! independently locked string table ([`Database`]). The registry can be
//! copied at a point in time, serialized into a single blob and restored at
//! startup; a background task ([`scheduler`]) refreshes the on-disk snapshot
//! while the store is dirty.

pub mod database;
pub mod errors;
pub mod scheduler;
pub mod snapshot;
pub mod storage;

pub use database::Database;
pub use errors::{Result, StoreError};
pub use storage::{Snapshot, Storage};
