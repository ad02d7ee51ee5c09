use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database '{0}' already exists")]
    DatabaseExists(String),

    #[error("database '{0}' not found")]
    DatabaseNotFound(String),

    #[error("key '{0}' not found")]
    KeyNotFound(String),

    #[error("snapshot io error: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
}
