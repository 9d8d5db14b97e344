//! Error types for rt-storage

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache file: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Cache lock poisoned")]
    Poisoned,
}
