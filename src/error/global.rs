use std::io;

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    // ==== System / External ====
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    // ==== Credential file ====
    #[error("Credential file is corrupted: {0}")]
    Corrupt(String),

    #[error("Unsupported credential file version: {0}")]
    UnsupportedVersion(u8),

    #[error("Credential file changed since it was read")]
    ConcurrentModification,
}
