//! Failures of the save-game store.

use thiserror::Error;

/// Why a snapshot could not be stored, read, or removed.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save store lock was poisoned")]
    LockPoisoned,

    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode snapshot: {0}")]
    Serialization(String),

    /// The stored bytes do not decode, or decode to another player's save.
    #[error("save file is corrupted: {0}")]
    CorruptedData(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
