//! SongStore trait definition.
//!
//! The whole collection is the unit of storage: callers load every song,
//! work on the vector, and save every song back.

use super::Song;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Could not replace songs file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Trait for song storage backends.
pub trait SongStore: Send + Sync {
    /// Read the full, ordered collection.
    fn load(&self) -> Result<Vec<Song>, StoreError>;

    /// Replace the full collection. Readers never observe a partial write.
    fn save(&self, songs: &[Song]) -> Result<(), StoreError>;
}
