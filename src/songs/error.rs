use crate::song_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SongsError {
    #[error("{0}")]
    Validation(String),

    #[error("Song {0} not found")]
    NotFound(i64),

    #[error("No song id left to assign")]
    IdsExhausted,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
