//! In-memory song store.
//!
//! Nothing survives the process. Used by tests and by `--songs-file :memory:`.

use super::trait_def::{SongStore, StoreError};
use super::Song;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemorySongStore {
    songs: Mutex<Vec<Song>>,
}

impl InMemorySongStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_songs(songs: Vec<Song>) -> Self {
        InMemorySongStore {
            songs: Mutex::new(songs),
        }
    }

    /// Current content, without going through the trait.
    pub fn snapshot(&self) -> Vec<Song> {
        self.songs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl SongStore for InMemorySongStore {
    fn load(&self) -> Result<Vec<Song>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, songs: &[Song]) -> Result<(), StoreError> {
        *self.songs.lock().unwrap_or_else(|e| e.into_inner()) = songs.to_vec();
        Ok(())
    }
}
