use super::{NewSong, SongFilter, SongPatch, SongsError};
use crate::song_store::{Song, SongStore, DEFAULT_ALBUM, DEFAULT_DURATION, DEFAULT_GENRE};
use chrono::Datelike;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

/// What to do when persisting the collection fails after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteFailurePolicy {
    /// Log the failure and report the mutation as successful anyway.
    #[default]
    LogAndContinue,
    /// Return the failure to the caller.
    Fail,
}

/// Create, read, update and delete on top of a [`SongStore`].
///
/// Every operation loads the whole collection from the store. Mutations
/// hold `write_lock` from load to save, so two mutations in this process
/// never work on the same base collection.
pub struct SongManager {
    store: Arc<dyn SongStore>,
    write_failure_policy: WriteFailurePolicy,
    write_lock: Mutex<()>,
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// `None` once the largest stored id is `i64::MAX`.
fn next_song_id(songs: &[Song]) -> Option<i64> {
    match songs.iter().map(|s| s.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

impl SongManager {
    pub fn new(store: Arc<dyn SongStore>, write_failure_policy: WriteFailurePolicy) -> Self {
        SongManager {
            store,
            write_failure_policy,
            write_lock: Mutex::new(()),
        }
    }

    pub fn write_failure_policy(&self) -> WriteFailurePolicy {
        self.write_failure_policy
    }

    /// Loads the collection, falling back to an empty one when the store
    /// cannot be read. Read failures never reach the caller.
    fn load_songs(&self) -> Vec<Song> {
        match self.store.load() {
            Ok(songs) => songs,
            Err(err) => {
                error!("Failed to load songs, using an empty collection: {}", err);
                Vec::new()
            }
        }
    }

    fn save_songs(&self, songs: &[Song]) -> Result<(), SongsError> {
        match self.store.save(songs) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("Failed to save {} songs: {}", songs.len(), err);
                match self.write_failure_policy {
                    WriteFailurePolicy::LogAndContinue => Ok(()),
                    WriteFailurePolicy::Fail => Err(err.into()),
                }
            }
        }
    }

    pub fn list(&self, filter: &SongFilter) -> Vec<Song> {
        let songs = self.load_songs();
        if filter.is_empty() {
            return songs;
        }
        let total = songs.len();
        let filtered = filter.apply(songs);
        debug!("Filter {:?} kept {} of {} songs", filter, filtered.len(), total);
        filtered
    }

    pub fn get(&self, id: i64) -> Result<Song, SongsError> {
        self.load_songs()
            .into_iter()
            .find(|s| s.id == id)
            .ok_or(SongsError::NotFound(id))
    }

    pub fn create(&self, new_song: NewSong) -> Result<Song, SongsError> {
        let (title, artist) = match (non_empty(new_song.title), non_empty(new_song.artist)) {
            (Some(title), Some(artist)) => (title, artist),
            _ => {
                return Err(SongsError::Validation(
                    "Title and artist are required".to_string(),
                ))
            }
        };

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut songs = self.load_songs();
        let id = next_song_id(&songs).ok_or(SongsError::IdsExhausted)?;

        let song = Song {
            id,
            title,
            artist,
            album: non_empty(new_song.album).unwrap_or_else(|| DEFAULT_ALBUM.to_string()),
            year: new_song
                .year
                .filter(|year| *year != 0)
                .unwrap_or_else(current_year),
            genre: non_empty(new_song.genre).unwrap_or_else(|| DEFAULT_GENRE.to_string()),
            duration: non_empty(new_song.duration)
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        };

        songs.push(song.clone());
        self.save_songs(&songs)?;

        info!("Created song {} \"{}\" by {}", song.id, song.title, song.artist);
        Ok(song)
    }

    pub fn update(&self, id: i64, patch: SongPatch) -> Result<Song, SongsError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut songs = self.load_songs();

        let song = songs
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SongsError::NotFound(id))?;

        if let Some(title) = patch.title {
            song.title = title;
        }
        if let Some(artist) = patch.artist {
            song.artist = artist;
        }
        if let Some(album) = patch.album {
            song.album = album;
        }
        if let Some(year) = patch.year {
            song.year = year;
        }
        if let Some(genre) = patch.genre {
            song.genre = genre;
        }
        if let Some(duration) = patch.duration {
            song.duration = duration;
        }
        let updated = song.clone();

        self.save_songs(&songs)?;

        info!("Updated song {}", id);
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> Result<Song, SongsError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut songs = self.load_songs();

        let index = songs
            .iter()
            .position(|s| s.id == id)
            .ok_or(SongsError::NotFound(id))?;
        let removed = songs.remove(index);

        self.save_songs(&songs)?;

        info!("Deleted song {}", id);
        Ok(removed)
    }
}
