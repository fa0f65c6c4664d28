//! JSON file backed song store.

use super::trait_def::{SongStore, StoreError};
use super::Song;
use std::{
    fs::{self, File},
    io::{BufReader, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::debug;

/// Keeps the collection as a pretty-printed JSON array in a single file.
///
/// Saves go to a temporary file next to the target which is then renamed
/// over it, so the document on disk is always either the old or the new one.
pub struct JsonFileSongStore {
    file_path: PathBuf,
}

impl JsonFileSongStore {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        JsonFileSongStore {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl SongStore for JsonFileSongStore {
    fn load(&self) -> Result<Vec<Song>, StoreError> {
        let file = File::open(&self.file_path)?;
        let songs: Vec<Song> = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded {} songs from {:?}", songs.len(), self.file_path);
        Ok(songs)
    }

    fn save(&self, songs: &[Song]) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let json_string = serde_json::to_string_pretty(songs)?;
        let mut temp_file = NamedTempFile::new_in(&dir)?;
        temp_file.write_all(json_string.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(&self.file_path)?;

        debug!("Saved {} songs to {:?}", songs.len(), self.file_path);
        Ok(())
    }
}
