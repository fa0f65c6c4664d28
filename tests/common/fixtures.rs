//! Test fixture creation for the songs file and the front-end directory

use super::constants::*;
use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary data directory with a songs file holding the fixture
/// collection. Returns (temp_dir, songs_file_path).
pub fn create_test_songs_file() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let songs_file = dir.path().join("songs.json");

    let songs = json!([
        {
            "id": SONG_1_ID,
            "title": SONG_1_TITLE,
            "artist": SONG_1_ARTIST,
            "album": "A Night at the Opera",
            "year": 1975,
            "genre": "Rock",
            "duration": "5:55"
        },
        {
            "id": SONG_2_ID,
            "title": SONG_2_TITLE,
            "artist": "Miles Davis",
            "album": "Kind of Blue",
            "year": 1959,
            "genre": "Jazz",
            "duration": "9:22"
        },
        {
            "id": SONG_3_ID,
            "title": "No One Knows",
            "artist": "Queens of the Stone Age",
            "album": "Songs for the Deaf",
            "year": 2002,
            "genre": "Alternative Rock",
            "duration": "4:38"
        }
    ]);
    fs::write(&songs_file, serde_json::to_string_pretty(&songs)?)?;

    Ok((dir, songs_file))
}

/// Creates a temporary data directory whose songs file can be neither read
/// nor written: its parent is a regular file.
pub fn create_unwritable_songs_file() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory")?;
    Ok((dir, blocker.join("songs.json")))
}

/// Creates a temporary front-end directory with an index page.
pub fn create_test_frontend() -> Result<TempDir> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("index.html"),
        "<!doctype html><title>Songs</title>",
    )?;
    fs::write(dir.path().join("app.js"), "console.log('songs');")?;
    Ok(dir)
}
