//! Listing filters.
//!
//! Each filter keeps the relative order of the songs it lets through.

use crate::song_store::Song;
use serde::Deserialize;

/// Optional criteria accepted by the listing endpoint, all combined with AND.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SongFilter {
    pub artist: Option<String>,
    pub genre: Option<String>,
    /// Compared as a string against the stored year, so "2020" matches 2020
    /// and a non-numeric value matches nothing.
    pub year: Option<String>,
}

fn non_empty(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle_lowercase: &str) -> bool {
    haystack.to_lowercase().contains(needle_lowercase)
}

pub fn filter_by_artist(songs: Vec<Song>, artist: &str) -> Vec<Song> {
    let needle = artist.to_lowercase();
    songs
        .into_iter()
        .filter(|song| contains_ignore_case(&song.artist, &needle))
        .collect()
}

pub fn filter_by_genre(songs: Vec<Song>, genre: &str) -> Vec<Song> {
    let needle = genre.to_lowercase();
    songs
        .into_iter()
        .filter(|song| contains_ignore_case(&song.genre, &needle))
        .collect()
}

pub fn filter_by_year(songs: Vec<Song>, year: &str) -> Vec<Song> {
    songs
        .into_iter()
        .filter(|song| song.year.to_string() == year)
        .collect()
}

impl SongFilter {
    pub fn is_empty(&self) -> bool {
        non_empty(&self.artist).is_none()
            && non_empty(&self.genre).is_none()
            && non_empty(&self.year).is_none()
    }

    /// Applies artist, then genre, then year. Absent or empty criteria pass
    /// everything through.
    pub fn apply(&self, mut songs: Vec<Song>) -> Vec<Song> {
        if let Some(artist) = non_empty(&self.artist) {
            songs = filter_by_artist(songs, artist);
        }
        if let Some(genre) = non_empty(&self.genre) {
            songs = filter_by_genre(songs, genre);
        }
        if let Some(year) = non_empty(&self.year) {
            songs = filter_by_year(songs, year);
        }
        songs
    }
}
