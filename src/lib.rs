//! Songs Server Library
//!
//! HTTP CRUD service over a song collection kept in a single JSON file.
//! Exposed as a library so the binary and the end-to-end tests share it.

pub mod config;
pub mod server;
pub mod song_store;
pub mod songs;

// Re-export commonly used types for convenience
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use song_store::{InMemorySongStore, JsonFileSongStore, Song, SongStore};
pub use songs::{SongFilter, SongManager, SongsError, WriteFailurePolicy};
