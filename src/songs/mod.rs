mod error;
pub mod filter;
mod manager;
mod models;

pub use error::SongsError;
pub use filter::SongFilter;
pub use manager::{SongManager, WriteFailurePolicy};
pub use models::{NewSong, SongPatch};
