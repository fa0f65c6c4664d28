mod file_store;
mod memory_store;
mod models;
mod trait_def;

pub use file_store::JsonFileSongStore;
pub use memory_store::InMemorySongStore;
pub use models::*;
pub use trait_def::{SongStore, StoreError};
