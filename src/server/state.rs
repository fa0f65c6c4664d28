use axum::extract::FromRef;

use crate::songs::SongManager;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedSongManager = Arc<SongManager>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub song_manager: GuardedSongManager,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, song_manager: GuardedSongManager) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            song_manager,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedSongManager {
    fn from_ref(input: &ServerState) -> Self {
        input.song_manager.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
