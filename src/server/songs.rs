//! `/songs` routes.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error};

use super::state::{GuardedSongManager, ServerState};
use crate::song_store::Song;
use crate::songs::{NewSong, SongFilter, SongPatch, SongsError};

pub const SONG_NOT_FOUND_MESSAGE: &str = "Song not found";
pub const SONG_DELETED_MESSAGE: &str = "Song deleted";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
struct DeletedSongResponse {
    message: &'static str,
    song: Song,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for SongsError {
    fn into_response(self) -> Response {
        match self {
            SongsError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
            SongsError::NotFound(id) => {
                debug!("Song {} not found", id);
                error_response(StatusCode::NOT_FOUND, SONG_NOT_FOUND_MESSAGE)
            }
            SongsError::IdsExhausted => {
                error!("Cannot create song: largest id is already {}", i64::MAX);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            SongsError::Store(err) => {
                error!("Store failure while handling request: {}", err);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

/// Ids come from the path as text; anything that is not an integer simply
/// matches no song.
fn parse_song_id(raw: &str) -> Result<i64, Response> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| error_response(StatusCode::NOT_FOUND, SONG_NOT_FOUND_MESSAGE))
}

fn bad_request<E: std::fmt::Display>(rejection: E) -> Response {
    debug!("Rejected request: {}", rejection);
    error_response(StatusCode::BAD_REQUEST, rejection.to_string())
}

async fn list_songs(
    State(song_manager): State<GuardedSongManager>,
    filter: Result<Query<SongFilter>, QueryRejection>,
) -> Response {
    match filter {
        Ok(Query(filter)) => Json(song_manager.list(&filter)).into_response(),
        Err(rejection) => bad_request(rejection.body_text()),
    }
}

async fn get_song(
    State(song_manager): State<GuardedSongManager>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_song_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match song_manager.get(id) {
        Ok(song) => Json(song).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn create_song(
    State(song_manager): State<GuardedSongManager>,
    body: Result<Json<NewSong>, JsonRejection>,
) -> Response {
    let Json(new_song) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    match song_manager.create(new_song) {
        Ok(song) => (StatusCode::CREATED, Json(song)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn update_song(
    State(song_manager): State<GuardedSongManager>,
    Path(id): Path<String>,
    body: Result<Json<SongPatch>, JsonRejection>,
) -> Response {
    let Json(patch) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let id = match parse_song_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match song_manager.update(id, patch) {
        Ok(song) => Json(song).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_song(
    State(song_manager): State<GuardedSongManager>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_song_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match song_manager.delete(id) {
        Ok(song) => Json(DeletedSongResponse {
            message: SONG_DELETED_MESSAGE,
            song,
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}

/// Song routes under `prefix`. A trailing slash is accepted on every path.
pub fn make_songs_routes(prefix: &str, state: ServerState) -> Router {
    let collection = get(list_songs).post(create_song);
    let item = get(get_song).put(update_song).delete(delete_song);
    Router::new()
        .route(prefix, collection.clone())
        .route(&format!("{}/", prefix), collection)
        .route(&format!("{}/{{id}}", prefix), item.clone())
        .route(&format!("{}/{{id}}/", prefix), item)
        .with_state(state)
}
