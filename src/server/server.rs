use anyhow::{Context, Result};
use std::any::Any;
use std::time::Duration;

use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir};
use tracing::{error, info};

use axum::{
    extract::State,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::songs::{error_response, make_songs_routes, INTERNAL_ERROR_MESSAGE};
use super::{log_requests, state::*, ServerConfig};

pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

async fn route_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND_MESSAGE)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Request handler panicked: {}", details);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

pub fn make_app(config: ServerConfig, song_manager: GuardedSongManager) -> Router {
    let state = ServerState::new(config.clone(), song_manager);


    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service = ServeDir::new(frontend_path)
                .append_index_html_on_directories(true)
                .not_found_service(route_not_found.into_service());
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .fallback(route_not_found)
            .with_state(state.clone()),
    };

    // The bundled front-end talks to /api/songs.
    home_router
        .merge(make_songs_routes("/songs", state.clone()))
        .merge(make_songs_routes("/api/songs", state.clone()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state, log_requests))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(err) => error!("Could not listen for Ctrl+C: {}", err),
    }
}

pub async fn run_server(config: ServerConfig, song_manager: GuardedSongManager) -> Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    let app = make_app(config, song_manager);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
