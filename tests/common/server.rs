//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own songs file.

use super::constants::*;
use super::fixtures::{create_test_frontend, create_test_songs_file, create_unwritable_songs_file};
use songs_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use songs_server::song_store::JsonFileSongStore;
use songs_server::songs::{SongManager, WriteFailurePolicy};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// How the test server should be set up.
#[derive(Default)]
pub struct TestServerOptions {
    /// Serve a temporary front-end directory.
    pub with_frontend: bool,
    /// Point the store at a path that cannot be written.
    pub unwritable_store: bool,
    pub write_failure_policy: WriteFailurePolicy,
}

/// Test server instance with an isolated songs file
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Songs file backing this server, for direct inspection in tests
    pub songs_file: PathBuf,

    // Private fields - keep resources alive until drop
    _temp_data_dir: TempDir,
    _temp_frontend_dir: Option<TempDir>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server on a random port, backed by the fixture collection.
    pub async fn spawn() -> Self {
        Self::spawn_with(TestServerOptions::default()).await
    }

    /// Spawns a server on a random port with the given options.
    ///
    /// # Panics
    ///
    /// Panics if fixtures cannot be created, the port cannot be bound, or the
    /// server does not become ready within the timeout.
    pub async fn spawn_with(options: TestServerOptions) -> Self {
        let (temp_data_dir, songs_file) = if options.unwritable_store {
            create_unwritable_songs_file().expect("Failed to create unwritable songs file")
        } else {
            create_test_songs_file().expect("Failed to create test songs file")
        };

        let temp_frontend_dir = if options.with_frontend {
            Some(create_test_frontend().expect("Failed to create test frontend"))
        } else {
            None
        };

        let store = Arc::new(JsonFileSongStore::new(&songs_file));
        let song_manager = Arc::new(SongManager::new(store, options.write_failure_policy));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            host: "127.0.0.1".to_string(),
            port,
            frontend_dir_path: temp_frontend_dir
                .as_ref()
                .map(|d| d.path().to_string_lossy().to_string()),
        };
        let app = make_app(config, song_manager);

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            songs_file,
            _temp_data_dir: temp_data_dir,
            _temp_frontend_dir: temp_frontend_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Reads the songs file as it is on disk right now.
    pub fn read_songs_file(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(&self.songs_file).expect("Failed to read songs file");
        serde_json::from_str(&content).expect("Songs file is not valid JSON")
    }

    /// Waits for the server to answer on the songs listing
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/songs", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
