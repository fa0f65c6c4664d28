use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::{fmt::Debug, path::PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use songs_server::config::{self, SongsStorage, IN_MEMORY_SONGS_FILE};
use songs_server::server::{run_server, RequestsLoggingLevel, ServerConfig};
use songs_server::song_store::{InMemorySongStore, JsonFileSongStore, SongStore};
use songs_server::songs::SongManager;

fn parse_path(s: &str) -> Result<PathBuf, String> {
    if s == IN_MEMORY_SONGS_FILE {
        return Ok(PathBuf::from(s));
    }
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// JSON file holding the songs. Use ":memory:" to keep them in memory only.
    #[clap(long, value_parser = parse_path, default_value = "data/songs.json")]
    pub songs_file: PathBuf,

    /// The address to bind to.
    #[clap(long, default_value = "0.0.0.0")]
    pub host: String,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "body")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Answer 500 when the songs file cannot be written, instead of logging
    /// the failure and reporting success.
    #[clap(long)]
    pub strict_writes: bool,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            songs_file: args.songs_file.clone(),
            host: args.host.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            strict_writes: args.strict_writes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  storage: {:?}", app_config.storage);
    info!("  address: {}", app_config.bind_address());
    info!("  requests logging: {}", app_config.logging_level);
    info!("  write failures: {:?}", app_config.write_failure_policy);

    let song_store: Arc<dyn SongStore> = match &app_config.storage {
        SongsStorage::File(path) => {
            if !path.exists() {
                info!(
                    "Songs file {:?} does not exist yet, it will be created on the first write",
                    path
                );
            }
            Arc::new(JsonFileSongStore::new(path))
        }
        SongsStorage::InMemory => {
            info!("Keeping songs in memory, nothing will be persisted");
            Arc::new(InMemorySongStore::new())
        }
    };

    let song_manager = Arc::new(SongManager::new(
        song_store,
        app_config.write_failure_policy,
    ));

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level,
        host: app_config.host,
        port: app_config.port,
        frontend_dir_path: app_config.frontend_dir_path,
    };

    run_server(server_config, song_manager).await
}
