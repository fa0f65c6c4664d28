mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use crate::songs::WriteFailurePolicy;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// Songs file value that selects the in-memory store.
pub const IN_MEMORY_SONGS_FILE: &str = ":memory:";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub songs_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub strict_writes: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            songs_file: PathBuf::from("data/songs.json"),
            host: "0.0.0.0".to_string(),
            port: 3000,
            logging_level: RequestsLoggingLevel::Body,
            frontend_dir_path: None,
            strict_writes: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SongsStorage {
    File(PathBuf),
    InMemory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: SongsStorage,
    pub host: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub write_failure_policy: WriteFailurePolicy,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let songs_file = file
            .songs_file
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.songs_file.clone());

        let storage = if songs_file.as_os_str() == IN_MEMORY_SONGS_FILE {
            SongsStorage::InMemory
        } else {
            if songs_file.is_dir() {
                bail!("songs_file is a directory: {:?}", songs_file);
            }
            if let Some(parent) = songs_file.parent() {
                if parent.exists() && !parent.is_dir() {
                    bail!("Parent of songs_file is not a directory: {:?}", parent);
                }
            }
            SongsStorage::File(songs_file)
        };

        let host = file.host.unwrap_or_else(|| cli.host.clone());
        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());
        if let Some(dir) = &frontend_dir_path {
            let dir = PathBuf::from(dir);
            if !dir.is_dir() {
                bail!("Frontend directory does not exist: {:?}", dir);
            }
        }

        let write_failure_policy = if file.strict_writes.unwrap_or(cli.strict_writes) {
            WriteFailurePolicy::Fail
        } else {
            WriteFailurePolicy::LogAndContinue
        };

        Ok(Self {
            storage,
            host,
            port,
            logging_level,
            frontend_dir_path,
            write_failure_policy,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
