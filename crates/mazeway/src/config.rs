//! Application configuration with defaults and JSON persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mazeway_client::{
    ClientConfig, ServiceEndpoint, DEFAULT_GENERATOR_PORT, DEFAULT_HOST, DEFAULT_SOLVER_PORT,
};
use mazeway_protocol::{MazeDimensions, ProtocolError};
use mazeway_session::{SessionConfig, DEFAULT_SAVE_DIR};
use mazeway_transport::frame::DEFAULT_MAX_FRAME_BYTES;
use mazeway_transport::FrameConfig;
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the config file to disk.
    #[error("failed to write config {path}: {source}")]
    Write {
        /// The file that was written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`MazewayConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),

    /// The config could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Everything a Mazeway client needs to know up front.
///
/// Missing fields take their defaults, unknown fields are ignored, so an
/// old config file keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazewayConfig {
    /// Host running both services.
    pub host: String,
    /// Maze generator port.
    pub generator_port: u16,
    /// Maze solver port.
    pub solver_port: u16,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Write-and-read timeout per round trip, in milliseconds.
    pub request_timeout_ms: u64,
    /// Largest frame sent or accepted, in bytes.
    pub max_frame_bytes: u32,
    /// Directory for saved mazes.
    pub save_dir: PathBuf,
    /// Board rows offered when the player does not pick a size.
    pub default_rows: usize,
    /// Board columns offered when the player does not pick a size.
    pub default_cols: usize,
    /// Tracing filter used when `RUST_LOG` is unset (e.g. `"info"`,
    /// `"mazeway_client=debug"`).
    pub log_level: String,
}

impl Default for MazewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            generator_port: DEFAULT_GENERATOR_PORT,
            solver_port: DEFAULT_SOLVER_PORT,
            connect_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            default_rows: 10,
            default_cols: 10,
            log_level: "info".to_string(),
        }
    }
}

impl MazewayConfig {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reads a config file, or returns the defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Writes the config as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let serialized = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, serialized).map_err(write_err)
    }

    /// Where the generator listens.
    pub fn generator_endpoint(&self) -> ServiceEndpoint {
        ServiceEndpoint::new(self.host.clone(), self.generator_port)
    }

    /// Where the solver listens.
    pub fn solver_endpoint(&self) -> ServiceEndpoint {
        ServiceEndpoint::new(self.host.clone(), self.solver_port)
    }

    /// Timeouts and frame limits for both clients.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            frames: FrameConfig {
                max_frame_bytes: self.max_frame_bytes,
            },
        }
    }

    /// Settings for the session layer.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            save_dir: self.save_dir.clone(),
        }
    }

    /// The default board size.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidDimensions`] if the configured size is not
    /// a legal maze size.
    pub fn default_dimensions(&self) -> Result<MazeDimensions, ProtocolError> {
        MazeDimensions::new(self.default_rows, self.default_cols)
    }
}
