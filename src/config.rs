//! Client configuration.
//!
//! The backend base address is fixed configuration: defaults, then the TOML
//! config file, then `VIGIA__`-prefixed environment variables. Nothing edits
//! it at runtime.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "vigia";

const ENV_PREFIX: &str = "VIGIA";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Where the backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Per-user configuration directory for this client.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("resolving user config directory")?;
    Ok(base.join(APP_NAME))
}

/// Default location of the persisted session pair.
pub fn session_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("session.toml"))
}

/// Load configuration from defaults, the config file, and the environment.
pub fn load(config_file: Option<&Path>) -> Result<ClientConfig> {
    let config_file = match config_file {
        Some(path) => path.to_path_buf(),
        None => config_dir()?.join("config.toml"),
    };

    let built = Config::builder()
        .set_default("server.base_url", DEFAULT_BASE_URL)?
        .set_default("logging.level", "info")?
        .add_source(
            File::from(config_file.as_path())
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .context("building configuration")?;

    built
        .try_deserialize()
        .context("deserializing configuration")
}
