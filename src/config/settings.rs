//! Application settings

use crate::core::transaction::ExecutorOptions;
use crate::core::transport::SerialConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No platform configuration directory
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Reading or writing the file failed
    #[error("Config file {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File content is not valid configuration
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Device address on the bus
    pub address: u8,
    /// Serial connection
    pub connection: SerialConfig,
    /// Response checks
    pub protocol: ExecutorOptions,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: 0,
            connection: SerialConfig::default(),
            protocol: ExecutorOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = super::config_file().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load config from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = super::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(io_err)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. "info", "readybeam_core=debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::SerialParity;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.connection.baud_rate, 57600);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.address = 3;
        config.connection.port = "COM7".to_string();
        config.connection.parity = SerialParity::Even;
        config.protocol.verify_checksum = true;
        config.logging.level = "debug".to_string();

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "address = 2\n\n[connection]\nport = \"/dev/ttyACM0\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.address, 2);
        assert_eq!(config.connection.port, "/dev/ttyACM0");
        assert_eq!(config.connection.baud_rate, 57600);
        assert_eq!(config.connection.timeout_ms, 1000);
        assert!(!config.protocol.verify_sequence);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "address = \"zero\"").unwrap();

        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
