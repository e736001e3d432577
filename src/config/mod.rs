//! Configuration module
//!
//! Handles connection and protocol settings stored as TOML

mod settings;

pub use settings::{AppConfig, ConfigError, LoggingConfig};

use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the application configuration directory
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "fisba", "ReadyBeam").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of the configuration file
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}
