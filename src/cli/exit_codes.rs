//! CLI Exit Codes
//!
//! Standard exit codes for CLI operations and automation.

use crate::config::ConfigError;
use crate::core::error::LaserError;
use crate::core::transport::TransportError;
use std::process::ExitCode;

/// Exit code constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCodes;

impl ExitCodes {
    /// Success
    pub const SUCCESS: u8 = 0;

    /// General error
    pub const ERROR: u8 = 1;

    /// Invalid arguments
    pub const INVALID_ARGS: u8 = 2;

    /// Connection failed
    pub const CONNECTION_FAILED: u8 = 3;

    /// Communication timeout
    pub const TIMEOUT: u8 = 4;

    /// Permission denied
    pub const PERMISSION_DENIED: u8 = 7;

    /// Configuration error
    pub const CONFIG_ERROR: u8 = 8;

    /// Protocol error
    pub const PROTOCOL_ERROR: u8 = 9;

    /// Device reported an error
    pub const DEVICE_ERROR: u8 = 13;

    /// Port not found
    pub const PORT_NOT_FOUND: u8 = 14;

    /// Internal error
    pub const INTERNAL_ERROR: u8 = 127;
}

/// CLI operation result
#[derive(Debug)]
pub enum CliResult {
    /// Success with optional message
    Success(Option<String>),

    /// Error with code and message
    Error(u8, String),
}

impl CliResult {
    /// Success without message
    pub fn success() -> Self {
        Self::Success(None)
    }

    /// Error with explicit code
    pub fn error(code: u8, msg: impl Into<String>) -> Self {
        Self::Error(code, msg.into())
    }

    /// Get exit code
    pub fn code(&self) -> u8 {
        match self {
            Self::Success(_) => ExitCodes::SUCCESS,
            Self::Error(code, _) => *code,
        }
    }

    /// Get message
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(Some(msg)) | Self::Error(_, msg) => Some(msg),
            Self::Success(None) => None,
        }
    }

    /// Convert to ExitCode
    pub fn to_exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// Is success?
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<&LaserError> for CliResult {
    fn from(err: &LaserError) -> Self {
        let code = match err {
            LaserError::CommunicationTimeout => ExitCodes::TIMEOUT,
            LaserError::Device { .. } => ExitCodes::DEVICE_ERROR,
            LaserError::ProtocolFormat(_) => ExitCodes::PROTOCOL_ERROR,
            LaserError::InvalidArgument(_) => ExitCodes::INVALID_ARGS,
            LaserError::Transport(TransportError::PortNotFound(_)) => ExitCodes::PORT_NOT_FOUND,
            LaserError::Transport(TransportError::PermissionDenied(_)) => {
                ExitCodes::PERMISSION_DENIED
            }
            LaserError::Transport(TransportError::Timeout) => ExitCodes::TIMEOUT,
            LaserError::Transport(_) => ExitCodes::CONNECTION_FAILED,
        };

        Self::Error(code, err.to_string())
    }
}

impl From<&ConfigError> for CliResult {
    fn from(err: &ConfigError) -> Self {
        Self::Error(ExitCodes::CONFIG_ERROR, err.to_string())
    }
}

/// Classify any error produced while running a command
impl From<&anyhow::Error> for CliResult {
    fn from(err: &anyhow::Error) -> Self {
        if let Some(laser) = err.downcast_ref::<LaserError>() {
            Self::from(laser)
        } else if let Some(config) = err.downcast_ref::<ConfigError>() {
            Self::from(config)
        } else {
            Self::Error(ExitCodes::ERROR, format!("{err:#}"))
        }
    }
}

/// Exit code description
pub fn exit_code_description(code: u8) -> &'static str {
    match code {
        0 => "Success",
        1 => "General error",
        2 => "Invalid arguments",
        3 => "Connection failed",
        4 => "Communication timeout",
        7 => "Permission denied",
        8 => "Configuration error",
        9 => "Protocol error",
        13 => "Device error",
        14 => "Port not found",
        127 => "Internal error",
        _ => "Unknown error",
    }
}

/// Print exit code table
pub fn print_exit_codes() {
    println!("Exit Codes:");
    for code in [0, 1, 2, 3, 4, 7, 8, 9, 13, 14, 127] {
        println!("  {:>3}  {}", code, exit_code_description(code));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_result() {
        let success = CliResult::success();
        assert!(success.is_success());
        assert_eq!(success.code(), 0);

        let error = CliResult::error(3, "Connection failed");
        assert!(!error.is_success());
        assert_eq!(error.code(), 3);
        assert_eq!(error.message(), Some("Connection failed"));
    }

    #[test]
    fn test_from_laser_error() {
        let timeout = CliResult::from(&LaserError::CommunicationTimeout);
        assert_eq!(timeout.code(), ExitCodes::TIMEOUT);

        let device = CliResult::from(&LaserError::Device {
            code: 7,
            message: "Value is out of range",
        });
        assert_eq!(device.code(), ExitCodes::DEVICE_ERROR);
        assert_eq!(device.message(), Some("Device error 7: Value is out of range"));

        let missing = CliResult::from(&LaserError::Transport(TransportError::PortNotFound(
            "/dev/ttyUSB3".to_string(),
        )));
        assert_eq!(missing.code(), ExitCodes::PORT_NOT_FOUND);
    }

    #[test]
    fn test_from_anyhow_downcasts() {
        let err = anyhow::Error::new(LaserError::InvalidArgument("instance 4".to_string()));
        assert_eq!(CliResult::from(&err).code(), ExitCodes::INVALID_ARGS);

        let err = anyhow::Error::new(ConfigError::NoConfigDir);
        assert_eq!(CliResult::from(&err).code(), ExitCodes::CONFIG_ERROR);

        let err = anyhow::anyhow!("something else");
        assert_eq!(CliResult::from(&err).code(), ExitCodes::ERROR);
    }
}
