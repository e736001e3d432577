//! # ReadyBeam Core Library
//!
//! Serial protocol client for FISBA ReadyBeam multi-channel laser modules.
//! The module speaks MeCom: ASCII-hex frames protected by a CRC-16/CCITT,
//! exchanged strictly one request and one reply at a time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use readybeam_core::{ExecutorOptions, ReadyBeam, SerialConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SerialConfig::new("/dev/ttyUSB0", 57600);
//!     let mut laser = ReadyBeam::open(config, 0, ExecutorOptions::default())?;
//!
//!     println!("Status: {}", laser.get_device_status()?);
//!     laser.set_brightness(&[10.0, 0.0, 20.0])?;
//!
//!     laser.close()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;

// Re-exports for convenience
pub use crate::cli::{CliResult, ExitCodes};
pub use crate::config::{AppConfig, ConfigError};
pub use crate::core::device::{DeviceStatus, ReadyBeam};
pub use crate::core::error::LaserError;
pub use crate::core::protocol::{Channel, CommandFrame, ParameterId, ResponseFrame, Value};
pub use crate::core::transaction::{ExecutorOptions, TransactionExecutor};
pub use crate::core::transport::{SerialConfig, SerialTransport, TransportError, TransportTrait};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
