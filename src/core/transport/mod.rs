//! Transport layer
//!
//! The protocol layer talks to the device through [`TransportTrait`], a
//! blocking byte pipe with explicit buffer flushing. [`SerialTransport`] is
//! the production implementation on top of the `serialport` crate.

mod serial;

pub use serial::{SerialConfig, SerialParity, SerialTransport};

use thiserror::Error;

/// Transport error types
#[derive(Error, Debug)]
pub enum TransportError {
    /// Fewer bytes than requested arrived before the timeout elapsed
    #[error("Timed out waiting for data")]
    Timeout,

    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Port not found
    #[error("Port not found: {0}")]
    PortNotFound(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Not connected
    #[error("Not connected")]
    NotConnected,
}

/// Blocking byte transport used by the transaction executor
///
/// Implementations are owned by exactly one executor; nothing here is shared
/// between threads.
#[cfg_attr(test, mockall::automock)]
pub trait TransportTrait: Send {
    /// Write all bytes
    fn write(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Push buffered output to the device
    fn flush(&mut self) -> Result<(), TransportError>;

    /// Read exactly `n` bytes, failing with [`TransportError::Timeout`] if
    /// fewer arrive within the configured timeout
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>, TransportError>;

    /// Discard unread input
    fn flush_input(&mut self) -> Result<(), TransportError>;

    /// Discard unsent output
    fn flush_output(&mut self) -> Result<(), TransportError>;

    /// Release the underlying device
    fn close(&mut self) -> Result<(), TransportError>;

    /// Get connection info string
    fn connection_info(&self) -> String;
}

impl<T: TransportTrait + ?Sized> TransportTrait for Box<T> {
    fn write(&mut self, data: &[u8]) -> Result<(), TransportError> {
        (**self).write(data)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        (**self).flush()
    }

    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>, TransportError> {
        (**self).read_exact(n)
    }

    fn flush_input(&mut self) -> Result<(), TransportError> {
        (**self).flush_input()
    }

    fn flush_output(&mut self) -> Result<(), TransportError> {
        (**self).flush_output()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }

    fn connection_info(&self) -> String {
        (**self).connection_info()
    }
}
