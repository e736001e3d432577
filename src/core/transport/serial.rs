//! Serial port transport implementation

use super::{TransportError, TransportTrait};
use serde::{Deserialize, Serialize};
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{Read, Write};
use std::time::Duration;

/// Default port of the USB serial adapter shipped with the module
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Baud rate the module ships with
pub const DEFAULT_BAUD_RATE: u32 = 57600;

/// Default read/write timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Serial port parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerialParity {
    /// No parity
    #[default]
    None,
    /// Odd parity
    Odd,
    /// Even parity
    Even,
}

/// Serial port configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Port name (e.g., COM3, /dev/ttyUSB0)
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Data bits (5, 6, 7, 8)
    pub data_bits: u8,
    /// Stop bits (1, 2)
    pub stop_bits: u8,
    /// Parity
    pub parity: SerialParity,
    /// Read and write timeout in milliseconds
    pub timeout_ms: u64,
}

impl SerialConfig {
    /// Create a new serial configuration with default settings
    pub fn new(port: &str, baud_rate: u32) -> Self {
        Self {
            port: port.to_string(),
            baud_rate,
            data_bits: 8,
            stop_bits: 1,
            parity: SerialParity::None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set the read/write timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set parity
    #[must_use]
    pub fn parity(mut self, parity: SerialParity) -> Self {
        self.parity = parity;
        self
    }

    /// Timeout as a [`Duration`]
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PORT, DEFAULT_BAUD_RATE)
    }
}

/// Serial port transport
pub struct SerialTransport {
    config: SerialConfig,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Open the port described by `config`
    pub fn open(config: SerialConfig) -> Result<Self, TransportError> {
        let data_bits = match config.data_bits {
            5 => DataBits::Five,
            6 => DataBits::Six,
            7 => DataBits::Seven,
            _ => DataBits::Eight,
        };

        let stop_bits = match config.stop_bits {
            2 => StopBits::Two,
            _ => StopBits::One,
        };

        let parity = match config.parity {
            SerialParity::Odd => Parity::Odd,
            SerialParity::Even => Parity::Even,
            SerialParity::None => Parity::None,
        };

        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(data_bits)
            .stop_bits(stop_bits)
            .parity(parity)
            .flow_control(FlowControl::None)
            .timeout(config.timeout_duration())
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice => TransportError::PortNotFound(config.port.clone()),
                serialport::ErrorKind::Io(std::io::ErrorKind::NotFound) => {
                    TransportError::PortNotFound(config.port.clone())
                }
                serialport::ErrorKind::Io(std::io::ErrorKind::PermissionDenied) => {
                    TransportError::PermissionDenied(config.port.clone())
                }
                _ => TransportError::ConnectionFailed(e.to_string()),
            })?;

        tracing::info!(
            "Opened {} @ {} baud (timeout {} ms)",
            config.port,
            config.baud_rate,
            config.timeout_ms
        );

        Ok(Self {
            config,
            port: Some(port),
        })
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn SerialPort>, TransportError> {
        self.port.as_mut().ok_or(TransportError::NotConnected)
    }

    fn clear(&mut self, buffer: ClearBuffer) -> Result<(), TransportError> {
        self.port_mut()?
            .clear(buffer)
            .map_err(|e| TransportError::Io(e.into()))
    }
}

impl TransportTrait for SerialTransport {
    fn write(&mut self, data: &[u8]) -> Result<(), TransportError> {
        match self.port_mut()?.write_all(data) {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => Err(TransportError::Timeout),
            Err(e) => Err(TransportError::Io(e)),
        }
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        match self.port_mut()?.flush() {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => Err(TransportError::Timeout),
            Err(e) => Err(TransportError::Io(e)),
        }
    }

    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>, TransportError> {
        let port = self.port_mut()?;
        let mut buffer = vec![0u8; n];
        let mut filled = 0;

        while filled < n {
            match port.read(&mut buffer[filled..]) {
                Ok(0) => return Err(TransportError::Timeout),
                Ok(count) => filled += count,
                Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {
                    return Err(TransportError::Timeout);
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(TransportError::Io(e)),
            }
        }

        Ok(buffer)
    }

    fn flush_input(&mut self) -> Result<(), TransportError> {
        self.clear(ClearBuffer::Input)
    }

    fn flush_output(&mut self) -> Result<(), TransportError> {
        self.clear(ClearBuffer::Output)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        if self.port.take().is_some() {
            tracing::info!("Closed {}", self.config.port);
        }
        Ok(())
    }

    fn connection_info(&self) -> String {
        format!(
            "{} @ {} baud ({}{}{})",
            self.config.port,
            self.config.baud_rate,
            self.config.data_bits,
            match self.config.parity {
                SerialParity::None => "N",
                SerialParity::Odd => "O",
                SerialParity::Even => "E",
            },
            self.config.stop_bits,
        )
    }
}
