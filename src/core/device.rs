//! ReadyBeam device controller
//!
//! Maps the module's operations onto MeCom transactions:
//!
//! | Operation            | Transactions                                        |
//! |----------------------|-----------------------------------------------------|
//! | open                 | status query (104), digital control on (7000)       |
//! | close                | digital control off (7000)                          |
//! | set_brightness       | per channel: enable (7006), brightness (7013)       |
//! | get_device_status    | status query (104)                                  |
//! | is_channel_active    | channel active query (7010)                         |
//! | get_brightness       | brightness query (7013)                             |
//!
//! The controller never checks the device state itself. Brightness commands
//! sent while the module reports [`DeviceStatus::Error`] are rejected by the
//! module or silently ignored, so callers should check status first.

use super::error::{LaserError, Result};
use super::protocol::mecom::{Channel, ParameterId, ResponseFrame, Value};
use super::transaction::{ExecutorOptions, TransactionExecutor};
use super::transport::{SerialConfig, SerialTransport, TransportTrait};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum brightness accepted by the module, in percent
pub const MAX_BRIGHTNESS: f32 = 100.5;

/// Device state as reported by parameter 104
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    /// 0
    Init,
    /// 1
    Ready,
    /// 2
    Run,
    /// 3
    Error,
    /// 4
    Bootloader,
    /// 5
    PendingReset,
}

impl DeviceStatus {
    /// Map the status digit
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Self::Init),
            1 => Some(Self::Ready),
            2 => Some(Self::Run),
            3 => Some(Self::Error),
            4 => Some(Self::Bootloader),
            5 => Some(Self::PendingReset),
            _ => None,
        }
    }

    /// Get name of status
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "Init",
            Self::Ready => "Ready",
            Self::Run => "Run",
            Self::Error => "Error",
            Self::Bootloader => "Bootloader",
            Self::PendingReset => "Pending Reset",
        }
    }

    /// Is the module in its error state?
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Controller for one ReadyBeam module
///
/// Owns the transport for its whole lifetime. All operations block until the
/// module has answered every transaction they issue.
pub struct ReadyBeam<T: TransportTrait = SerialTransport> {
    executor: TransactionExecutor<T>,
}

impl ReadyBeam<SerialTransport> {
    /// Open the serial port and enable digital control
    pub fn open(config: SerialConfig, address: u8, options: ExecutorOptions) -> Result<Self> {
        let transport = SerialTransport::open(config)?;
        Self::with_transport(transport, address, options)
    }
}

impl<T: TransportTrait> ReadyBeam<T> {
    /// Run the opening handshake over an already acquired transport
    ///
    /// The transport is closed again if the handshake fails.
    pub fn with_transport(mut transport: T, address: u8, options: ExecutorOptions) -> Result<Self> {
        if let Err(e) = transport.flush_input().and_then(|()| transport.flush_output()) {
            let _ = transport.close();
            return Err(e.into());
        }

        let mut device = Self {
            executor: TransactionExecutor::with_options(transport, address, options),
        };

        match device.handshake() {
            Ok(()) => {
                tracing::info!(
                    "ReadyBeam at address {address} ready on {}",
                    device.executor.transport().connection_info()
                );
                Ok(device)
            }
            Err(e) => {
                tracing::warn!("Opening handshake failed: {e}");
                let _ = device.executor.transport_mut().close();
                Err(e)
            }
        }
    }

    fn handshake(&mut self) -> Result<()> {
        let response = self
            .executor
            .execute(ParameterId::DEVICE_STATUS, Value::None, Channel::Red)?;
        tracing::debug!("Status payload on open: {}", response.payload());
        self.executor
            .execute(ParameterId::DIGITAL_CONTROL, Value::Int(1), Channel::Red)?;
        Ok(())
    }

    /// Disable digital control and release the transport
    ///
    /// The transport is released even when the disable command fails; the
    /// first error encountered is returned.
    pub fn close(self) -> Result<()> {
        let mut executor = self.executor;
        let disabled = executor
            .execute(ParameterId::DIGITAL_CONTROL, Value::Int(0), Channel::Red)
            .map(|_| ());
        if let Err(ref e) = disabled {
            tracing::warn!("Disabling digital control failed: {e}");
        }

        let mut transport = executor.into_transport();
        let flushed = transport
            .flush_input()
            .and_then(|()| transport.flush_output())
            .map_err(LaserError::from);
        let closed = transport.close().map_err(LaserError::from);
        tracing::info!("ReadyBeam connection closed");

        disabled.and(flushed).and(closed)
    }

    /// Set the brightness of all three channels, in percent
    ///
    /// Channels are written in order red, green, blue; a channel is enabled
    /// when its power is above zero. Values are not clamped. A failure part
    /// way through leaves earlier channels applied.
    pub fn set_brightness(&mut self, powers: &[f32]) -> Result<()> {
        if powers.len() != Channel::ALL.len() {
            return Err(LaserError::InvalidArgument(format!(
                "expected {} channel powers, got {}",
                Channel::ALL.len(),
                powers.len()
            )));
        }

        for (&channel, &power) in Channel::ALL.iter().zip(powers) {
            self.set_channel(channel, power)?;
        }
        Ok(())
    }

    /// Enable or disable one channel and set its brightness
    pub fn set_channel(&mut self, channel: Channel, power: f32) -> Result<()> {
        let enable = Value::Int(i64::from(power > 0.0));
        self.executor
            .execute(ParameterId::CHANNEL_ENABLE, enable, channel)?;
        self.executor
            .execute(ParameterId::CHANNEL_BRIGHTNESS, Value::Float(power), channel)?;
        tracing::debug!("Channel {channel} set to {power}%");
        Ok(())
    }

    /// Query the device state
    pub fn get_device_status(&mut self) -> Result<DeviceStatus> {
        let response = self
            .executor
            .execute(ParameterId::DEVICE_STATUS, Value::None, Channel::Red)?;
        let digit = response.status_digit()?;
        DeviceStatus::from_digit(digit)
            .ok_or_else(|| LaserError::ProtocolFormat(format!("unknown device status {digit}")))
    }

    /// Is the channel currently emitting?
    pub fn is_channel_active(&mut self, channel: Channel) -> Result<bool> {
        let response = self
            .executor
            .execute(ParameterId::CHANNEL_ACTIVE, Value::None, channel)?;
        Ok(response.value_u32()? != 0)
    }

    /// Read back the brightness setting of a channel
    pub fn get_brightness(&mut self, channel: Channel) -> Result<f32> {
        let response = self
            .executor
            .execute(ParameterId::CHANNEL_BRIGHTNESS, Value::None, channel)?;
        response.value_f32()
    }

    /// Read any register
    pub fn query(&mut self, parameter: ParameterId, instance: u8) -> Result<ResponseFrame> {
        let channel = Channel::try_from(instance)?;
        self.executor.execute(parameter, Value::None, channel)
    }

    /// Write any register
    pub fn set(&mut self, parameter: ParameterId, value: Value, instance: u8) -> Result<ResponseFrame> {
        let channel = Channel::try_from(instance)?;
        if value.is_none() {
            return Err(LaserError::InvalidArgument(format!(
                "no value given for parameter {parameter}"
            )));
        }
        self.executor.execute(parameter, value, channel)
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.executor.address()
    }

    /// Sequence number of the most recent transaction
    pub fn sequence(&self) -> u16 {
        self.executor.sequence()
    }

    /// Get connection info string
    pub fn connection_info(&self) -> String {
        self.executor.transport().connection_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::{MockTransportTrait, TransportError};

    fn lenient_mock() -> MockTransportTrait {
        let mut mock = MockTransportTrait::new();
        mock.expect_flush_input().returning(|| Ok(()));
        mock.expect_flush_output().returning(|| Ok(()));
        mock.expect_write().returning(|_| Ok(()));
        mock.expect_flush().returning(|| Ok(()));
        mock.expect_connection_info().returning(|| "mock".to_string());
        mock
    }

    #[test]
    fn test_status_digits() {
        assert_eq!(DeviceStatus::from_digit(0), Some(DeviceStatus::Init));
        assert_eq!(DeviceStatus::from_digit(2), Some(DeviceStatus::Run));
        assert_eq!(DeviceStatus::from_digit(5), Some(DeviceStatus::PendingReset));
        assert_eq!(DeviceStatus::from_digit(6), None);
        assert_eq!(DeviceStatus::PendingReset.to_string(), "Pending Reset");
        assert!(DeviceStatus::Error.is_error());
    }

    #[test]
    fn test_close_releases_transport_after_failed_disable() {
        let mut mock = lenient_mock();
        mock.expect_read_exact().returning(|_| Err(TransportError::Timeout));
        mock.expect_close().times(1).returning(|| Ok(()));

        let device = ReadyBeam {
            executor: TransactionExecutor::new(mock, 0),
        };

        let err = device.close().unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_failed_handshake_releases_transport() {
        let mut mock = lenient_mock();
        mock.expect_read_exact().returning(|_| Err(TransportError::Timeout));
        mock.expect_close().times(1).returning(|| Ok(()));

        let result = ReadyBeam::with_transport(mock, 0, ExecutorOptions::default());
        assert!(matches!(result, Err(LaserError::CommunicationTimeout)));
    }

    #[test]
    fn test_invalid_arguments_send_nothing() {
        let mut mock = MockTransportTrait::new();
        mock.expect_write().never();
        mock.expect_read_exact().never();

        let mut device = ReadyBeam {
            executor: TransactionExecutor::new(mock, 0),
        };

        assert!(matches!(
            device.set_brightness(&[1.0, 2.0]),
            Err(LaserError::InvalidArgument(_))
        ));
        assert!(matches!(
            device.set_brightness(&[1.0, 2.0, 3.0, 4.0]),
            Err(LaserError::InvalidArgument(_))
        ));
        assert!(matches!(
            device.query(ParameterId::CHANNEL_ACTIVE, 4),
            Err(LaserError::InvalidArgument(_))
        ));
        assert!(matches!(
            device.set(ParameterId::CHANNEL_ENABLE, Value::None, 1),
            Err(LaserError::InvalidArgument(_))
        ));
        assert_eq!(device.sequence(), 0);
    }
}
