//! Protocol-level error taxonomy

use super::transport::TransportError;
use thiserror::Error;

/// Errors surfaced by the protocol layer and the device controller
///
/// Nothing in this layer retries: every variant reaches the direct caller
/// as soon as it happens.
#[derive(Error, Debug)]
pub enum LaserError {
    /// A read or write did not complete within the configured timeout
    #[error("Communication timed out")]
    CommunicationTimeout,

    /// The device answered with its error flag set
    #[error("Device error {code}: {message}")]
    Device {
        /// Error code reported by the device
        code: u8,
        /// Fixed message for the code
        message: &'static str,
    },

    /// Response frame is too short or malformed at a fixed offset
    #[error("Protocol format error: {0}")]
    ProtocolFormat(String),

    /// Caller supplied an argument that cannot be sent to the device
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport failure other than a timeout
    #[error(transparent)]
    Transport(TransportError),
}

impl LaserError {
    /// Device error code, if this is a device error
    pub fn device_code(&self) -> Option<u8> {
        match self {
            Self::Device { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Is this a timeout?
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::CommunicationTimeout)
    }
}

impl From<TransportError> for LaserError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => Self::CommunicationTimeout,
            TransportError::Io(ref io) if io.kind() == std::io::ErrorKind::TimedOut => {
                Self::CommunicationTimeout
            }
            other => Self::Transport(other),
        }
    }
}

/// Result alias for protocol operations
pub type Result<T, E = LaserError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeouts_collapse_into_communication_timeout() {
        assert!(LaserError::from(TransportError::Timeout).is_timeout());

        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        assert!(LaserError::from(TransportError::Io(io)).is_timeout());
    }

    #[test]
    fn test_other_transport_errors_are_wrapped() {
        let err = LaserError::from(TransportError::PortNotFound("/dev/ttyUSB9".into()));
        assert!(matches!(err, LaserError::Transport(TransportError::PortNotFound(_))));
        assert_eq!(err.to_string(), "Port not found: /dev/ttyUSB9");
    }

    #[test]
    fn test_device_error_display() {
        let err = LaserError::Device { code: 7, message: "Value is out of range" };
        assert_eq!(err.device_code(), Some(7));
        assert_eq!(err.to_string(), "Device error 7: Value is out of range");
    }
}
