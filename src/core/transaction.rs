//! Request/reply transactions
//!
//! One transaction is one command frame written and one response frame read
//! back up to its CR. Only one transaction is ever in flight on a transport.

use super::error::{LaserError, Result};
use super::protocol::mecom::{self, Channel, CommandFrame, ParameterId, ResponseFrame, Value};
use super::transport::TransportTrait;
use serde::{Deserialize, Serialize};

/// Longest response accepted before giving up on finding a terminator
pub const MAX_RESPONSE_LEN: usize = 256;

/// Optional response checks
///
/// Both are off by default. Error replies without a CRC pass the checksum check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorOptions {
    /// Reject responses that do not echo the request's address and sequence
    pub verify_sequence: bool,
    /// Reject responses whose trailing CRC is missing or does not match
    pub verify_checksum: bool,
}

/// Runs transactions over an owned transport
pub struct TransactionExecutor<T: TransportTrait> {
    transport: T,
    address: u8,
    sequence: u16,
    options: ExecutorOptions,
}

impl<T: TransportTrait> TransactionExecutor<T> {
    /// Create an executor; the first transaction uses sequence 1
    pub fn new(transport: T, address: u8) -> Self {
        Self::with_options(transport, address, ExecutorOptions::default())
    }

    /// Create an executor with response checks
    pub fn with_options(transport: T, address: u8, options: ExecutorOptions) -> Self {
        Self {
            transport,
            address,
            sequence: 0,
            options,
        }
    }

    /// Start counting from `sequence`; the next transaction uses `sequence + 1`
    #[must_use]
    pub fn starting_at(mut self, sequence: u16) -> Self {
        self.sequence = sequence;
        self
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Sequence number of the most recent transaction
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Active response checks
    pub fn options(&self) -> ExecutorOptions {
        self.options
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrow the transport mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give up the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run one transaction
    pub fn execute(&mut self, parameter: ParameterId, value: Value, channel: Channel) -> Result<ResponseFrame> {
        self.sequence = self.sequence.wrapping_add(1);
        let command = CommandFrame::new(self.address, self.sequence, parameter, value, channel.instance());
        tracing::debug!("-> {command}");

        self.transport.flush_input()?;
        self.transport.flush_output()?;
        self.transport.write(&command.to_bytes())?;
        self.transport.flush()?;

        let buffer = self.read_frame()?;
        let response = mecom::parse(&buffer)?;
        tracing::debug!("<- {}", response.raw());

        if self.options.verify_sequence {
            check_echo(&command, &response)?;
        }

        if self.options.verify_checksum {
            check_checksum(&response)?;
        }

        if let Some(code) = response.error_code() {
            let message = mecom::error_message(code);
            tracing::warn!(
                "Device rejected parameter {} (instance {}): {code} {message}",
                parameter,
                channel.instance()
            );
            return Err(LaserError::Device { code, message });
        }

        Ok(response)
    }

    /// Accumulate bytes up to, not including, the CR
    fn read_frame(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(32);
        loop {
            let byte = self.transport.read_exact(1)?;
            let Some(&b) = byte.first() else {
                return Err(LaserError::CommunicationTimeout);
            };
            if b == mecom::TERMINATOR {
                return Ok(buffer);
            }
            if buffer.len() >= MAX_RESPONSE_LEN {
                return Err(LaserError::ProtocolFormat(format!(
                    "no terminator within {MAX_RESPONSE_LEN} bytes"
                )));
            }
            buffer.push(b);
        }
    }
}

fn check_echo(command: &CommandFrame, response: &ResponseFrame) -> Result<()> {
    if response.address() != command.address() || response.sequence() != command.sequence() {
        return Err(LaserError::ProtocolFormat(format!(
            "response {:02X}/{:04X} does not echo request {:02X}/{:04X}",
            response.address(),
            response.sequence(),
            command.address(),
            command.sequence()
        )));
    }
    Ok(())
}

/// Value replies must carry a valid CRC; error replies only when they have one
fn check_checksum(response: &ResponseFrame) -> Result<()> {
    match response.checksum_ok() {
        Some(true) => Ok(()),
        None if response.is_error() => Ok(()),
        Some(false) => Err(LaserError::ProtocolFormat(format!(
            "response checksum mismatch: {:?}",
            response.raw()
        ))),
        None => Err(LaserError::ProtocolFormat(format!(
            "response carries no checksum: {:?}",
            response.raw()
        ))),
    }
}
