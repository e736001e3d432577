//! MeCom ASCII frame codec
//!
//! Outbound command frame:
//!
//! ```text
//! '#' ADDR(2) SEQ(4) OP PARAM(4) INSTANCE(2) [VALUE(8)] CRC(4) CR
//! ```
//!
//! `OP` is `?VR` for a query and `VS` for a set. All numeric fields are
//! uppercase hex. Responses echo address and sequence and then carry either
//! `+` and a two digit error code, or an opaque payload:
//!
//! ```text
//! '!' ADDR(2) SEQ(4) PAYLOAD... CR
//! '!' ADDR(2) SEQ(4) '+' CODE(2) CR
//! ```

use super::checksum;
use crate::core::error::{LaserError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Start delimiter of command frames
pub const COMMAND_START: u8 = b'#';

/// Start delimiter used by MeCom devices on responses
pub const RESPONSE_START: u8 = b'!';

/// Frame terminator
pub const TERMINATOR: u8 = b'\r';

/// Error flag character in a response
pub const ERROR_FLAG: u8 = b'+';

/// Minimum response length after the start delimiter: ADDR + SEQ + FLAG
pub const MIN_RESPONSE_LEN: usize = 7;

const FLAG_OFFSET: usize = 6;
const VALUE_HEX_WIDTH: usize = 8;
const ERROR_CODE_WIDTH: usize = 2;

/// Payload sent for every integer-valued set command
const INT_PAYLOAD: u32 = 0x0000_0001;

/// A device register number
///
/// The parameter space is open: the constants cover the registers this crate
/// drives, anything else can be addressed through the raw accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterId(pub u16);

impl ParameterId {
    /// Device status (read)
    pub const DEVICE_STATUS: Self = Self(104);
    /// Digital control enable
    pub const DIGITAL_CONTROL: Self = Self(7000);
    /// Channel enable
    pub const CHANNEL_ENABLE: Self = Self(7006);
    /// Channel active (read)
    pub const CHANNEL_ACTIVE: Self = Self(7010);
    /// Channel brightness in percent
    pub const CHANNEL_BRIGHTNESS: Self = Self(7013);

    /// Raw register number
    pub fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for ParameterId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Laser channel, the protocol's "instance"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Channel {
    /// Instance 1
    Red = 1,
    /// Instance 2
    Green = 2,
    /// Instance 3
    Blue = 3,
}

impl Channel {
    /// All channels in instance order
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Instance number on the wire
    pub fn instance(self) -> u8 {
        self as u8
    }

    /// Get name of channel
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = LaserError;

    fn try_from(instance: u8) -> Result<Self> {
        match instance {
            1 => Ok(Self::Red),
            2 => Ok(Self::Green),
            3 => Ok(Self::Blue),
            other => Err(LaserError::InvalidArgument(format!(
                "instance {other} is outside 1..=3"
            ))),
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = LaserError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Ok(Self::Red),
            "green" | "g" => Ok(Self::Green),
            "blue" | "b" => Ok(Self::Blue),
            other => other
                .parse::<u8>()
                .map_err(|_| LaserError::InvalidArgument(format!("unknown channel {s:?}")))
                .and_then(Self::try_from),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.instance())
    }
}

/// Value carried by a command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Query, no payload
    None,
    /// Integer set. Always sent as `00000001`, whatever the number
    Int(i64),
    /// IEEE-754 single precision, sent as its big-endian bit pattern
    Float(f32),
}

impl Value {
    /// Is this a query?
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Direction implied by the value
    pub fn direction(&self) -> Direction {
        match self {
            Self::None => Direction::Query,
            Self::Int(_) | Self::Float(_) => Direction::Set,
        }
    }

    /// 8 hex digit payload, or `None` for a query
    pub fn encode(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Int(_) => Some(format!("{INT_PAYLOAD:08X}")),
            Self::Float(v) => Some(format!("{:08X}", v.to_bits())),
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

/// Command direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `?VR`
    Query,
    /// `VS`
    Set,
}

impl Direction {
    /// Wire token
    pub fn token(&self) -> &'static str {
        match self {
            Self::Query => "?VR",
            Self::Set => "VS",
        }
    }
}

/// Device error codes reported after the `+` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DeviceErrorCode {
    /// 1
    CommandNotAvailable = 1,
    /// 2
    DeviceBusy = 2,
    /// 3
    GeneralCommunicationError = 3,
    /// 4
    FormatError = 4,
    /// 5
    ParameterNotAvailable = 5,
    /// 6
    ParameterReadOnly = 6,
    /// 7
    ValueOutOfRange = 7,
    /// 8
    InstanceNotAvailable = 8,
    /// 9
    ParameterGeneralError = 9,
}

impl DeviceErrorCode {
    /// Get error code from u8
    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::CommandNotAvailable),
            2 => Some(Self::DeviceBusy),
            3 => Some(Self::GeneralCommunicationError),
            4 => Some(Self::FormatError),
            5 => Some(Self::ParameterNotAvailable),
            6 => Some(Self::ParameterReadOnly),
            7 => Some(Self::ValueOutOfRange),
            8 => Some(Self::InstanceNotAvailable),
            9 => Some(Self::ParameterGeneralError),
            _ => None,
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Self::CommandNotAvailable => "Command not available",
            Self::DeviceBusy => "Device is busy",
            Self::GeneralCommunicationError => "General communication error",
            Self::FormatError => "Format error",
            Self::ParameterNotAvailable => "Parameter not available",
            Self::ParameterReadOnly => "Parameter is read-only",
            Self::ValueOutOfRange => "Value is out of range",
            Self::InstanceNotAvailable => "Instance is not available",
            Self::ParameterGeneralError => "Parameter general error",
        }
    }
}

/// Message for any code, including ones outside the table
pub fn error_message(code: u8) -> &'static str {
    DeviceErrorCode::from_u8(code).map_or("Unknown error", |c| c.message())
}

/// An outbound command, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct CommandFrame {
    address: u8,
    sequence: u16,
    parameter: ParameterId,
    instance: u8,
    value: Value,
    checksum: u16,
}

impl CommandFrame {
    /// Build a frame and compute its checksum
    pub fn new(address: u8, sequence: u16, parameter: ParameterId, value: Value, instance: u8) -> Self {
        let body = body_text(address, sequence, parameter, value, instance);
        Self {
            address,
            sequence,
            parameter,
            instance,
            value,
            checksum: checksum::compute(body.as_bytes()),
        }
    }

    /// Parse an outbound frame, verifying its checksum
    ///
    /// An integer payload comes back as `Int(1)`: the wire form does not
    /// keep the original number. The float whose bit pattern is `00000001`
    /// (the smallest subnormal) shares that payload and also decodes as
    /// `Int(1)`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_suffix(&[TERMINATOR]).unwrap_or(bytes);
        let text = ascii_text(bytes)?;
        let rest = text
            .strip_prefix(char::from(COMMAND_START))
            .ok_or_else(|| format_error(format!("command frame must start with '#': {text:?}")))?;

        if rest.len() < 6 + 2 + 6 + checksum::HEX_WIDTH {
            return Err(format_error(format!("command frame too short: {text:?}")));
        }

        let address = hex_field::<u8>(rest, 0, 2)?;
        let sequence = hex_field::<u16>(rest, 2, 4)?;
        let (direction, fields) = if let Some(fields) = rest[6..].strip_prefix("?VR") {
            (Direction::Query, fields)
        } else if let Some(fields) = rest[6..].strip_prefix("VS") {
            (Direction::Set, fields)
        } else {
            return Err(format_error(format!("unknown command token in {text:?}")));
        };

        let expected_len = match direction {
            Direction::Query => 6 + checksum::HEX_WIDTH,
            Direction::Set => 6 + VALUE_HEX_WIDTH + checksum::HEX_WIDTH,
        };
        if fields.len() != expected_len {
            return Err(format_error(format!("bad command frame length: {text:?}")));
        }

        let parameter = ParameterId(hex_field::<u16>(fields, 0, 4)?);
        let instance = hex_field::<u8>(fields, 4, 2)?;
        let value = match direction {
            Direction::Query => Value::None,
            Direction::Set => match hex_field::<u32>(fields, 6, VALUE_HEX_WIDTH)? {
                INT_PAYLOAD => Value::Int(1),
                bits => Value::Float(f32::from_bits(bits)),
            },
        };

        let split = text.len() - checksum::HEX_WIDTH;
        let (body, crc) = text.split_at(split);
        if !checksum::verify(body.as_bytes(), crc.as_bytes()) {
            return Err(format_error(format!("command checksum mismatch: {text:?}")));
        }

        Ok(Self::new(address, sequence, parameter, value, instance))
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Sequence number
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Query or set
    pub fn direction(&self) -> Direction {
        self.value.direction()
    }

    /// Register number
    pub fn parameter(&self) -> ParameterId {
        self.parameter
    }

    /// Channel instance
    pub fn instance(&self) -> u8 {
        self.instance
    }

    /// Carried value
    pub fn value(&self) -> Value {
        self.value
    }

    /// Frame checksum
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    /// Complete wire bytes, CR included
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.to_string().into_bytes();
        bytes.push(TERMINATOR);
        bytes
    }
}

impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            body_text(self.address, self.sequence, self.parameter, self.value, self.instance),
            checksum::to_hex(self.checksum)
        )
    }
}

fn body_text(address: u8, sequence: u16, parameter: ParameterId, value: Value, instance: u8) -> String {
    let mut text = format!(
        "{}{:02X}{:04X}{}{:04X}{:02X}",
        char::from(COMMAND_START),
        address,
        sequence,
        value.direction().token(),
        parameter.0,
        instance
    );
    if let Some(payload) = value.encode() {
        text.push_str(&payload);
    }
    text
}

/// Build the wire bytes of a command
pub fn construct(address: u8, sequence: u16, parameter: ParameterId, value: Value, instance: u8) -> Vec<u8> {
    CommandFrame::new(address, sequence, parameter, value, instance).to_bytes()
}

/// A parsed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    address: u8,
    sequence: u16,
    error_code: Option<u8>,
    payload: String,
    raw: String,
}

impl ResponseFrame {
    /// Echoed device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Echoed sequence number
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Did the device flag an error?
    pub fn is_error(&self) -> bool {
        self.error_code.is_some()
    }

    /// Reported error code
    pub fn error_code(&self) -> Option<u8> {
        self.error_code
    }

    /// Error message for the reported code
    pub fn error_message(&self) -> Option<&'static str> {
        self.error_code.map(error_message)
    }

    /// Everything after address and sequence
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Frame text as received, without the terminator
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The 8 hex digit value at the start of the payload
    pub fn value_hex(&self) -> Result<&str> {
        self.payload
            .get(..VALUE_HEX_WIDTH)
            .ok_or_else(|| format_error(format!("payload too short for a value: {:?}", self.payload)))
    }

    /// Payload value as an unsigned integer
    pub fn value_u32(&self) -> Result<u32> {
        let hex = self.value_hex()?;
        u32::from_hex(hex).ok_or_else(|| format_error(format!("payload value is not hex: {hex:?}")))
    }

    /// Payload value as a float bit pattern
    pub fn value_f32(&self) -> Result<f32> {
        self.value_u32().map(f32::from_bits)
    }

    /// Status digit, the last digit of the value
    pub fn status_digit(&self) -> Result<u8> {
        self.payload
            .as_bytes()
            .get(VALUE_HEX_WIDTH - 1)
            .and_then(|&b| char::from(b).to_digit(10))
            .and_then(|d| u8::try_from(d).ok())
            .ok_or_else(|| format_error(format!("no status digit in payload {:?}", self.payload)))
    }

    /// Check the trailing CRC, if the payload carries one
    ///
    /// Returns `None` when the payload is too short to hold a checksum. Error
    /// replies only carry one after their two code digits.
    pub fn checksum_ok(&self) -> Option<bool> {
        let min_len = if self.is_error() {
            ERROR_CODE_WIDTH + checksum::HEX_WIDTH
        } else {
            checksum::HEX_WIDTH
        };
        if self.payload.len() < min_len {
            return None;
        }
        let split = self.raw.len() - checksum::HEX_WIDTH;
        let (body, crc) = self.raw.split_at(split);
        Some(checksum::verify(body.as_bytes(), crc.as_bytes()))
    }
}

/// Parse a response frame
///
/// A trailing CR is tolerated. The payload is returned as-is for the caller
/// to interpret.
pub fn parse(bytes: &[u8]) -> Result<ResponseFrame> {
    let bytes = bytes.strip_suffix(&[TERMINATOR]).unwrap_or(bytes);
    let raw = ascii_text(bytes)?;

    let rest = match raw.as_bytes().first() {
        Some(&COMMAND_START) | Some(&RESPONSE_START) => &raw[1..],
        Some(_) => return Err(format_error(format!("unexpected start of response: {raw:?}"))),
        None => return Err(format_error("empty response".to_string())),
    };

    if rest.len() < MIN_RESPONSE_LEN {
        return Err(format_error(format!("response too short: {raw:?}")));
    }

    let address = hex_field::<u8>(rest, 0, 2)?;
    let sequence = hex_field::<u16>(rest, 2, 4)?;

    let (error_code, payload) = if rest.as_bytes()[FLAG_OFFSET] == ERROR_FLAG {
        let code = rest
            .get(FLAG_OFFSET + 1..FLAG_OFFSET + 1 + ERROR_CODE_WIDTH)
            .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<u8>().ok())
            .ok_or_else(|| format_error(format!("unreadable error code in {raw:?}")))?;
        (Some(code), rest[FLAG_OFFSET + 1..].to_string())
    } else {
        (None, rest[FLAG_OFFSET..].to_string())
    };

    Ok(ResponseFrame {
        address,
        sequence,
        error_code,
        payload,
        raw: raw.to_string(),
    })
}

fn ascii_text(bytes: &[u8]) -> Result<&str> {
    if !bytes.is_ascii() {
        return Err(format_error(format!("non-ASCII frame {}", hex::encode(bytes))));
    }
    std::str::from_utf8(bytes).map_err(|_| format_error(format!("non-ASCII frame {}", hex::encode(bytes))))
}

fn format_error(message: String) -> LaserError {
    LaserError::ProtocolFormat(message)
}

trait FromHex: Sized {
    fn from_hex(s: &str) -> Option<Self>;
}

macro_rules! impl_from_hex {
    ($($t:ty),*) => {
        $(impl FromHex for $t {
            fn from_hex(s: &str) -> Option<Self> {
                if s.bytes().all(|b| b.is_ascii_hexdigit()) {
                    <$t>::from_str_radix(s, 16).ok()
                } else {
                    None
                }
            }
        })*
    };
}

impl_from_hex!(u8, u16, u32);

fn hex_field<T: FromHex>(text: &str, offset: usize, width: usize) -> Result<T> {
    text.get(offset..offset + width)
        .and_then(T::from_hex)
        .ok_or_else(|| format_error(format!("bad hex field at offset {offset} in {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_query() {
        let frame = construct(0, 1, ParameterId::DEVICE_STATUS, Value::None, 1);
        assert_eq!(frame, b"#000001?VR006801B336\r".to_vec());
    }

    #[test]
    fn test_construct_int_set() {
        let frame = construct(0, 2, ParameterId::DIGITAL_CONTROL, Value::Int(1), 1);
        assert_eq!(frame, b"#000002VS1B5801000000012453\r".to_vec());
    }

    #[test]
    fn test_int_payload_is_fixed() {
        for v in [0, 1, 42, -7] {
            let frame = CommandFrame::new(0x1F, 0x1234, ParameterId::CHANNEL_ENABLE, Value::Int(v), 3);
            assert_eq!(frame.to_string(), "#1F1234VS1B5E0300000001A01A");
        }
    }

    #[test]
    fn test_float_encoding() {
        assert_eq!(Value::Float(10.0).encode().as_deref(), Some("41200000"));
        assert_eq!(Value::Float(0.0).encode().as_deref(), Some("00000000"));
        assert_eq!(Value::Float(100.5).encode().as_deref(), Some("42C90000"));
        assert_eq!(Value::None.encode(), None);

        let frame = construct(0, 1, ParameterId::CHANNEL_BRIGHTNESS, Value::Float(10.0), 1);
        assert_eq!(frame, b"#000001VS1B6501412000001707\r".to_vec());
    }

    #[test]
    fn test_command_round_trip() {
        let cases = [
            (0u8, 1u16, ParameterId::DEVICE_STATUS, Value::None, 1u8),
            (255, 0xFFFF, ParameterId::CHANNEL_BRIGHTNESS, Value::Float(33.3), 2),
            (7, 0, ParameterId(0xBEEF), Value::Float(-1.25e-3), 3),
            (0x1F, 0x1234, ParameterId::CHANNEL_ENABLE, Value::Int(1), 3),
        ];
        for (address, sequence, parameter, value, instance) in cases {
            let bytes = construct(address, sequence, parameter, value, instance);
            let frame = CommandFrame::decode(&bytes).unwrap();
            assert_eq!(frame.address(), address);
            assert_eq!(frame.sequence(), sequence);
            assert_eq!(frame.parameter(), parameter);
            assert_eq!(frame.instance(), instance);
            assert_eq!(frame.value(), value);
        }
    }

    #[test]
    fn test_smallest_subnormal_decodes_as_int() {
        let bytes = construct(0, 1, ParameterId::CHANNEL_BRIGHTNESS, Value::Float(f32::from_bits(1)), 1);
        let frame = CommandFrame::decode(&bytes).unwrap();
        assert_eq!(frame.value(), Value::Int(1));
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let err = CommandFrame::decode(b"#000001?VR006801B337\r").unwrap_err();
        assert!(matches!(err, LaserError::ProtocolFormat(_)));
    }

    #[test]
    fn test_parse_device_error() {
        let frame = parse(b"#00000A+07").unwrap();
        assert_eq!(frame.address(), 0);
        assert_eq!(frame.sequence(), 10);
        assert!(frame.is_error());
        assert_eq!(frame.error_code(), Some(7));
        assert_eq!(frame.error_message(), Some("Value is out of range"));
    }

    #[test]
    fn test_parse_value_response() {
        let frame = parse(b"!0000014120000017AA\r").unwrap();
        assert!(!frame.is_error());
        assert_eq!(frame.sequence(), 1);
        assert_eq!(frame.payload(), "4120000017AA");
        assert_eq!(frame.value_hex().unwrap(), "41200000");
        assert_eq!(frame.value_f32().unwrap(), 10.0);
    }

    #[test]
    fn test_parse_status_digit() {
        let frame = parse(b"!0000010000000281FA").unwrap();
        assert_eq!(frame.status_digit().unwrap(), 2);
        assert_eq!(frame.checksum_ok(), Some(true));
    }

    #[test]
    fn test_checksum_mismatch_detected() {
        let frame = parse(b"!0000010000000281FB").unwrap();
        assert_eq!(frame.checksum_ok(), Some(false));
        assert_eq!(parse(b"#00000A+07").unwrap().checksum_ok(), None);
        assert_eq!(parse(b"!000001AB").unwrap().checksum_ok(), None);
    }

    #[test]
    fn test_error_reply_checksum() {
        let frame = parse(b"!000001+07F132").unwrap();
        assert_eq!(frame.error_code(), Some(7));
        assert_eq!(frame.checksum_ok(), Some(true));

        let corrupt = parse(b"!000001+08F132").unwrap();
        assert_eq!(corrupt.error_code(), Some(8));
        assert_eq!(corrupt.checksum_ok(), Some(false));
    }

    #[test]
    fn test_parse_short_frames() {
        for input in [&b""[..], b"#", b"#00000", b"!000001"] {
            assert!(matches!(parse(input), Err(LaserError::ProtocolFormat(_))), "{input:?}");
        }
    }

    #[test]
    fn test_parse_unreadable_error_code() {
        assert!(matches!(parse(b"#00000A+"), Err(LaserError::ProtocolFormat(_))));
        assert!(matches!(parse(b"#00000A+x9"), Err(LaserError::ProtocolFormat(_))));
    }

    #[test]
    fn test_parse_bad_header() {
        assert!(matches!(parse(b"?00000A+07"), Err(LaserError::ProtocolFormat(_))));
        assert!(matches!(parse(b"#0G000A+07"), Err(LaserError::ProtocolFormat(_))));
    }

    #[test]
    fn test_parse_rejects_binary_noise() {
        assert!(matches!(parse(b"!0000\xFF\xFE0000"), Err(LaserError::ProtocolFormat(_))));
    }

    #[test]
    fn test_channel_validation() {
        assert_eq!(Channel::try_from(1).unwrap(), Channel::Red);
        assert_eq!(Channel::try_from(3).unwrap(), Channel::Blue);
        assert!(matches!(Channel::try_from(0), Err(LaserError::InvalidArgument(_))));
        assert!(matches!(Channel::try_from(4), Err(LaserError::InvalidArgument(_))));

        assert_eq!("green".parse::<Channel>().unwrap(), Channel::Green);
        assert_eq!("B".parse::<Channel>().unwrap(), Channel::Blue);
        assert_eq!("2".parse::<Channel>().unwrap(), Channel::Green);
        assert!("7".parse::<Channel>().is_err());
        assert!("violet".parse::<Channel>().is_err());
    }

    #[test]
    fn test_unknown_error_code_message() {
        assert_eq!(error_message(42), "Unknown error");
        assert_eq!(error_message(1), "Command not available");
        assert_eq!(error_message(9), "Parameter general error");
    }
}
