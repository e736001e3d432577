//! Protocol implementations
//!
//! - MeCom ASCII frames (command construction, response parsing)
//! - CRC-16/CCITT frame checksum

pub mod checksum;
pub mod mecom;

pub use mecom::{
    construct, parse, Channel, CommandFrame, DeviceErrorCode, Direction, ParameterId,
    ResponseFrame, Value,
};
