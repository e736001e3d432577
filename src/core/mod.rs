//! Core module containing the protocol client
//!
//! This module provides:
//! - Transport layer for the serial link to the module
//! - MeCom frame codec and CRC-16/CCITT checksum
//! - Transaction executor (sequence numbers, request/reply exchange)
//! - ReadyBeam device controller

pub mod device;
pub mod error;
pub mod protocol;
pub mod transaction;
pub mod transport;
