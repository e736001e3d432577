//! Frame checksum calculation
//!
//! MeCom frames are protected by a CRC-16/CCITT in its XMODEM flavour:
//! polynomial 0x1021, init 0x0000, no reflection, no final XOR.

/// CRC-16/CCITT generator polynomial
pub const POLYNOMIAL: u16 = 0x1021;

/// Number of hex digits used for the checksum field of a frame
pub const HEX_WIDTH: usize = 4;

const TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the frame checksum over `data`
///
/// `data` is the exact frame text up to, but not including, the checksum
/// field. The terminating CR is never part of it.
pub fn compute(data: &[u8]) -> u16 {
    data.iter().fold(0u16, |crc, &byte| {
        let index = ((crc >> 8) ^ u16::from(byte)) & 0xFF;
        (crc << 8) ^ TABLE[index as usize]
    })
}

/// Render a checksum as the 4 uppercase hex digits used on the wire
pub fn to_hex(crc: u16) -> String {
    format!("{crc:04X}")
}

/// Check `data` against a checksum field given as hex text
pub fn verify(data: &[u8], checksum_hex: &[u8]) -> bool {
    if checksum_hex.len() != HEX_WIDTH {
        return false;
    }
    std::str::from_utf8(checksum_hex)
        .ok()
        .and_then(|s| u16::from_str_radix(s, 16).ok())
        .is_some_and(|expected| expected == compute(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straight bit-by-bit CRC, used to cross-check the table
    fn crc16_bitwise(data: &[u8]) -> u16 {
        let mut crc: u16 = 0x0000;
        for &byte in data {
            crc ^= u16::from(byte) << 8;
            for _ in 0..8 {
                if crc & 0x8000 != 0 {
                    crc = (crc << 1) ^ POLYNOMIAL;
                } else {
                    crc <<= 1;
                }
            }
        }
        crc
    }

    #[test]
    fn test_check_value() {
        // Standard check string for CRC-16/XMODEM
        assert_eq!(compute(b"123456789"), 0x31C3);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compute(b""), 0x0000);
    }

    #[test]
    fn test_known_frames() {
        assert_eq!(compute(b"#000001?VR006801"), 0xB336);
        assert_eq!(compute(b"#000002VS1B580100000001"), 0x2453);
        assert_eq!(compute(b"#000001VS1B650141200000"), 0x1707);
        assert_eq!(compute(b"!00000100000002"), 0x81FA);
    }

    #[test]
    fn test_table_matches_bitwise() {
        let samples: [&[u8]; 4] = [b"#", b"#00", b"#1F1234VS1B5E0300000001", b"\x00\xFF\x80\x7F"];
        for sample in samples {
            assert_eq!(compute(sample), crc16_bitwise(sample));
        }
    }

    #[test]
    fn test_to_hex_is_padded_uppercase() {
        assert_eq!(to_hex(0x00AB), "00AB");
        assert_eq!(to_hex(0xB336), "B336");
    }

    #[test]
    fn test_verify() {
        assert!(verify(b"#000001?VR006801", b"B336"));
        assert!(verify(b"#000001?VR006801", b"b336"));
        assert!(!verify(b"#000001?VR006801", b"B337"));
        assert!(!verify(b"#000001?VR006801", b"B33"));
        assert!(!verify(b"#000001?VR006801", b"ZZZZ"));
    }
}
