//! CRC-16 checksum used for GDP headers and payloads.
//!
//! CCITT polynomial `0x1021`, initial value `0xFFFF`, MSB first, with the
//! final register inverted.

const CRC16_POLY: u16 = 0x1021;

const CRC16_TABLE: [u16; 256] = {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut j = 0;
        while j < 8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ CRC16_POLY;
            } else {
                crc <<= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

/// Computes the GDP CRC-16 of `data`.
pub fn compute_crc16(data: &[u8]) -> u16 {
    let mut crc = 0xFFFF_u16;
    for &byte in data {
        let index = (((crc >> 8) as u8) ^ byte) as usize;
        crc = (crc << 8) ^ CRC16_TABLE[index];
    }
    !crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc16_known_value() {
        // Check value for this parameter set over "123456789"
        assert_eq!(compute_crc16(b"123456789"), 0xD64E);
    }

    #[test]
    fn crc16_empty() {
        assert_eq!(compute_crc16(b""), 0x0000);
    }

    #[test]
    fn crc16_detects_single_bit_flip() {
        let data = b"video/x-raw, format=(string)I420".to_vec();
        let mut flipped = data.clone();
        flipped[7] ^= 0x01;
        assert_ne!(compute_crc16(&data), compute_crc16(&flipped));
    }
}
