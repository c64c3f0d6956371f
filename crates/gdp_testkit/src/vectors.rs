//! Known-answer test vectors for the GDP wire format.
//!
//! The hex strings were produced independently of this codebase and pin
//! the header layout, the CRC-16 variant and the payload checksum.

/// A packet with the header values it must decode to.
#[derive(Debug, Clone)]
pub struct PacketVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Header and payload, hex-encoded.
    pub packet_hex: String,
    /// Expected payload type code.
    pub payload_type: u16,
    /// Expected payload length.
    pub payload_length: u32,
    /// Expected timestamp.
    pub timestamp: u64,
    /// Expected failure, if the packet must be rejected.
    pub expected_error: Option<VectorError>,
}

/// Failure a vector must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorError {
    /// The header checksum does not match.
    HeaderChecksum,
    /// The major version is unsupported.
    UnsupportedVersion,
    /// The payload checksum does not match.
    PayloadChecksum,
}

impl PacketVector {
    /// Decoded packet bytes.
    pub fn packet(&self) -> Vec<u8> {
        hex_decode(&self.packet_hex)
    }
}

fn vector(
    id: &str,
    description: &str,
    packet_hex: &str,
    payload_type: u16,
    payload_length: u32,
    timestamp: u64,
    expected_error: Option<VectorError>,
) -> PacketVector {
    PacketVector {
        id: id.into(),
        description: description.into(),
        packet_hex: packet_hex.into(),
        payload_type,
        payload_length,
        timestamp,
        expected_error,
    }
}

/// Packet vectors covering each payload class and each checksum failure.
pub fn packet_vectors() -> Vec<PacketVector> {
    vec![
        vector(
            "buffer_crc",
            "4-byte buffer, both checksums, pts 1s, duration 40ms, discont flag",
            "01000300000100000004000000003b9aca000000000002625a00000000000000000000000000000000040040ffffffffffffffff0000000000005309bf68deadbeef",
            1,
            4,
            1_000_000_000,
            None,
        ),
        vector(
            "caps_no_crc",
            "caps packet without checksums",
            "0100000000020000001cffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff0000ffffffffffffffff00000000000000000000766964656f2f782d7261772c2077696474683d28696e742933323000",
            2,
            28,
            u64::MAX,
            None,
        ),
        vector(
            "eos_event",
            "EOS event at 5us with header checksum",
            "010001006e4e0000000d0000000000001388ffffffffffffffffffffffffffffffffffffffffffffffff0000ffffffffffffffff000000000000f00100004773744576656e74456f733b00",
            28_238,
            13,
            5_000,
            None,
        ),
        vector(
            "bad_header_crc",
            "empty buffer header with a flipped timestamp byte",
            "01000100000100000000ffff00ffffffffffffffffffffffffffffffffffffffffffffffffffffffffff0000ffffffffffffffff00000000000029ed0000",
            1,
            0,
            0,
            Some(VectorError::HeaderChecksum),
        ),
        vector(
            "version_2",
            "header with major version 2",
            "02000000000100000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff0000ffffffffffffffff00000000000000000000",
            1,
            0,
            0,
            Some(VectorError::UnsupportedVersion),
        ),
        vector(
            "bad_payload_crc",
            "4-byte buffer whose last payload byte was flipped",
            "01000300000100000004ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff0000ffffffffffffffff0000000000007fb1bf68deadbeee",
            1,
            4,
            u64::MAX,
            Some(VectorError::PayloadChecksum),
        ),
    ]
}

/// Decodes hexadecimal string to bytes.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex = hex.replace([' ', '\n', '\r'], "");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdp_codec::{check_payload, parse_header, CodecError, HeaderError, HEADER_LENGTH};

    #[test]
    fn vectors_decode_as_expected() {
        for v in packet_vectors() {
            let bytes = v.packet();
            let (header_bytes, payload) = bytes.split_at(HEADER_LENGTH);
            assert_eq!(payload.len() as u32, v.payload_length, "{}", v.id);

            let header = parse_header(header_bytes);
            match v.expected_error {
                Some(VectorError::HeaderChecksum) => {
                    assert!(matches!(header, Err(HeaderError::Invalid { .. })), "{}", v.id);
                }
                Some(VectorError::UnsupportedVersion) => {
                    assert!(
                        matches!(header, Err(HeaderError::UnsupportedVersion { major: 2, .. })),
                        "{}",
                        v.id
                    );
                }
                Some(VectorError::PayloadChecksum) => {
                    let header = header.unwrap();
                    assert!(matches!(
                        check_payload(&header, payload),
                        Err(CodecError::PayloadChecksum { .. })
                    ));
                }
                None => {
                    let header = header.unwrap();
                    assert_eq!(header.payload_type_code, v.payload_type, "{}", v.id);
                    assert_eq!(header.payload_length, v.payload_length, "{}", v.id);
                    assert_eq!(header.timestamp, v.timestamp, "{}", v.id);
                    assert!(check_payload(&header, payload).is_ok(), "{}", v.id);
                }
            }
        }
    }

    #[test]
    fn hex_decode_skips_whitespace() {
        assert_eq!(hex_decode("de ad\nbe"), vec![0xde, 0xad, 0xbe]);
    }
}
