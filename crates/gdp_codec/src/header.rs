//! Fixed-size GDP packet header.
//!
//! ```text
//! offset  size  field
//!      0     1  major version
//!      1     1  minor version
//!      2     1  header flags (CRC_HEADER, CRC_PAYLOAD)
//!      3     1  padding
//!      4     2  payload type
//!      6     4  payload length
//!     10     8  timestamp
//!     18     8  duration
//!     26     8  offset
//!     34     8  offset end
//!     42     2  buffer flags
//!     44     8  decoding timestamp
//!     52     6  reserved
//!     58     2  header CRC (over bytes 0..58)
//!     60     2  payload CRC
//! ```
//!
//! All integers are big-endian. `u64::MAX` in any timing field means
//! "not set".

use bitflags::bitflags;

use crate::crc::compute_crc16;
use crate::error::HeaderError;
use crate::event_kind::EventKind;

/// Length of a GDP header in bytes.
pub const HEADER_LENGTH: usize = 62;

/// Sentinel for unset timestamps, durations and offsets.
pub const CLOCK_TIME_NONE: u64 = u64::MAX;

/// Payload type code for media buffers.
pub const PAYLOAD_TYPE_BUFFER: u16 = 1;

/// Payload type code for caps.
pub const PAYLOAD_TYPE_CAPS: u16 = 2;

/// Payload type codes at or above this value carry events.
pub const EVENT_TYPE_BASE: u16 = 64;

/// Highest major version this decoder understands.
pub const MAX_MAJOR_VERSION: u8 = 1;

const HEADER_CRC_OFFSET: usize = 58;
const PAYLOAD_CRC_OFFSET: usize = 60;

bitflags! {
    /// Header flag byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u8 {
        /// The header CRC field is valid.
        const CRC_HEADER = 1 << 0;
        /// The payload CRC field is valid.
        const CRC_PAYLOAD = 1 << 1;
    }
}

/// Protocol version stored in the first two header bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Classified payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadType {
    /// Media buffer.
    Buffer,
    /// Caps description.
    Caps,
    /// Control event of the given kind.
    Event(EventKind),
}

impl PayloadType {
    /// Classify a wire payload type code.
    ///
    /// Returns `None` for `0` and `3..=63`.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            PAYLOAD_TYPE_BUFFER => Some(PayloadType::Buffer),
            PAYLOAD_TYPE_CAPS => Some(PayloadType::Caps),
            c if c >= EVENT_TYPE_BASE => {
                Some(PayloadType::Event(EventKind::from_code(u32::from(
                    c - EVENT_TYPE_BASE,
                ))))
            }
            _ => None,
        }
    }

    /// The wire code for this payload type.
    ///
    /// Event codes beyond the representable range saturate.
    pub fn code(self) -> u16 {
        match self {
            PayloadType::Buffer => PAYLOAD_TYPE_BUFFER,
            PayloadType::Caps => PAYLOAD_TYPE_CAPS,
            PayloadType::Event(kind) => u16::try_from(kind.code())
                .ok()
                .and_then(|code| code.checked_add(EVENT_TYPE_BASE))
                .unwrap_or(u16::MAX),
        }
    }
}

/// A parsed, checksum-verified GDP header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
    /// Protocol version.
    pub version: Version,
    /// Header flags. Unknown bits are retained.
    pub flags: HeaderFlags,
    /// Raw payload type code.
    pub payload_type_code: u16,
    /// Length of the payload that follows the header.
    pub payload_length: u32,
    /// Buffer PTS or event timestamp.
    pub timestamp: u64,
    /// Buffer duration.
    pub duration: u64,
    /// Buffer offset.
    pub offset: u64,
    /// Buffer end offset.
    pub offset_end: u64,
    /// Buffer flags.
    pub buffer_flags: u16,
    /// Buffer decoding timestamp.
    pub dts: u64,
    /// Stored header checksum.
    pub header_crc: u16,
    /// Stored payload checksum.
    pub payload_crc: u16,
}

impl RawHeader {
    /// Classify the payload type, `None` if the code is unknown.
    pub fn payload_type(&self) -> Option<PayloadType> {
        PayloadType::from_code(self.payload_type_code)
    }

    /// Whether a payload follows this header.
    pub fn has_payload(&self) -> bool {
        self.payload_length > 0
    }

    /// Whether the payload checksum must be verified.
    pub fn payload_crc_enabled(&self) -> bool {
        self.flags.contains(HeaderFlags::CRC_PAYLOAD)
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[at..at + 4]);
    u32::from_be_bytes(buf)
}

fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_be_bytes(buf)
}

/// Parse and validate a GDP header block.
///
/// `bytes` must be exactly [`HEADER_LENGTH`] bytes. The header checksum
/// is only verified when the header carries the `CRC_HEADER` flag.
///
/// # Errors
///
/// - [`HeaderError::Length`] if the block has the wrong size
/// - [`HeaderError::UnsupportedVersion`] if the major version is newer
///   than [`MAX_MAJOR_VERSION`]
/// - [`HeaderError::Invalid`] on a header checksum mismatch
pub fn parse_header(bytes: &[u8]) -> Result<RawHeader, HeaderError> {
    if bytes.len() != HEADER_LENGTH {
        return Err(HeaderError::Length {
            expected: HEADER_LENGTH,
            actual: bytes.len(),
        });
    }

    let flags = HeaderFlags::from_bits_retain(bytes[2]);
    let header_crc = read_u16(bytes, HEADER_CRC_OFFSET);
    if flags.contains(HeaderFlags::CRC_HEADER) {
        let computed = compute_crc16(&bytes[..HEADER_CRC_OFFSET]);
        if computed != header_crc {
            return Err(HeaderError::Invalid {
                stored: header_crc,
                computed,
            });
        }
    }

    let version = Version {
        major: bytes[0],
        minor: bytes[1],
    };
    if version.major > MAX_MAJOR_VERSION {
        return Err(HeaderError::UnsupportedVersion {
            major: version.major,
            minor: version.minor,
        });
    }

    Ok(RawHeader {
        version,
        flags,
        payload_type_code: read_u16(bytes, 4),
        payload_length: read_u32(bytes, 6),
        timestamp: read_u64(bytes, 10),
        duration: read_u64(bytes, 18),
        offset: read_u64(bytes, 26),
        offset_end: read_u64(bytes, 34),
        buffer_flags: read_u16(bytes, 42),
        dts: read_u64(bytes, 44),
        header_crc,
        payload_crc: read_u16(bytes, PAYLOAD_CRC_OFFSET),
    })
}
