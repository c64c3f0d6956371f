//! Payload integrity checks and text extraction.

use crate::crc::compute_crc16;
use crate::error::{CodecError, CodecResult};
use crate::header::RawHeader;

/// Verify a payload against its header.
///
/// An empty declared payload always passes without inspecting `payload`.
/// Otherwise, when the header carries `CRC_PAYLOAD`, the payload must have
/// the declared length and match the stored checksum.
pub fn check_payload(header: &RawHeader, payload: &[u8]) -> CodecResult<()> {
    if header.payload_length == 0 || !header.payload_crc_enabled() {
        return Ok(());
    }

    if payload.len() != header.payload_length as usize {
        return Err(CodecError::PayloadLength {
            declared: header.payload_length,
            actual: payload.len(),
        });
    }

    let computed = compute_crc16(payload);
    if computed != header.payload_crc {
        return Err(CodecError::PayloadChecksum {
            stored: header.payload_crc,
            computed,
        });
    }
    Ok(())
}

/// Boolean form of [`check_payload`].
pub fn validate_payload(header: &RawHeader, payload: &[u8]) -> bool {
    check_payload(header, payload).is_ok()
}

/// Extract the NUL-terminated UTF-8 text of a caps or event payload.
///
/// The text ends at the first NUL byte, or at the end of the payload if
/// there is none.
pub fn payload_text(payload: &[u8]) -> CodecResult<&str> {
    let end = payload
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(payload.len());
    std::str::from_utf8(&payload[..end]).map_err(|_| CodecError::InvalidUtf8)
}
