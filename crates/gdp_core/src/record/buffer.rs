//! Buffer records.

use bytes::Bytes;
use gdp_codec::{PayloadType, RawHeader};

use super::clock_time;
use crate::error::{DecodeError, DecodeResult};
use crate::format::{buffer_flags_from_wire, BufferFlags};

/// Buffer metadata taken from the header, before the payload is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSkeleton {
    /// Presentation timestamp.
    pub pts: Option<u64>,
    /// Decoding timestamp.
    pub dts: Option<u64>,
    /// Duration.
    pub duration: Option<u64>,
    /// Media-specific offset.
    pub offset: Option<u64>,
    /// Media-specific end offset.
    pub offset_end: Option<u64>,
    /// Declared payload size.
    pub size: u32,
    /// Buffer flags.
    pub flags: BufferFlags,
}

/// A decoded media buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferRecord {
    /// Presentation timestamp.
    pub pts: Option<u64>,
    /// Decoding timestamp.
    pub dts: Option<u64>,
    /// Duration.
    pub duration: Option<u64>,
    /// Media-specific offset.
    pub offset: Option<u64>,
    /// Media-specific end offset.
    pub offset_end: Option<u64>,
    /// Payload size in bytes.
    pub size: u32,
    /// Buffer flags.
    pub flags: BufferFlags,
    /// Copy of the payload, only kept when requested.
    pub data: Option<Bytes>,
}

/// Build buffer metadata from a buffer header.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedBuffer`] if the header does not
/// describe a buffer.
pub fn decode_buffer(header: &RawHeader) -> DecodeResult<BufferSkeleton> {
    if header.payload_type() != Some(PayloadType::Buffer) {
        return Err(DecodeError::malformed_buffer(format!(
            "payload type {} is not a buffer",
            header.payload_type_code
        )));
    }

    Ok(BufferSkeleton {
        pts: clock_time(header.timestamp),
        dts: clock_time(header.dts),
        duration: clock_time(header.duration),
        offset: clock_time(header.offset),
        offset_end: clock_time(header.offset_end),
        size: header.payload_length,
        flags: buffer_flags_from_wire(header.buffer_flags),
    })
}

impl BufferSkeleton {
    /// Complete the record with its payload.
    ///
    /// The payload is kept, sharing its storage, only when the buffer is
    /// non-empty and `keep_data` is set.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedBuffer`] if the payload length
    /// differs from the declared size.
    pub fn fill(self, payload: &Bytes, keep_data: bool) -> DecodeResult<BufferRecord> {
        if payload.len() != self.size as usize {
            return Err(DecodeError::malformed_buffer(format!(
                "payload is {} bytes, header declares {}",
                payload.len(),
                self.size
            )));
        }

        let data = (keep_data && self.size > 0).then(|| payload.clone());

        Ok(BufferRecord {
            pts: self.pts,
            dts: self.dts,
            duration: self.duration,
            offset: self.offset,
            offset_end: self.offset_end,
            size: self.size,
            flags: self.flags,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdp_codec::{HeaderFlags, Version, CLOCK_TIME_NONE, PAYLOAD_TYPE_BUFFER, PAYLOAD_TYPE_CAPS};

    fn buffer_header(payload_length: u32) -> RawHeader {
        RawHeader {
            version: Version { major: 1, minor: 0 },
            flags: HeaderFlags::empty(),
            payload_type_code: PAYLOAD_TYPE_BUFFER,
            payload_length,
            timestamp: 40_000_000,
            duration: CLOCK_TIME_NONE,
            offset: 12,
            offset_end: CLOCK_TIME_NONE,
            buffer_flags: (1 << 6) | (1 << 13),
            dts: CLOCK_TIME_NONE,
            header_crc: 0,
            payload_crc: 0,
        }
    }

    #[test]
    fn skeleton_from_header() {
        let skeleton = decode_buffer(&buffer_header(4)).unwrap();
        assert_eq!(skeleton.pts, Some(40_000_000));
        assert_eq!(skeleton.dts, None);
        assert_eq!(skeleton.duration, None);
        assert_eq!(skeleton.offset, Some(12));
        assert_eq!(skeleton.offset_end, None);
        assert_eq!(skeleton.size, 4);
        assert_eq!(skeleton.flags, BufferFlags::DISCONT | BufferFlags::DELTA_UNIT);
    }

    #[test]
    fn non_buffer_header_rejected() {
        let mut header = buffer_header(0);
        header.payload_type_code = PAYLOAD_TYPE_CAPS;
        assert!(matches!(
            decode_buffer(&header),
            Err(DecodeError::MalformedBuffer { .. })
        ));
    }

    #[test]
    fn fill_without_data() {
        let record = decode_buffer(&buffer_header(4))
            .unwrap()
            .fill(&Bytes::from_static(b"abcd"), false)
            .unwrap();
        assert_eq!(record.size, 4);
        assert_eq!(record.data, None);
    }

    #[test]
    fn fill_keeps_data_on_request() {
        let record = decode_buffer(&buffer_header(4))
            .unwrap()
            .fill(&Bytes::from_static(b"abcd"), true)
            .unwrap();
        assert_eq!(record.data.as_deref(), Some(&b"abcd"[..]));
    }

    #[test]
    fn empty_buffer_never_keeps_data() {
        let record = decode_buffer(&buffer_header(0))
            .unwrap()
            .fill(&Bytes::new(), true)
            .unwrap();
        assert_eq!(record.data, None);
    }

    #[test]
    fn fill_rejects_length_mismatch() {
        let result = decode_buffer(&buffer_header(4)).unwrap().fill(&Bytes::from_static(b"ab"), false);
        assert!(matches!(result, Err(DecodeError::MalformedBuffer { .. })));
    }
}
