//! GDP packet encoding for tests.
//!
//! [`PacketBuilder`] produces the exact bytes a GStreamer `gdppay`
//! element would write, with knobs for the corruptions the decoder has
//! to reject.

use gdp_codec::{
    compute_crc16, EventKind, HeaderFlags, PayloadType, CLOCK_TIME_NONE, HEADER_LENGTH,
    PAYLOAD_TYPE_BUFFER, PAYLOAD_TYPE_CAPS,
};

const HEADER_CRC_OFFSET: usize = 58;
const PAYLOAD_CRC_OFFSET: usize = 60;

/// Builder for a single GDP packet.
#[derive(Debug, Clone)]
pub struct PacketBuilder {
    major: u8,
    minor: u8,
    payload_type: u16,
    payload: Vec<u8>,
    timestamp: u64,
    duration: u64,
    offset: u64,
    offset_end: u64,
    buffer_flags: u16,
    dts: u64,
    header_crc: bool,
    payload_crc: bool,
    declared_length: Option<u32>,
    corrupt_header_crc: bool,
    corrupt_payload_crc: bool,
}

impl PacketBuilder {
    /// A packet with an arbitrary payload type code.
    pub fn raw(payload_type: u16, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            major: 1,
            minor: 0,
            payload_type,
            payload: payload.into(),
            timestamp: CLOCK_TIME_NONE,
            duration: CLOCK_TIME_NONE,
            offset: CLOCK_TIME_NONE,
            offset_end: CLOCK_TIME_NONE,
            buffer_flags: 0,
            dts: CLOCK_TIME_NONE,
            header_crc: true,
            payload_crc: false,
            declared_length: None,
            corrupt_header_crc: false,
            corrupt_payload_crc: false,
        }
    }

    /// A buffer packet carrying `data`.
    pub fn buffer(data: impl Into<Vec<u8>>) -> Self {
        Self::raw(PAYLOAD_TYPE_BUFFER, data)
    }

    /// A caps packet; the text is NUL-terminated.
    pub fn caps(caps: &str) -> Self {
        Self::raw(PAYLOAD_TYPE_CAPS, nul_terminated(caps))
    }

    /// An event packet of `kind` with a NUL-terminated structure text.
    pub fn event(kind: impl Into<EventKind>, structure: &str) -> Self {
        Self::raw(
            PayloadType::Event(kind.into()).code(),
            nul_terminated(structure),
        )
    }

    /// Sets the protocol version.
    #[must_use]
    pub fn version(mut self, major: u8, minor: u8) -> Self {
        self.major = major;
        self.minor = minor;
        self
    }

    /// Sets the timestamp (PTS for buffers).
    #[must_use]
    pub fn timestamp(mut self, value: u64) -> Self {
        self.timestamp = value;
        self
    }

    /// Sets the duration.
    #[must_use]
    pub fn duration(mut self, value: u64) -> Self {
        self.duration = value;
        self
    }

    /// Sets the media offset.
    #[must_use]
    pub fn offset(mut self, value: u64) -> Self {
        self.offset = value;
        self
    }

    /// Sets the media end offset.
    #[must_use]
    pub fn offset_end(mut self, value: u64) -> Self {
        self.offset_end = value;
        self
    }

    /// Sets the buffer flag bits.
    #[must_use]
    pub fn buffer_flags(mut self, bits: u16) -> Self {
        self.buffer_flags = bits;
        self
    }

    /// Sets the decoding timestamp.
    #[must_use]
    pub fn dts(mut self, value: u64) -> Self {
        self.dts = value;
        self
    }

    /// Enables or disables the header checksum.
    #[must_use]
    pub fn header_crc(mut self, enabled: bool) -> Self {
        self.header_crc = enabled;
        self
    }

    /// Enables or disables the payload checksum.
    #[must_use]
    pub fn payload_crc(mut self, enabled: bool) -> Self {
        self.payload_crc = enabled;
        self
    }

    /// Declares a payload length different from the actual payload.
    #[must_use]
    pub fn declared_length(mut self, length: u32) -> Self {
        self.declared_length = Some(length);
        self
    }

    /// Stores a wrong header checksum.
    #[must_use]
    pub fn corrupt_header_crc(mut self) -> Self {
        self.corrupt_header_crc = true;
        self
    }

    /// Stores a wrong payload checksum.
    #[must_use]
    pub fn corrupt_payload_crc(mut self) -> Self {
        self.corrupt_payload_crc = true;
        self
    }

    /// The payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Encoded length of the whole packet.
    pub fn encoded_len(&self) -> usize {
        HEADER_LENGTH + self.payload.len()
    }

    /// Encodes only the header.
    pub fn build_header(&self) -> Vec<u8> {
        let mut flags = HeaderFlags::empty();
        if self.header_crc {
            flags |= HeaderFlags::CRC_HEADER;
        }
        if self.payload_crc {
            flags |= HeaderFlags::CRC_PAYLOAD;
        }

        let length = self
            .declared_length
            .unwrap_or_else(|| u32::try_from(self.payload.len()).unwrap_or(u32::MAX));

        let mut header = vec![0u8; HEADER_LENGTH];
        header[0] = self.major;
        header[1] = self.minor;
        header[2] = flags.bits();
        header[4..6].copy_from_slice(&self.payload_type.to_be_bytes());
        header[6..10].copy_from_slice(&length.to_be_bytes());
        header[10..18].copy_from_slice(&self.timestamp.to_be_bytes());
        header[18..26].copy_from_slice(&self.duration.to_be_bytes());
        header[26..34].copy_from_slice(&self.offset.to_be_bytes());
        header[34..42].copy_from_slice(&self.offset_end.to_be_bytes());
        header[42..44].copy_from_slice(&self.buffer_flags.to_be_bytes());
        header[44..52].copy_from_slice(&self.dts.to_be_bytes());

        if self.payload_crc && !self.payload.is_empty() {
            let mut crc = compute_crc16(&self.payload);
            if self.corrupt_payload_crc {
                crc ^= 0xFFFF;
            }
            header[PAYLOAD_CRC_OFFSET..].copy_from_slice(&crc.to_be_bytes());
        }

        if self.header_crc {
            let mut crc = compute_crc16(&header[..HEADER_CRC_OFFSET]);
            if self.corrupt_header_crc {
                crc ^= 0xFFFF;
            }
            header[HEADER_CRC_OFFSET..PAYLOAD_CRC_OFFSET].copy_from_slice(&crc.to_be_bytes());
        }

        header
    }

    /// Encodes the header followed by the payload.
    pub fn build(&self) -> Vec<u8> {
        let mut bytes = self.build_header();
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

fn nul_terminated(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    bytes.extend_from_slice(text.as_bytes());
    bytes.push(0);
    bytes
}

/// Concatenates encoded packets into one stream.
pub fn concat_packets<I>(packets: I) -> Vec<u8>
where
    I: IntoIterator<Item = Vec<u8>>,
{
    packets.into_iter().flatten().collect()
}

/// Start offset of each packet in a stream built from `packets`.
pub fn packet_offsets(packets: &[Vec<u8>]) -> Vec<u64> {
    packets
        .iter()
        .scan(0u64, |offset, packet| {
            let start = *offset;
            *offset += packet.len() as u64;
            Some(start)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdp_codec::{check_payload, parse_header, PayloadType};

    #[test]
    fn built_header_parses() {
        let bytes = PacketBuilder::buffer(vec![1, 2, 3, 4])
            .timestamp(1_000)
            .dts(900)
            .buffer_flags(0x40)
            .payload_crc(true)
            .build();
        assert_eq!(bytes.len(), HEADER_LENGTH + 4);

        let header = parse_header(&bytes[..HEADER_LENGTH]).unwrap();
        assert_eq!(header.payload_type(), Some(PayloadType::Buffer));
        assert_eq!(header.payload_length, 4);
        assert_eq!(header.timestamp, 1_000);
        assert_eq!(header.dts, 900);
        assert_eq!(header.duration, CLOCK_TIME_NONE);
        assert!(check_payload(&header, &bytes[HEADER_LENGTH..]).is_ok());
    }

    #[test]
    fn corrupted_checksums_are_rejected() {
        let bytes = PacketBuilder::caps("ANY").corrupt_header_crc().build();
        assert!(parse_header(&bytes[..HEADER_LENGTH]).is_err());

        let bytes = PacketBuilder::caps("ANY")
            .payload_crc(true)
            .corrupt_payload_crc()
            .build();
        let header = parse_header(&bytes[..HEADER_LENGTH]).unwrap();
        assert!(check_payload(&header, &bytes[HEADER_LENGTH..]).is_err());
    }

    #[test]
    fn event_payload_type() {
        let bytes = PacketBuilder::event(gdp_codec::gst::EventType::Eos, "GstEventEos;").build();
        let header = parse_header(&bytes[..HEADER_LENGTH]).unwrap();
        assert_eq!(header.payload_type_code, 28174 + 64);
        assert_eq!(
            header.payload_type(),
            Some(PayloadType::Event(gdp_codec::gst::EventType::Eos.into()))
        );
        assert_eq!(bytes.last(), Some(&0));
    }

    #[test]
    fn offsets_accumulate() {
        let packets = vec![vec![0u8; 62], vec![0u8; 70], vec![0u8; 64]];
        assert_eq!(packet_offsets(&packets), vec![0, 62, 132]);
        assert_eq!(concat_packets(packets).len(), 196);
    }
}
