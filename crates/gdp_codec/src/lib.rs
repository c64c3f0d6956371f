//! # GDP Codec
//!
//! Wire-level decoding for the GStreamer Data Protocol (GDP).
//!
//! A GDP stream is a sequence of packets, each a fixed 62-byte header
//! followed by a payload of the length the header declares:
//!
//! - Headers are parsed with [`parse_header`] and optionally protected by a
//!   CRC-16 over their first 58 bytes.
//! - Payloads are checked with [`check_payload`] against the header's
//!   payload CRC.
//! - Caps and event payloads are NUL-terminated text, extracted with
//!   [`payload_text`] and handed to GStreamer for parsing.
//!
//! This crate only decodes; it performs no I/O.

mod crc;
mod error;
mod event_kind;
mod header;
mod payload;

pub use gstreamer as gst;

pub use crc::compute_crc16;
pub use error::{CodecError, CodecResult, HeaderError};
pub use event_kind::{EventKind, UNKNOWN_EVENT_NAME};
pub use header::{
    parse_header, HeaderFlags, PayloadType, RawHeader, Version, CLOCK_TIME_NONE,
    EVENT_TYPE_BASE, HEADER_LENGTH, MAX_MAJOR_VERSION, PAYLOAD_TYPE_BUFFER, PAYLOAD_TYPE_CAPS,
};
pub use payload::{check_payload, payload_text, validate_payload};
