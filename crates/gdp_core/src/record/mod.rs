//! Decoded GDP records.
//!
//! Each payload type has its own decoder:
//!
//! - [`decode_buffer`] builds a [`BufferSkeleton`] from the header alone,
//!   which [`BufferSkeleton::fill`] completes once the payload is read
//! - [`decode_caps`] reads the caps string
//! - [`decode_event`] dispatches on the event kind to a per-kind field
//!   decoder
//!
//! Records own their data; no decoder keeps a reference to the scratch
//! header or payload buffers. Caps and event text is parsed by GStreamer,
//! which the decoders initialize on first use.

mod buffer;
mod caps;
mod event;

pub use buffer::{decode_buffer, BufferRecord, BufferSkeleton};
pub use caps::{decode_caps, CapsRecord};
pub use event::{decode_event, has_field_table, EventBody, EventRecord, Segment};

use gdp_codec::{gst, CLOCK_TIME_NONE};

use crate::error::{DecodeError, DecodeResult};

/// A decoded record.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedRecord {
    /// Media buffer metadata.
    Buffer(BufferRecord),
    /// Caps description.
    Caps(CapsRecord),
    /// Control event.
    Event(EventRecord),
}

impl DecodedRecord {
    /// Short record type name: `"buffer"`, `"caps"` or `"event"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            DecodedRecord::Buffer(_) => "buffer",
            DecodedRecord::Caps(_) => "caps",
            DecodedRecord::Event(_) => "event",
        }
    }
}

impl From<BufferRecord> for DecodedRecord {
    fn from(record: BufferRecord) -> Self {
        DecodedRecord::Buffer(record)
    }
}

impl From<CapsRecord> for DecodedRecord {
    fn from(record: CapsRecord) -> Self {
        DecodedRecord::Caps(record)
    }
}

impl From<EventRecord> for DecodedRecord {
    fn from(record: EventRecord) -> Self {
        DecodedRecord::Event(record)
    }
}

/// Map the wire sentinel to `None`.
#[inline]
pub fn clock_time(value: u64) -> Option<u64> {
    (value != CLOCK_TIME_NONE).then_some(value)
}

/// Initialize GStreamer; later calls are cheap.
pub(crate) fn init_gstreamer() -> DecodeResult<()> {
    gst::init().map_err(|e| DecodeError::GStreamerInit {
        message: e.to_string(),
    })
}
