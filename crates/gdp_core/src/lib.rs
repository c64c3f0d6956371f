//! # GDP Core
//!
//! Record decoding and stream walking for GStreamer Data Protocol streams.
//!
//! This crate provides:
//! - Typed records for buffers, caps and events
//! - Per-kind event field decoding
//! - Shared parse and format helpers for GStreamer enums and flags
//! - A streaming walker with byte offset tracking and cancellation
//!
//! ## Example
//!
//! ```rust,ignore
//! use gdp_core::{StreamWalker, WalkerConfig};
//!
//! let walker = StreamWalker::open(Path::new("capture.gdp"), WalkerConfig::default())?;
//! for result in walker {
//!     let (offset, record) = result?;
//!     println!("{offset}: {}", record.type_name());
//! }
//! ```

mod cancel;
mod config;
mod error;
pub mod format;
mod record;
mod walker;

pub use cancel::CancelToken;
pub use config::WalkerConfig;
pub use error::{DecodeError, DecodeResult, FailureKind, WalkError, WalkResult};
pub use format::{BufferFlags, Format, QOSType, SeekFlags, SeekType, SegmentFlags};
pub use record::{
    clock_time, decode_buffer, decode_caps, decode_event, has_field_table, BufferRecord,
    BufferSkeleton, CapsRecord, DecodedRecord, EventBody, EventRecord, Segment,
};
pub use walker::{Progress, StreamWalker, WalkReport, WalkStatus};

pub use gdp_codec::{gst, EventKind, PayloadType, RawHeader};
