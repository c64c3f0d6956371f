//! Error types for record decoding and stream walking.

use gdp_codec::{CodecError, EventKind};
use gdp_source::SourceError;
use thiserror::Error;

/// Result type for record decoders.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for stream walking.
pub type WalkResult<T> = Result<T, WalkError>;

/// A record payload could not be interpreted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Buffer header or payload is inconsistent.
    #[error("malformed buffer: {message}")]
    MalformedBuffer {
        /// Description of the problem.
        message: String,
    },

    /// Caps payload is not a valid caps string.
    #[error("malformed caps: {message}")]
    MalformedCaps {
        /// Description of the problem.
        message: String,
    },

    /// Event payload is missing or has an invalid field.
    #[error("malformed {kind} event: {message}")]
    MalformedEvent {
        /// Kind of the event being decoded.
        kind: EventKind,
        /// Description of the problem.
        message: String,
    },

    /// GStreamer could not be initialized to parse caps or event text.
    #[error("GStreamer initialization failed: {message}")]
    GStreamerInit {
        /// Error reported by GStreamer.
        message: String,
    },
}

impl DecodeError {
    /// Create a malformed buffer error.
    pub fn malformed_buffer(message: impl Into<String>) -> Self {
        Self::MalformedBuffer {
            message: message.into(),
        }
    }

    /// Create a malformed caps error.
    pub fn malformed_caps(message: impl Into<String>) -> Self {
        Self::MalformedCaps {
            message: message.into(),
        }
    }

    /// Create a malformed event error.
    pub fn malformed_event(kind: EventKind, message: impl Into<String>) -> Self {
        Self::MalformedEvent {
            kind,
            message: message.into(),
        }
    }
}

/// Classification of a terminal walk failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A header could not be read or failed validation.
    CorruptHeader,
    /// The stream ended inside a payload.
    TruncatedPayload,
    /// A payload checksum did not match.
    IntegrityCheckFailed,
    /// A payload could not be decoded into a record.
    MalformedRecord,
    /// The header carries a payload type this decoder does not know.
    UnknownPayloadType,
    /// The byte source failed.
    Source,
}

impl FailureKind {
    /// Stable lowercase name, e.g. `"truncated-payload"`.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::CorruptHeader => "corrupt-header",
            FailureKind::TruncatedPayload => "truncated-payload",
            FailureKind::IntegrityCheckFailed => "integrity-check-failed",
            FailureKind::MalformedRecord => "malformed-record",
            FailureKind::UnknownPayloadType => "unknown-payload-type",
            FailureKind::Source => "source-error",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal error that ends a stream walk.
///
/// Every variant carries the byte offset at which the problem was detected.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Header could not be read in full or was rejected.
    #[error("corrupt header at offset {offset}: {reason}")]
    CorruptHeader {
        /// Start of the offending record.
        offset: u64,
        /// Description of the problem.
        reason: String,
    },

    /// The stream ended before the declared payload length.
    #[error("truncated payload at offset {offset}: expected {expected} bytes, {available} available")]
    TruncatedPayload {
        /// First payload byte.
        offset: u64,
        /// Declared payload length.
        expected: u64,
        /// Bytes actually available.
        available: u64,
    },

    /// Payload failed its checksum.
    #[error("integrity check failed at offset {offset}: {source}")]
    IntegrityCheckFailed {
        /// First payload byte.
        offset: u64,
        /// Checksum details.
        #[source]
        source: CodecError,
    },

    /// Payload could not be decoded.
    #[error("malformed record at offset {offset}: {source}")]
    MalformedRecord {
        /// First payload byte.
        offset: u64,
        /// Decoder error.
        #[source]
        source: DecodeError,
    },

    /// The payload type code is not a buffer, caps or event code.
    #[error("unknown payload type {code} at offset {offset}")]
    UnknownPayloadType {
        /// First payload byte.
        offset: u64,
        /// Raw payload type code.
        code: u16,
    },

    /// Reading from or closing the byte source failed.
    #[error("source error at offset {offset}: {source}")]
    Source {
        /// Offset of the failed read.
        offset: u64,
        /// Underlying source error.
        #[source]
        source: SourceError,
    },
}

impl WalkError {
    /// The failure classification.
    pub fn kind(&self) -> FailureKind {
        match self {
            WalkError::CorruptHeader { .. } => FailureKind::CorruptHeader,
            WalkError::TruncatedPayload { .. } => FailureKind::TruncatedPayload,
            WalkError::IntegrityCheckFailed { .. } => FailureKind::IntegrityCheckFailed,
            WalkError::MalformedRecord { .. } => FailureKind::MalformedRecord,
            WalkError::UnknownPayloadType { .. } => FailureKind::UnknownPayloadType,
            WalkError::Source { .. } => FailureKind::Source,
        }
    }

    /// Byte offset at which the failure was detected.
    pub fn offset(&self) -> u64 {
        match self {
            WalkError::CorruptHeader { offset, .. }
            | WalkError::TruncatedPayload { offset, .. }
            | WalkError::IntegrityCheckFailed { offset, .. }
            | WalkError::MalformedRecord { offset, .. }
            | WalkError::UnknownPayloadType { offset, .. }
            | WalkError::Source { offset, .. } => *offset,
        }
    }

    /// Create a corrupt header error.
    pub fn corrupt_header(offset: u64, reason: impl Into<String>) -> Self {
        Self::CorruptHeader {
            offset,
            reason: reason.into(),
        }
    }
}
