//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors produced while parsing a GDP header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// The header block does not have the fixed header length.
    #[error("header must be {expected} bytes, got {actual}")]
    Length {
        /// Required header length.
        expected: usize,
        /// Length of the supplied block.
        actual: usize,
    },

    /// The header checksum does not match its contents.
    #[error("header checksum mismatch: stored {stored:04x}, computed {computed:04x}")]
    Invalid {
        /// Checksum stored in the header.
        stored: u16,
        /// Checksum computed over the header bytes.
        computed: u16,
    },

    /// The header declares a protocol version this decoder cannot read.
    #[error("unsupported GDP version {major}.{minor}")]
    UnsupportedVersion {
        /// Major version byte.
        major: u8,
        /// Minor version byte.
        minor: u8,
    },
}

/// Errors that can occur while validating or interpreting payload bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The header block could not be parsed.
    #[error(transparent)]
    Header(#[from] HeaderError),

    /// The payload length differs from the length declared in the header.
    #[error("payload length mismatch: header declares {declared} bytes, got {actual}")]
    PayloadLength {
        /// Length declared by the header.
        declared: u32,
        /// Length of the supplied payload.
        actual: usize,
    },

    /// The payload checksum does not match the header.
    #[error("payload checksum mismatch: stored {stored:04x}, computed {computed:04x}")]
    PayloadChecksum {
        /// Checksum stored in the header.
        stored: u16,
        /// Checksum computed over the payload.
        computed: u16,
    },

    /// Payload text is not valid UTF-8.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,
}
