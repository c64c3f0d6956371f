//! Walker configuration.

/// Configuration for a [`crate::StreamWalker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Largest payload length read from a source of unknown length. A
    /// larger declared length is treated as a corrupt header. Sources that
    /// report their remaining length are never limited. Unset by default.
    pub max_payload_length: Option<u32>,

    /// Maximum number of bytes requested from the source per read while
    /// collecting a payload.
    pub read_chunk_size: usize,

    /// Whether buffer records keep a copy of their payload.
    pub keep_buffer_data: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_payload_length: None,
            read_chunk_size: 64 * 1024, // 64 KB
            keep_buffer_data: false,
        }
    }
}

impl WalkerConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits payload reads from sources of unknown length.
    #[must_use]
    pub const fn max_payload_length(mut self, length: u32) -> Self {
        self.max_payload_length = Some(length);
        self
    }

    /// Sets the payload read chunk size. Zero is treated as one byte.
    #[must_use]
    pub const fn read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size;
        self
    }

    /// Sets whether buffer records keep their payload.
    #[must_use]
    pub const fn keep_buffer_data(mut self, value: bool) -> Self {
        self.keep_buffer_data = value;
        self
    }
}
