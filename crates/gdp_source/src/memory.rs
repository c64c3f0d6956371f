//! In-memory byte source.

use crate::error::{SourceError, SourceResult};
use crate::source::ByteSource;
use bytes::Bytes;

/// A byte source over data already held in memory.
///
/// This source is suitable for:
/// - Unit and integration tests
/// - Streams received in one piece (e.g. downloaded blobs)
///
/// Reads hand out slices of the backing [`Bytes`] without copying. The
/// backing buffer is released on [`ByteSource::close`].
///
/// # Example
///
/// ```rust
/// use gdp_source::{ByteSource, InMemorySource};
///
/// let mut source = InMemorySource::new(vec![1, 2, 3]);
/// assert_eq!(source.read(8).unwrap(), vec![1u8, 2, 3]);
/// assert_eq!(source.remaining_len(), Some(0));
/// ```
#[derive(Debug, Default)]
pub struct InMemorySource {
    data: Bytes,
    pos: usize,
    closed: bool,
}

impl InMemorySource {
    /// Creates a source over the given data.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            closed: false,
        }
    }

    /// Returns the total length of the data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the source holds no data at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` once [`ByteSource::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ByteSource for InMemorySource {
    fn read(&mut self, len: usize) -> SourceResult<Bytes> {
        if self.closed {
            return Err(SourceError::Closed);
        }

        let end = self.pos.saturating_add(len).min(self.data.len());
        let chunk = self.data.slice(self.pos..end);
        self.pos = end;
        Ok(chunk)
    }

    fn remaining_len(&self) -> Option<u64> {
        Some((self.data.len() - self.pos) as u64)
    }

    fn current_offset(&self) -> u64 {
        self.pos as u64
    }

    fn close(&mut self) -> SourceResult<()> {
        self.closed = true;
        self.data = Bytes::new();
        self.pos = 0;
        Ok(())
    }
}
