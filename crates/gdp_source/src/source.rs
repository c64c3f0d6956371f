//! Byte source trait definition.

use crate::error::SourceResult;
use bytes::Bytes;

/// A sequential, forward-only byte source.
///
/// The walker takes exclusive ownership of a source for the duration of a
/// scan and calls [`ByteSource::close`] once it reaches a terminal state.
///
/// # Invariants
///
/// - `read` never returns more than `len` bytes
/// - `read` returns fewer than `len` bytes only when the data is exhausted
/// - `current_offset` equals the total number of bytes returned by `read`
/// - After `close`, every `read` fails with [`crate::SourceError::Closed`]
///
/// # Implementors
///
/// - [`super::InMemorySource`] - For in-memory data
/// - [`super::FileSource`] - For files
/// - [`super::ReaderSource`] - For arbitrary readers of unknown length
pub trait ByteSource: Send {
    /// Reads up to `len` bytes.
    ///
    /// Returns exactly `len` bytes unless the end of the data is reached,
    /// in which case the returned chunk is shorter (possibly empty).
    ///
    /// # Errors
    ///
    /// Returns an error if the source is closed or an I/O error occurs.
    fn read(&mut self, len: usize) -> SourceResult<Bytes>;

    /// Returns the number of bytes left to read, if known.
    ///
    /// Sources backed by pipes or sockets return `None`.
    fn remaining_len(&self) -> Option<u64>;

    /// Returns the number of bytes consumed so far.
    fn current_offset(&self) -> u64;

    /// Releases the underlying resource.
    ///
    /// Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if releasing the resource fails.
    fn close(&mut self) -> SourceResult<()>;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, len: usize) -> SourceResult<Bytes> {
        (**self).read(len)
    }

    fn remaining_len(&self) -> Option<u64> {
        (**self).remaining_len()
    }

    fn current_offset(&self) -> u64 {
        (**self).current_offset()
    }

    fn close(&mut self) -> SourceResult<()> {
        (**self).close()
    }
}
