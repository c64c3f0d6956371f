//! Byte source over an arbitrary reader.

use crate::error::{SourceError, SourceResult};
use crate::source::ByteSource;
use bytes::Bytes;
use std::io::{ErrorKind, Read};

/// A byte source wrapping any [`Read`] implementation.
///
/// The total length is unknown, so [`ByteSource::remaining_len`] returns
/// `None` and the end of the stream is only discovered by a short read.
/// Interrupted reads are retried.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: Option<R>,
    pos: u64,
}

impl<R: Read> ReaderSource<R> {
    /// Wraps the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            pos: 0,
        }
    }

    /// Consumes the source and returns the reader, if it was not closed.
    pub fn into_inner(self) -> Option<R> {
        self.reader
    }
}

impl<R: Read + Send> ByteSource for ReaderSource<R> {
    fn read(&mut self, len: usize) -> SourceResult<Bytes> {
        let reader = self.reader.as_mut().ok_or(SourceError::Closed)?;

        let mut buffer = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            match reader.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        buffer.truncate(filled);
        self.pos += filled as u64;

        Ok(buffer.into())
    }

    fn remaining_len(&self) -> Option<u64> {
        None
    }

    fn current_offset(&self) -> u64 {
        self.pos
    }

    fn close(&mut self) -> SourceResult<()> {
        self.reader = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that hands out at most `step` bytes per call.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn reader_length_is_unknown() {
        let source = ReaderSource::new(Cursor::new(vec![1, 2, 3]));
        assert_eq!(source.remaining_len(), None);
    }

    #[test]
    fn reader_fills_across_partial_reads() {
        let mut source = ReaderSource::new(Trickle {
            data: (0u8..20).collect(),
            pos: 0,
            step: 3,
        });

        let chunk = source.read(10).unwrap();
        assert_eq!(chunk, (0u8..10).collect::<Vec<_>>());
        assert_eq!(source.current_offset(), 10);
    }

    #[test]
    fn reader_short_read_at_end() {
        let mut source = ReaderSource::new(Cursor::new(b"abc".to_vec()));
        assert_eq!(source.read(8).unwrap(), &b"abc"[..]);
        assert!(source.read(8).unwrap().is_empty());
        assert_eq!(source.current_offset(), 3);
    }

    #[test]
    fn reader_close() {
        let mut source = ReaderSource::new(Cursor::new(b"abc".to_vec()));
        source.close().unwrap();
        assert!(matches!(source.read(1), Err(SourceError::Closed)));
        assert!(source.into_inner().is_none());
    }
}
