//! File-backed byte source.

use crate::error::{SourceError, SourceResult};
use crate::source::ByteSource;
use bytes::Bytes;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Default capacity of the read buffer wrapped around the file.
const READ_BUFFER_SIZE: usize = 64 * 1024; // 64 KB

/// A byte source reading a file from disk.
///
/// The file is opened read-only and read through a [`BufReader`], so the
/// walker can request small header blocks without one syscall per block.
/// The file size is captured at open time and used for
/// [`ByteSource::remaining_len`].
///
/// # Example
///
/// ```no_run
/// use gdp_source::{ByteSource, FileSource};
/// use std::path::Path;
///
/// let mut source = FileSource::open(Path::new("capture.gdp")).unwrap();
/// let header = source.read(62).unwrap();
/// source.close().unwrap();
/// ```
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    size: u64,
    pos: u64,
}

impl FileSource {
    /// Opens the file at `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its metadata read.
    pub fn open(path: &Path) -> SourceResult<Self> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            reader: Some(BufReader::with_capacity(READ_BUFFER_SIZE, file)),
            size,
            pos: 0,
        })
    }

    /// Returns the path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file size captured at open time.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns `true` once the file handle has been released.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

impl ByteSource for FileSource {
    fn read(&mut self, len: usize) -> SourceResult<Bytes> {
        let reader = self.reader.as_mut().ok_or(SourceError::Closed)?;

        let mut buffer = Vec::with_capacity(len.min(READ_BUFFER_SIZE));
        reader.by_ref().take(len as u64).read_to_end(&mut buffer)?;
        self.pos += buffer.len() as u64;

        Ok(buffer.into())
    }

    fn remaining_len(&self) -> Option<u64> {
        Some(self.size.saturating_sub(self.pos))
    }

    fn current_offset(&self) -> u64 {
        self.pos
    }

    fn close(&mut self) -> SourceResult<()> {
        // Dropping the reader closes the file descriptor
        self.reader = None;
        Ok(())
    }
}
