//! # GDP Source
//!
//! Sequential byte sources consumed by the GDP stream walker.
//!
//! A source is an **opaque, forward-only byte stream**. It does not know
//! anything about GDP headers or payloads; the walker owns all format
//! interpretation.
//!
//! ## Design Principles
//!
//! - Sources are read strictly in order (`read`, never seek)
//! - A short read signals the end of available data, not an error
//! - `remaining_len` is a hint used for progress and clean end detection
//! - `close` releases the underlying handle; reads after close fail
//!
//! ## Available Sources
//!
//! - [`InMemorySource`] - For buffers already in memory and for tests
//! - [`FileSource`] - For GDP files on disk
//! - [`ReaderSource`] - For any [`std::io::Read`] of unknown length (pipes, sockets)
//!
//! ## Example
//!
//! ```rust
//! use gdp_source::{ByteSource, InMemorySource};
//!
//! let mut source = InMemorySource::new(b"hello world".to_vec());
//! assert_eq!(source.read(5).unwrap(), &b"hello"[..]);
//! assert_eq!(source.current_offset(), 5);
//! assert_eq!(source.remaining_len(), Some(6));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod reader;
mod source;

pub use error::{SourceError, SourceResult};
pub use file::FileSource;
pub use memory::InMemorySource;
pub use reader::ReaderSource;
pub use source::ByteSource;
