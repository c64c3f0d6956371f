//! Error types for byte sources.

use std::io;
use thiserror::Error;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while reading from a byte source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source has already been closed.
    #[error("source is closed")]
    Closed,
}
