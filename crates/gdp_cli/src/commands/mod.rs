//! CLI command implementations.

pub mod dump;
pub mod verify;

use std::path::Path;

use gdp_core::{StreamWalker, WalkError, WalkerConfig};
use gdp_source::FileSource;
use thiserror::Error;

/// A walk that ended in failure.
#[derive(Debug, Error)]
#[error("{path}: {source}")]
pub struct WalkFailed {
    /// File being walked.
    pub path: String,
    /// The error that stopped the walk.
    #[source]
    pub source: WalkError,
}

impl WalkFailed {
    fn new(path: &Path, source: WalkError) -> Self {
        Self {
            path: path.display().to_string(),
            source,
        }
    }
}

fn open_walker(path: &Path, config: WalkerConfig) -> Result<StreamWalker<FileSource>, WalkFailed> {
    StreamWalker::open(path, config).map_err(|source| WalkFailed::new(path, source))
}
