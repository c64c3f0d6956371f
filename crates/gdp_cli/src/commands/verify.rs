//! Verify command implementation.

use std::io::{self, Write};
use std::path::Path;

use gdp_core::{DecodedRecord, WalkerConfig};
use serde::Serialize;
use tracing::info;

use super::{open_walker, WalkFailed};

/// Verification result.
#[derive(Debug, Default, Serialize)]
pub struct VerifyResult {
    /// Number of records decoded.
    pub records: u64,
    /// Number of buffer records.
    pub buffers: u64,
    /// Number of caps records.
    pub caps: u64,
    /// Number of event records.
    pub events: u64,
    /// Bytes covered by decoded records.
    pub bytes: u64,
}

impl VerifyResult {
    fn count(&mut self, record: &DecodedRecord) {
        self.records += 1;
        match record {
            DecodedRecord::Buffer(_) => self.buffers += 1,
            DecodedRecord::Caps(_) => self.caps += 1,
            DecodedRecord::Event(_) => self.events += 1,
        }
    }
}

/// Walks `path` without rendering, counting records by type.
pub fn check(path: &Path) -> Result<VerifyResult, (VerifyResult, WalkFailed)> {
    let mut result = VerifyResult::default();
    let mut walker = match open_walker(path, WalkerConfig::default()) {
        Ok(walker) => walker,
        Err(failure) => return Err((result, failure)),
    };
    info!(path = %path.display(), "verifying stream");

    let report = walker.drain(|_, record| {
        result.count(&record);
        true
    });
    result.bytes = report.offset;

    match report.error {
        Some(error) => Err((result, WalkFailed::new(path, error))),
        None => Ok(result),
    }
}

/// Writes the record counts and the verdict. The failure itself is
/// reported by the caller.
pub fn write_summary(out: &mut impl Write, result: &VerifyResult, passed: bool) -> io::Result<()> {
    writeln!(out, "  Records: {}", result.records)?;
    writeln!(out, "  Buffers: {}", result.buffers)?;
    writeln!(out, "  Caps:    {}", result.caps)?;
    writeln!(out, "  Events:  {}", result.events)?;
    writeln!(out, "  Bytes:   {}", result.bytes)?;
    writeln!(out)?;
    if passed {
        writeln!(out, "✓ Stream verification passed")
    } else {
        writeln!(out, "✗ Stream verification failed")
    }
}

/// Runs the verify command.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Verifying {}", path.display())?;
    writeln!(out)?;

    match check(path) {
        Ok(result) => Ok(write_summary(&mut out, &result, true)?),
        Err((result, failure)) => {
            write_summary(&mut out, &result, false)?;
            Err(failure.into())
        }
    }
}
