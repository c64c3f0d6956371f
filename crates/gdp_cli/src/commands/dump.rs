//! Dump command implementation.

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use gdp_core::WalkerConfig;
use serde::Serialize;
use tracing::info;

use super::{open_walker, WalkFailed};
use crate::render::RecordNode;

/// Output format of the dump command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One block per record.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Dump command options.
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Stop after this many records.
    pub limit: Option<usize>,
    /// Output format.
    pub format: OutputFormat,
    /// Include a preview of buffer data.
    pub data: bool,
}

/// Result of a dump.
#[derive(Debug, Serialize)]
pub struct DumpOutput {
    /// Rendered records.
    pub records: Vec<RecordNode>,
    /// Terminal walk status.
    pub status: String,
    /// Offset where the walk stopped.
    pub offset: u64,
    /// The error that ended the walk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Walks `path` and renders every record.
///
/// A walk failure is returned alongside the records decoded before it.
pub fn collect(path: &Path, options: &DumpOptions) -> Result<(DumpOutput, Option<WalkFailed>), WalkFailed> {
    let config = WalkerConfig::new().keep_buffer_data(options.data);
    let mut walker = open_walker(path, config)?;
    if options.limit == Some(0) {
        walker.cancel();
    }
    info!(path = %path.display(), limit = ?options.limit, "dumping stream");

    let mut records = Vec::new();
    let limit = options.limit.unwrap_or(usize::MAX);
    let mut report = walker.drain(|offset, record| {
        records.push(RecordNode::from_record(offset, &record));
        records.len() < limit
    });

    let failure = report.error.take().map(|e| WalkFailed::new(path, e));
    let output = DumpOutput {
        records,
        status: report.status.to_string(),
        offset: report.offset,
        error: failure.as_ref().map(|f| f.source.to_string()),
    };
    Ok((output, failure))
}

/// Writes `output` as text.
pub fn write_text(out: &mut impl Write, output: &DumpOutput) -> io::Result<()> {
    for record in &output.records {
        writeln!(out, "{record}")?;
    }
    writeln!(out)?;
    writeln!(out, "{} records, {}", output.records.len(), output.status)
}

/// Runs the dump command.
pub fn run(path: &Path, options: &DumpOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (output, failure) = collect(path, options)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match options.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?,
        OutputFormat::Text => write_text(&mut out, &output)?,
    }

    match failure {
        Some(failure) => Err(failure.into()),
        None => Ok(()),
    }
}
