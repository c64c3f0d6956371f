//! Streaming GDP record walker.
//!
//! The walker turns a [`ByteSource`] into a lazy sequence of decoded
//! records, one record per call:
//!
//! 1. **Awaiting header**: stop cleanly if fewer than [`HEADER_LENGTH`]
//!    bytes remain, otherwise read and validate the header.
//! 2. **Awaiting payload**: check the declared length against the bytes
//!    left, or against the configured limit when the source cannot tell,
//!    then read the payload in bounded chunks.
//! 3. **Dispatch**: classify the payload type, verify the payload
//!    checksum, and run the matching record decoder.
//! 4. **Emit**: hand `(record offset, record)` to the caller and advance.
//!
//! Cancellation is polled before every step. Any failure is terminal:
//! the walker does not try to resynchronize on the next header. On every
//! terminal transition the source is closed.
//!
//! # Failure offsets
//!
//! Header failures report the start of the record. Payload, checksum,
//! unknown-type and decode failures report the first byte after the
//! header.
//!
//! # Example
//!
//! ```
//! use gdp_core::{StreamWalker, WalkStatus, WalkerConfig};
//! use gdp_source::InMemorySource;
//!
//! let mut walker = StreamWalker::new(InMemorySource::new(Vec::new()), WalkerConfig::default());
//! assert!(walker.next_record().unwrap().is_none());
//! assert_eq!(walker.status(), WalkStatus::Completed);
//! ```

use std::path::Path;

use bytes::{Bytes, BytesMut};

use gdp_codec::{check_payload, parse_header, PayloadType, RawHeader, HEADER_LENGTH};
use gdp_source::{ByteSource, FileSource};
use tracing::{debug, trace, warn};

use crate::cancel::CancelToken;
use crate::config::WalkerConfig;
use crate::error::{DecodeResult, FailureKind, WalkError, WalkResult};
use crate::record::{decode_buffer, decode_caps, decode_event, DecodedRecord};

/// Status of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// More records may follow.
    Running,
    /// The source was exhausted at a record boundary.
    Completed,
    /// The walk was cancelled.
    Cancelled,
    /// The walk stopped on a fatal error.
    Failed(FailureKind),
}

impl WalkStatus {
    /// Whether the walk has ended.
    pub fn is_terminal(self) -> bool {
        !matches!(self, WalkStatus::Running)
    }
}

impl std::fmt::Display for WalkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalkStatus::Running => f.write_str("running"),
            WalkStatus::Completed => f.write_str("completed"),
            WalkStatus::Cancelled => f.write_str("cancelled"),
            WalkStatus::Failed(kind) => write!(f, "failed ({kind})"),
        }
    }
}

/// Position of the walker within its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes consumed by emitted records.
    pub offset: u64,
    /// Total source length, if known.
    pub total: Option<u64>,
}

impl Progress {
    /// Fraction consumed in `0.0..=1.0`, if the total is known.
    pub fn fraction(&self) -> Option<f64> {
        self.total.map(|total| {
            if total == 0 {
                1.0
            } else {
                (self.offset as f64 / total as f64).min(1.0)
            }
        })
    }
}

/// Outcome of [`StreamWalker::drain`].
#[derive(Debug)]
pub struct WalkReport {
    /// Terminal status.
    pub status: WalkStatus,
    /// Number of records emitted.
    pub records: u64,
    /// Final offset.
    pub offset: u64,
    /// The error that ended the walk, if it failed.
    pub error: Option<WalkError>,
}

impl WalkReport {
    /// Whether every record in the source was decoded.
    pub fn is_complete(&self) -> bool {
        self.status == WalkStatus::Completed
    }
}

/// A lazy, forward-only walker over the records of a GDP stream.
///
/// The walker owns its source and keeps no record data between steps.
pub struct StreamWalker<S: ByteSource> {
    source: S,
    config: WalkerConfig,
    cancel: CancelToken,
    offset: u64,
    total: Option<u64>,
    records_emitted: u64,
    status: WalkStatus,
    closed: bool,
}

impl StreamWalker<FileSource> {
    /// Opens a GDP file for walking.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::Source`] if the file cannot be opened.
    pub fn open(path: &Path, config: WalkerConfig) -> WalkResult<Self> {
        let source =
            FileSource::open(path).map_err(|source| WalkError::Source { offset: 0, source })?;
        Ok(Self::new(source, config))
    }
}

impl<S: ByteSource> StreamWalker<S> {
    /// Creates a walker starting at the source's current position.
    pub fn new(source: S, config: WalkerConfig) -> Self {
        let offset = source.current_offset();
        let total = source.remaining_len().map(|remaining| offset + remaining);
        Self {
            source,
            config,
            cancel: CancelToken::new(),
            offset,
            total,
            records_emitted: 0,
            status: WalkStatus::Running,
            closed: false,
        }
    }

    /// Uses `token` for cancellation instead of the walker's own token.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this walker.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Requests cancellation; takes effect at the next step.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Current status.
    pub fn status(&self) -> WalkStatus {
        self.status
    }

    /// Offset just past the last emitted record.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of records emitted so far.
    pub fn records_emitted(&self) -> u64 {
        self.records_emitted
    }

    /// Current progress.
    pub fn progress(&self) -> Progress {
        Progress {
            offset: self.offset,
            total: self.total,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Decodes the next record.
    ///
    /// Returns `Ok(Some((offset, record)))` for each record, where
    /// `offset` is the position of its header, and `Ok(None)` once the
    /// walk has completed or been cancelled. A failure is returned once;
    /// later calls return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the [`WalkError`] that ended the walk.
    pub fn next_record(&mut self) -> WalkResult<Option<(u64, DecodedRecord)>> {
        if self.status.is_terminal() {
            return Ok(None);
        }

        if self.cancel.is_cancelled() {
            debug!(offset = self.offset, records = self.records_emitted, "walk cancelled");
            self.finish(WalkStatus::Cancelled);
            return Ok(None);
        }

        match self.read_next_record() {
            Ok(Some((offset, record))) => {
                self.records_emitted += 1;
                debug!(
                    offset,
                    record_type = record.type_name(),
                    next_offset = self.offset,
                    "emitted record"
                );
                Ok(Some((offset, record)))
            }
            Ok(None) => {
                debug!(offset = self.offset, records = self.records_emitted, "walk completed");
                self.finish(WalkStatus::Completed);
                Ok(None)
            }
            Err(err) => {
                warn!(
                    offset = err.offset(),
                    kind = %err.kind(),
                    error = %err,
                    "walk failed"
                );
                self.finish(WalkStatus::Failed(err.kind()));
                Err(err)
            }
        }
    }

    /// Walks to the end, handing each record to `on_record`.
    ///
    /// Returning `false` from `on_record` cancels the walk.
    pub fn drain<F>(&mut self, mut on_record: F) -> WalkReport
    where
        F: FnMut(u64, DecodedRecord) -> bool,
    {
        let mut error = None;
        loop {
            match self.next_record() {
                Ok(Some((offset, record))) => {
                    if !on_record(offset, record) {
                        self.cancel();
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    error = Some(err);
                    break;
                }
            }
        }

        WalkReport {
            status: self.status,
            records: self.records_emitted,
            offset: self.offset,
            error,
        }
    }

    fn finish(&mut self, status: WalkStatus) {
        self.status = status;
        self.close_source();
    }

    fn close_source(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.source.close() {
            warn!(error = %e, "failed to close byte source");
        }
    }

    fn read_source(&mut self, len: usize) -> WalkResult<Bytes> {
        let offset = self.source.current_offset();
        self.source
            .read(len)
            .map_err(|source| WalkError::Source { offset, source })
    }

    /// A payload read in a single chunk is returned as is.
    fn read_payload(&mut self, len: usize) -> WalkResult<Bytes> {
        let chunk_size = self.config.read_chunk_size.max(1);
        let first = self.read_source(len.min(chunk_size))?;
        if first.len() == len || first.is_empty() {
            return Ok(first);
        }

        let mut payload = BytesMut::with_capacity(len);
        payload.extend_from_slice(&first);
        while payload.len() < len {
            let want = (len - payload.len()).min(chunk_size);
            let chunk = self.read_source(want)?;
            if chunk.is_empty() {
                break;
            }
            payload.extend_from_slice(&chunk);
        }
        Ok(payload.freeze())
    }

    fn read_next_record(&mut self) -> WalkResult<Option<(u64, DecodedRecord)>> {
        let record_offset = self.offset;

        let known_remaining = self.source.remaining_len();
        if known_remaining.is_some_and(|remaining| remaining < HEADER_LENGTH as u64) {
            return Ok(None);
        }

        let header_bytes = self.read_source(HEADER_LENGTH)?;
        if header_bytes.len() < HEADER_LENGTH {
            if known_remaining.is_none() {
                trace!(
                    offset = record_offset,
                    trailing = header_bytes.len(),
                    "short header at end of stream"
                );
                return Ok(None);
            }
            return Err(WalkError::corrupt_header(
                record_offset,
                format!(
                    "short header read: {} of {HEADER_LENGTH} bytes",
                    header_bytes.len()
                ),
            ));
        }

        let header = parse_header(&header_bytes)
            .map_err(|e| WalkError::corrupt_header(record_offset, e.to_string()))?;
        trace!(
            offset = record_offset,
            payload_type = header.payload_type_code,
            payload_length = header.payload_length,
            "read header"
        );

        let payload_offset = record_offset + HEADER_LENGTH as u64;
        let expected = u64::from(header.payload_length);
        match self.source.remaining_len() {
            Some(available) if available < expected => {
                return Err(WalkError::TruncatedPayload {
                    offset: payload_offset,
                    expected,
                    available,
                });
            }
            Some(_) => {}
            // Only reads of unknown extent are bounded by the limit.
            None => {
                if let Some(limit) = self.config.max_payload_length {
                    if header.payload_length > limit {
                        return Err(WalkError::corrupt_header(
                            record_offset,
                            format!(
                                "payload length {} exceeds limit {limit}",
                                header.payload_length
                            ),
                        ));
                    }
                }
            }
        }

        let payload = self.read_payload(header.payload_length as usize)?;
        if (payload.len() as u64) < expected {
            return Err(WalkError::TruncatedPayload {
                offset: payload_offset,
                expected,
                available: payload.len() as u64,
            });
        }

        let payload_type =
            header
                .payload_type()
                .ok_or(WalkError::UnknownPayloadType {
                    offset: payload_offset,
                    code: header.payload_type_code,
                })?;

        check_payload(&header, &payload).map_err(|source| WalkError::IntegrityCheckFailed {
            offset: payload_offset,
            source,
        })?;

        let record = self
            .decode(payload_type, &header, &payload)
            .map_err(|source| WalkError::MalformedRecord {
                offset: payload_offset,
                source,
            })?;

        self.offset = payload_offset + expected;
        Ok(Some((record_offset, record)))
    }

    fn decode(
        &self,
        payload_type: PayloadType,
        header: &RawHeader,
        payload: &Bytes,
    ) -> DecodeResult<DecodedRecord> {
        match payload_type {
            PayloadType::Buffer => decode_buffer(header)?
                .fill(payload, self.config.keep_buffer_data)
                .map(DecodedRecord::from),
            PayloadType::Caps => decode_caps(header, payload).map(DecodedRecord::from),
            PayloadType::Event(_) => decode_event(header, payload).map(DecodedRecord::from),
        }
    }
}

impl<S: ByteSource> Iterator for StreamWalker<S> {
    type Item = WalkResult<(u64, DecodedRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl<S: ByteSource> Drop for StreamWalker<S> {
    fn drop(&mut self) {
        self.close_source();
    }
}
