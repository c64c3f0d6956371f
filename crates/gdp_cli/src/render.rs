//! Display trees for decoded records.
//!
//! Each record becomes one [`RecordNode`] with a child [`FieldNode`] per
//! field. Values are preformatted strings: clock times as
//! `H:MM:SS.NNNNNNNNN`, flag sets as comma lists, and unset values as
//! [`NOT_SET`].

use std::fmt;

use gdp_core::format::{enum_name, format_flags};
use gdp_core::{
    BufferRecord, CapsRecord, DecodedRecord, EventBody, EventRecord, Format, Segment,
};
use serde::Serialize;

/// Text shown for a field carrying the "not set" sentinel.
pub const NOT_SET: &str = "not set";

/// Bytes of buffer data shown before eliding the rest.
pub const DATA_PREVIEW_LEN: usize = 32;

/// One named field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldNode {
    /// Field name.
    pub name: String,
    /// Formatted value.
    pub value: String,
}

/// A record with its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordNode {
    /// Byte offset of the record header.
    pub offset: u64,
    /// `Buffer`, `Caps` or `Event <name>`.
    pub title: String,
    /// Fields in display order.
    pub fields: Vec<FieldNode>,
}

impl RecordNode {
    /// Builds the display tree of `record`, found at `offset`.
    pub fn from_record(offset: u64, record: &DecodedRecord) -> Self {
        let mut fields = Fields::default();
        let title = match record {
            DecodedRecord::Buffer(buffer) => {
                buffer_fields(&mut fields, buffer);
                "Buffer".to_string()
            }
            DecodedRecord::Caps(caps) => {
                caps_fields(&mut fields, caps);
                "Caps".to_string()
            }
            DecodedRecord::Event(event) => {
                event_fields(&mut fields, event);
                format!("Event {}", event.kind)
            }
        };
        Self {
            offset,
            title,
            fields: fields.0,
        }
    }

    /// Value of the first field called `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

impl fmt::Display for RecordNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:08}] {}", self.offset, self.title)?;
        for field in &self.fields {
            write!(f, "\n    {}: {}", field.name, field.value)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct Fields(Vec<FieldNode>);

impl Fields {
    fn push(&mut self, name: &str, value: impl ToString) {
        self.0.push(FieldNode {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}

/// Formats nanoseconds the way GStreamer prints clock times.
pub fn format_clock_time(ns: u64) -> String {
    const SECOND: u64 = 1_000_000_000;
    let secs = ns / SECOND;
    format!(
        "{}:{:02}:{:02}.{:09}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        ns % SECOND
    )
}

fn clock(value: Option<u64>) -> String {
    value.map_or_else(|| NOT_SET.to_string(), format_clock_time)
}

fn number(value: Option<u64>) -> String {
    value.map_or_else(|| NOT_SET.to_string(), |v| v.to_string())
}

fn unsigned_position(format: Format, value: u64) -> String {
    match (format, gdp_core::clock_time(value)) {
        (_, None) => NOT_SET.to_string(),
        (Format::Time, Some(ns)) => format_clock_time(ns),
        (_, Some(v)) => v.to_string(),
    }
}

fn signed_position(format: Format, value: i64) -> String {
    match u64::try_from(value) {
        Ok(v) => unsigned_position(format, v),
        Err(_) if value == -1 => NOT_SET.to_string(),
        Err(_) => value.to_string(),
    }
}

fn hex_preview(data: &[u8]) -> String {
    let shown = &data[..data.len().min(DATA_PREVIEW_LEN)];
    let mut text: String = shown
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    if data.len() > shown.len() {
        text.push_str(" ...");
    }
    text
}

fn buffer_fields(fields: &mut Fields, buffer: &BufferRecord) {
    fields.push("pts", clock(buffer.pts));
    fields.push("dts", clock(buffer.dts));
    fields.push("duration", clock(buffer.duration));
    fields.push("offset", number(buffer.offset));
    fields.push("offset-end", number(buffer.offset_end));
    fields.push("size", buffer.size);
    fields.push("flags", format_flags(&buffer.flags));
    if let Some(data) = &buffer.data {
        fields.push("data", hex_preview(data));
    }
}

fn caps_fields(fields: &mut Fields, caps: &CapsRecord) {
    fields.push("caps", &caps.caps);
    if !caps.media_types.is_empty() {
        fields.push("media-types", caps.media_types.join(", "));
    }
}

fn segment_fields(fields: &mut Fields, segment: &Segment) {
    let format = segment.format;
    fields.push("flags", format_flags(&segment.flags));
    fields.push("rate", segment.rate);
    fields.push("applied-rate", segment.applied_rate);
    fields.push("format", enum_name(format));
    fields.push("base", unsigned_position(format, segment.base));
    fields.push("offset", unsigned_position(format, segment.offset));
    fields.push("start", unsigned_position(format, segment.start));
    fields.push("stop", unsigned_position(format, segment.stop));
    fields.push("time", unsigned_position(format, segment.time));
    fields.push("position", unsigned_position(format, segment.position));
    fields.push("duration", unsigned_position(format, segment.duration));
}

fn event_fields(fields: &mut Fields, event: &EventRecord) {
    fields.push("timestamp", clock(event.timestamp));
    match &event.body {
        EventBody::Bare => {}
        EventBody::FlushStop { reset_time } => fields.push("reset-time", reset_time),
        EventBody::Gap {
            timestamp,
            duration,
        } => {
            fields.push("gap-timestamp", unsigned_position(Format::Time, *timestamp));
            fields.push("gap-duration", unsigned_position(Format::Time, *duration));
        }
        EventBody::StreamStart { stream_id } => fields.push("stream-id", stream_id),
        EventBody::Segment(segment) => segment_fields(fields, segment),
        EventBody::Tag { taglist } => fields.push("taglist", taglist),
        EventBody::BufferSize {
            format,
            min_size,
            max_size,
            is_async,
        } => {
            fields.push("format", enum_name(*format));
            fields.push("minsize", min_size);
            fields.push("maxsize", max_size);
            fields.push("async", is_async);
        }
        EventBody::Qos {
            qos_type,
            proportion,
            diff,
            timestamp,
        } => {
            fields.push("type", enum_name(*qos_type));
            fields.push("proportion", proportion);
            fields.push("diff", diff);
            fields.push("qos-timestamp", unsigned_position(Format::Time, *timestamp));
        }
        EventBody::Seek {
            rate,
            format,
            flags,
            start_type,
            start,
            stop_type,
            stop,
        } => {
            fields.push("rate", rate);
            fields.push("format", enum_name(*format));
            fields.push("flags", format_flags(flags));
            fields.push("start-type", enum_name(*start_type));
            fields.push("start", signed_position(*format, *start));
            fields.push("stop-type", enum_name(*stop_type));
            fields.push("stop", signed_position(*format, *stop));
        }
        EventBody::Latency { latency } => {
            fields.push("latency", unsigned_position(Format::Time, *latency));
        }
        EventBody::Step {
            format,
            amount,
            rate,
            flush,
            intermediate,
        } => {
            fields.push("format", enum_name(*format));
            fields.push("amount", unsigned_position(*format, *amount));
            fields.push("rate", rate);
            fields.push("flush", flush);
            fields.push("intermediate", intermediate);
        }
        EventBody::SinkMessage { message_type } => fields.push("message-type", message_type),
        EventBody::Caps { caps } => fields.push("caps", caps),
        EventBody::TocSelect { uid } => fields.push("uid", uid),
        EventBody::SegmentDone { format, position } => {
            fields.push("format", enum_name(*format));
            fields.push("position", signed_position(*format, *position));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_format() {
        assert_eq!(format_clock_time(0), "0:00:00.000000000");
        assert_eq!(format_clock_time(1_500_000_000), "0:00:01.500000000");
        assert_eq!(format_clock_time(3_723_000_000_001), "1:02:03.000000001");
    }

    #[test]
    fn positions() {
        assert_eq!(unsigned_position(Format::Time, u64::MAX), NOT_SET);
        assert_eq!(unsigned_position(Format::Bytes, 42), "42");
        assert_eq!(signed_position(Format::Time, -1), NOT_SET);
        assert_eq!(signed_position(Format::Default, -7), "-7");
        assert_eq!(signed_position(Format::Time, 1_000_000_000), "0:00:01.000000000");
    }

    #[test]
    fn data_preview_is_elided() {
        assert_eq!(hex_preview(&[0xde, 0xad]), "de ad");
        let long = vec![0u8; DATA_PREVIEW_LEN + 1];
        assert!(hex_preview(&long).ends_with(" ..."));
    }

    #[test]
    fn display_lists_fields() {
        let node = RecordNode {
            offset: 62,
            title: "Caps".into(),
            fields: vec![FieldNode {
                name: "caps".into(),
                value: "ANY".into(),
            }],
        };
        assert_eq!(node.to_string(), "[00000062] Caps\n    caps: ANY");
        assert_eq!(node.field("caps"), Some("ANY"));
        assert_eq!(node.field("missing"), None);
    }
}
