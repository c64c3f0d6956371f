//! Event records and the per-kind field decoders.
//!
//! Payloads of kinds with a field table are parsed with
//! `gst::Structure::from_str` and their fields read with typed getters.
//! Untyped numbers and enum or flag names are accepted where GStreamer
//! would write a typed value.

use std::str::FromStr;

use gdp_codec::{gst, payload_text, EventKind, PayloadType, RawHeader};
use gst::glib;
use gst::glib::value::FromValue;
use gst::prelude::*;

use super::{clock_time, init_gstreamer};
use crate::error::{DecodeError, DecodeResult};
use crate::format::{
    enum_from_int, message_type_name, parse_enum, parse_flags, value_nick, Format, QOSType,
    SeekFlags, SeekType, SegmentFlags,
};

/// Playback segment carried by a segment event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Segment flags.
    pub flags: SegmentFlags,
    /// Playback rate.
    pub rate: f64,
    /// Rate already applied upstream.
    pub applied_rate: f64,
    /// Unit of the positions below.
    pub format: Format,
    /// Running time base.
    pub base: u64,
    /// Offset applied to start.
    pub offset: u64,
    /// Start position.
    pub start: u64,
    /// Stop position.
    pub stop: u64,
    /// Stream time of start.
    pub time: u64,
    /// Current position.
    pub position: u64,
    /// Duration of the stream.
    pub duration: u64,
}

/// Kind-specific event fields.
#[derive(Debug, Clone, PartialEq)]
pub enum EventBody {
    /// The kind has no field table; the payload was not interpreted.
    Bare,
    /// Flush stop.
    FlushStop {
        /// Whether running time is reset.
        reset_time: bool,
    },
    /// Gap in the data flow.
    Gap {
        /// Start of the gap.
        timestamp: u64,
        /// Length of the gap.
        duration: u64,
    },
    /// Stream start.
    StreamStart {
        /// Stream identifier.
        stream_id: String,
    },
    /// New playback segment.
    Segment(Segment),
    /// Stream tags.
    Tag {
        /// Serialized tag list.
        taglist: String,
    },
    /// Buffering requirements.
    BufferSize {
        /// Unit of the sizes.
        format: Format,
        /// Minimum size.
        min_size: i64,
        /// Maximum size.
        max_size: i64,
        /// Whether the change is asynchronous.
        is_async: bool,
    },
    /// Quality of service report.
    Qos {
        /// Kind of QoS report.
        qos_type: QOSType,
        /// Long-term processing proportion.
        proportion: f64,
        /// Jitter of the reporting element.
        diff: i64,
        /// Timestamp of the buffer that caused the report.
        timestamp: u64,
    },
    /// Seek request.
    Seek {
        /// Requested rate.
        rate: f64,
        /// Unit of start and stop.
        format: Format,
        /// Seek flags.
        flags: SeekFlags,
        /// How `start` is applied.
        start_type: SeekType,
        /// Start position.
        start: i64,
        /// How `stop` is applied.
        stop_type: SeekType,
        /// Stop position.
        stop: i64,
    },
    /// Latency configuration.
    Latency {
        /// Latency to add.
        latency: u64,
    },
    /// Step request.
    Step {
        /// Unit of `amount`.
        format: Format,
        /// Amount to step.
        amount: u64,
        /// Step rate.
        rate: f64,
        /// Whether to flush.
        flush: bool,
        /// Whether the step is intermediate.
        intermediate: bool,
    },
    /// Message posted by a sink.
    SinkMessage {
        /// Type name of the embedded message.
        message_type: String,
    },
    /// New caps.
    Caps {
        /// The caps string.
        caps: String,
    },
    /// TOC entry selection.
    TocSelect {
        /// Selected entry identifier.
        uid: String,
    },
    /// Segment playback finished.
    SegmentDone {
        /// Unit of `position`.
        format: Format,
        /// Position where the segment ended.
        position: i64,
    },
}

/// A decoded event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Event timestamp.
    pub timestamp: Option<u64>,
    /// Event kind.
    pub kind: EventKind,
    /// Kind-specific fields.
    pub body: EventBody,
}

type FieldResult<T> = Result<T, String>;
type BodyDecoder = fn(&gst::StructureRef) -> FieldResult<EventBody>;

const EVENT_DECODERS: &[(gst::EventType, BodyDecoder)] = &[
    (gst::EventType::FlushStop, decode_flush_stop),
    (gst::EventType::Gap, decode_gap),
    (gst::EventType::StreamStart, decode_stream_start),
    (gst::EventType::Segment, decode_segment),
    (gst::EventType::Tag, decode_tag),
    (gst::EventType::Buffersize, decode_buffer_size),
    (gst::EventType::Qos, decode_qos),
    (gst::EventType::Seek, decode_seek),
    (gst::EventType::Latency, decode_latency),
    (gst::EventType::Step, decode_step),
    (gst::EventType::SinkMessage, decode_sink_message),
    (gst::EventType::Caps, decode_caps_event),
    (gst::EventType::TocSelect, decode_toc_select),
    (gst::EventType::SegmentDone, decode_segment_done),
];

fn decoder_for(kind: EventKind) -> Option<BodyDecoder> {
    let event_type = kind.event_type()?;
    EVENT_DECODERS
        .iter()
        .find(|(ty, _)| *ty == event_type)
        .map(|(_, decode)| *decode)
}

/// Whether events of this kind have their fields decoded.
pub fn has_field_table(kind: EventKind) -> bool {
    decoder_for(kind).is_some()
}

/// Decode an event payload.
///
/// Kinds without a field table decode to [`EventBody::Bare`] without
/// looking at the payload.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedEvent`] if the header is not an event
/// header, or the payload of a kind with a field table does not parse or
/// lacks a field.
pub fn decode_event(header: &RawHeader, payload: &[u8]) -> DecodeResult<EventRecord> {
    let kind = match header.payload_type() {
        Some(PayloadType::Event(kind)) => kind,
        _ => {
            return Err(DecodeError::malformed_event(
                EventKind::from(gst::EventType::Unknown),
                format!("payload type {} is not an event", header.payload_type_code),
            ))
        }
    };

    let body = match decoder_for(kind) {
        None => EventBody::Bare,
        Some(decode) => {
            let text = payload_text(payload)
                .map_err(|e| DecodeError::malformed_event(kind, e.to_string()))?;
            init_gstreamer()?;
            let structure = gst::Structure::from_str(text)
                .map_err(|e| DecodeError::malformed_event(kind, format!("{e}: {text:?}")))?;
            decode(&structure).map_err(|message| DecodeError::malformed_event(kind, message))?
        }
    };

    Ok(EventRecord {
        timestamp: clock_time(header.timestamp),
        kind,
        body,
    })
}

fn field<'s>(s: &'s gst::StructureRef, name: &str) -> FieldResult<&'s glib::SendValue> {
    s.value(name).map_err(|_| format!("missing field '{name}'"))
}

fn invalid(name: &str, value: &glib::Value) -> String {
    format!("invalid value {value:?} for field '{name}'")
}

fn as_i64(value: &glib::Value) -> Option<i64> {
    value
        .get::<i64>()
        .ok()
        .or_else(|| value.get::<i32>().ok().map(i64::from))
        .or_else(|| value.get::<u32>().ok().map(i64::from))
        .or_else(|| value.get::<u64>().ok().and_then(|v| i64::try_from(v).ok()))
}

fn as_u64(value: &glib::Value) -> Option<u64> {
    value
        .get::<u64>()
        .ok()
        .or_else(|| value.get::<u32>().ok().map(u64::from))
        .or_else(|| value.get::<i64>().ok().and_then(|v| u64::try_from(v).ok()))
        .or_else(|| value.get::<i32>().ok().and_then(|v| u64::try_from(v).ok()))
}

fn get_u64(s: &gst::StructureRef, name: &str) -> FieldResult<u64> {
    let value = field(s, name)?;
    as_u64(value).ok_or_else(|| invalid(name, value))
}

fn get_i64(s: &gst::StructureRef, name: &str) -> FieldResult<i64> {
    let value = field(s, name)?;
    as_i64(value).ok_or_else(|| invalid(name, value))
}

fn get_f64(s: &gst::StructureRef, name: &str) -> FieldResult<f64> {
    let value = field(s, name)?;
    value
        .get::<f64>()
        .ok()
        .or_else(|| as_i64(value).map(|v| v as f64))
        .ok_or_else(|| invalid(name, value))
}

fn get_bool(s: &gst::StructureRef, name: &str) -> FieldResult<bool> {
    let value = field(s, name)?;
    value.get::<bool>().map_err(|_| invalid(name, value))
}

fn get_string(s: &gst::StructureRef, name: &str) -> FieldResult<String> {
    let value = field(s, name)?;
    value.get::<String>().map_err(|_| invalid(name, value))
}

fn get_enum<E>(s: &gst::StructureRef, name: &str) -> FieldResult<E>
where
    E: StaticType + for<'a> FromValue<'a>,
{
    let value = field(s, name)?;
    value
        .get::<E>()
        .ok()
        .or_else(|| value.get::<&str>().ok().and_then(parse_enum::<E>))
        .or_else(|| as_i64(value).and_then(enum_from_int::<E>))
        .ok_or_else(|| invalid(name, value))
}

fn get_flags<F>(s: &gst::StructureRef, name: &str) -> FieldResult<F>
where
    F: StaticType + for<'a> FromValue<'a> + bitflags::Flags<Bits = u32>,
{
    let value = field(s, name)?;
    value
        .get::<F>()
        .ok()
        .or_else(|| value.get::<&str>().ok().and_then(parse_flags::<F>))
        .or_else(|| {
            as_i64(value)
                .and_then(|v| u32::try_from(v).ok())
                .map(F::from_bits_retain)
        })
        .ok_or_else(|| invalid(name, value))
}

/// A nested structure, held either typed or as its serialized text.
fn get_structure(s: &gst::StructureRef, name: &str) -> FieldResult<gst::Structure> {
    let value = field(s, name)?;
    if let Ok(structure) = value.get::<gst::Structure>() {
        return Ok(structure);
    }
    let text = value.get::<&str>().map_err(|_| invalid(name, value))?;
    gst::Structure::from_str(text).map_err(|e| format!("invalid {name}: {e}"))
}

fn decode_flush_stop(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::FlushStop {
        reset_time: get_bool(s, "reset-time")?,
    })
}

fn decode_gap(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::Gap {
        timestamp: get_u64(s, "timestamp")?,
        duration: get_u64(s, "duration")?,
    })
}

fn decode_stream_start(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::StreamStart {
        stream_id: get_string(s, "stream-id")?,
    })
}

/// Positions keep their raw 64-bit value; `-1` becomes the sentinel.
fn raw_position(value: gst::GenericFormattedValue) -> u64 {
    value.value() as u64
}

fn decode_segment(s: &gst::StructureRef) -> FieldResult<EventBody> {
    if let Ok(segment) = s.get::<gst::Segment>("segment") {
        return Ok(EventBody::Segment(Segment {
            flags: segment.flags(),
            rate: segment.rate(),
            applied_rate: segment.applied_rate(),
            format: segment.format(),
            base: raw_position(segment.base()),
            offset: raw_position(segment.offset()),
            start: raw_position(segment.start()),
            stop: raw_position(segment.stop()),
            time: raw_position(segment.time()),
            position: raw_position(segment.position()),
            duration: raw_position(segment.duration()),
        }));
    }

    let segment = get_structure(s, "segment")?;
    Ok(EventBody::Segment(Segment {
        flags: get_flags(&segment, "flags")?,
        rate: get_f64(&segment, "rate")?,
        applied_rate: get_f64(&segment, "applied-rate")?,
        format: get_enum(&segment, "format")?,
        base: get_u64(&segment, "base")?,
        offset: get_u64(&segment, "offset")?,
        start: get_u64(&segment, "start")?,
        stop: get_u64(&segment, "stop")?,
        time: get_u64(&segment, "time")?,
        position: get_u64(&segment, "position")?,
        duration: get_u64(&segment, "duration")?,
    }))
}

fn decode_tag(s: &gst::StructureRef) -> FieldResult<EventBody> {
    let taglist = match s.get::<gst::TagList>("taglist") {
        Ok(tags) => tags.to_string(),
        Err(_) => get_string(s, "taglist")?,
    };
    Ok(EventBody::Tag { taglist })
}

fn decode_buffer_size(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::BufferSize {
        format: get_enum(s, "format")?,
        min_size: get_i64(s, "minsize")?,
        max_size: get_i64(s, "maxsize")?,
        is_async: get_bool(s, "async")?,
    })
}

fn decode_qos(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::Qos {
        qos_type: get_enum(s, "type")?,
        proportion: get_f64(s, "proportion")?,
        diff: get_i64(s, "diff")?,
        timestamp: get_u64(s, "timestamp")?,
    })
}

fn decode_seek(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::Seek {
        rate: get_f64(s, "rate")?,
        format: get_enum(s, "format")?,
        flags: get_flags(s, "flags")?,
        start_type: get_enum(s, "cur-type")?,
        start: get_i64(s, "cur")?,
        stop_type: get_enum(s, "stop-type")?,
        stop: get_i64(s, "stop")?,
    })
}

fn decode_latency(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::Latency {
        latency: get_u64(s, "latency")?,
    })
}

fn decode_step(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::Step {
        format: get_enum(s, "format")?,
        amount: get_u64(s, "amount")?,
        rate: get_f64(s, "rate")?,
        flush: get_bool(s, "flush")?,
        intermediate: get_bool(s, "intermediate")?,
    })
}

fn message_type_of(message: &gst::StructureRef) -> String {
    message
        .value("type")
        .ok()
        .and_then(|ty| {
            value_nick(ty).or_else(|| ty.get::<&str>().ok().and_then(message_type_name))
        })
        .unwrap_or_else(|| message.name().to_string())
}

/// The embedded message is either a structure, whose `type` field or name
/// identifies it, or an opaque token kept as is.
fn decode_sink_message(s: &gst::StructureRef) -> FieldResult<EventBody> {
    let value = field(s, "message")?;
    let message_type = if let Ok(message) = value.get::<gst::Structure>() {
        message_type_of(&message)
    } else {
        let text = value.get::<&str>().map_err(|_| invalid("message", value))?;
        match gst::Structure::from_str(text) {
            Ok(message) => message_type_of(&message),
            Err(_) => text.trim().to_string(),
        }
    };
    Ok(EventBody::SinkMessage { message_type })
}

fn decode_caps_event(s: &gst::StructureRef) -> FieldResult<EventBody> {
    let caps = match s.get::<gst::Caps>("caps") {
        Ok(caps) => caps.to_string(),
        Err(_) => get_string(s, "caps")?,
    };
    Ok(EventBody::Caps { caps })
}

fn decode_toc_select(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::TocSelect {
        uid: get_string(s, "uid")?,
    })
}

fn decode_segment_done(s: &gst::StructureRef) -> FieldResult<EventBody> {
    Ok(EventBody::SegmentDone {
        format: get_enum(s, "format")?,
        position: get_i64(s, "position")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdp_codec::{HeaderFlags, Version, EVENT_TYPE_BASE};

    fn type_code(kind: impl Into<EventKind>) -> u16 {
        u16::try_from(kind.into().code()).unwrap() + EVENT_TYPE_BASE
    }

    fn event(kind: impl Into<EventKind>, text: &str) -> DecodeResult<EventRecord> {
        let mut payload = text.as_bytes().to_vec();
        payload.push(0);
        let header = RawHeader {
            version: Version { major: 1, minor: 0 },
            flags: HeaderFlags::empty(),
            payload_type_code: type_code(kind),
            payload_length: payload.len() as u32,
            timestamp: 5_000,
            duration: u64::MAX,
            offset: u64::MAX,
            offset_end: u64::MAX,
            buffer_flags: 0,
            dts: u64::MAX,
            header_crc: 0,
            payload_crc: 0,
        };
        decode_event(&header, &payload)
    }

    fn body(kind: impl Into<EventKind>, text: &str) -> EventBody {
        event(kind, text).unwrap().body
    }

    #[test]
    fn table_covers_fourteen_kinds() {
        assert_eq!(EVENT_DECODERS.len(), 14);
        assert!(has_field_table(gst::EventType::Seek.into()));
        assert!(!has_field_table(gst::EventType::Eos.into()));
        assert!(!has_field_table(gst::EventType::FlushStart.into()));
    }

    #[test]
    fn bare_kinds_ignore_payload() {
        let record = event(gst::EventType::Eos, "this is not a structure ((").unwrap();
        assert_eq!(record.kind, gst::EventType::Eos);
        assert_eq!(record.body, EventBody::Bare);
        assert_eq!(record.timestamp, Some(5_000));

        let record = event(EventKind::from_code(999), "").unwrap();
        assert_eq!(record.body, EventBody::Bare);
    }

    #[test]
    fn flush_stop() {
        assert_eq!(
            body(
                gst::EventType::FlushStop,
                "GstEventFlushStop, reset-time=(boolean)true;"
            ),
            EventBody::FlushStop { reset_time: true }
        );
    }

    #[test]
    fn gap() {
        assert_eq!(
            body(
                gst::EventType::Gap,
                "GstEventGap, timestamp=(guint64)1000, duration=(guint64)18446744073709551615;"
            ),
            EventBody::Gap {
                timestamp: 1000,
                duration: u64::MAX
            }
        );
    }

    #[test]
    fn stream_start() {
        assert_eq!(
            body(
                gst::EventType::StreamStart,
                "GstEventStreamStart, stream-id=(string)\"abc/video_0\", flags=(GstStreamFlags)GST_STREAM_FLAG_NONE, group-id=(uint)1;"
            ),
            EventBody::StreamStart {
                stream_id: "abc/video_0".into()
            }
        );
    }

    #[test]
    fn segment() {
        let text = "GstEventSegment, segment=(GstSegment)\"segment\\,\\ flags\\=(GstSegmentFlags)GST_SEGMENT_FLAG_RESET+GST_SEGMENT_FLAG_SKIP\\,\\ rate\\=(double)1\\,\\ applied-rate\\=(double)1\\,\\ format\\=(GstFormat)time\\,\\ base\\=(guint64)0\\,\\ offset\\=(guint64)0\\,\\ start\\=(guint64)0\\,\\ stop\\=(guint64)1000000000\\,\\ time\\=(guint64)0\\,\\ position\\=(guint64)0\\,\\ duration\\=(guint64)18446744073709551615\\;\";";
        match body(gst::EventType::Segment, text) {
            EventBody::Segment(segment) => {
                assert_eq!(segment.flags, SegmentFlags::RESET | SegmentFlags::SKIP);
                assert_eq!(segment.rate, 1.0);
                assert_eq!(segment.applied_rate, 1.0);
                assert_eq!(segment.format, Format::Time);
                assert_eq!(segment.start, 0);
                assert_eq!(segment.stop, 1_000_000_000);
                assert_eq!(segment.duration, u64::MAX);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn segment_from_untyped_structure_text() {
        let text = "GstEventSegment, segment=(string)\"segment, flags=reset, rate=(double)0.5, applied-rate=(double)1, format=time, base=(guint64)0, offset=(guint64)0, start=(guint64)10, stop=(guint64)20, time=(guint64)0, position=(guint64)10, duration=(guint64)18446744073709551615;\";";
        match body(gst::EventType::Segment, text) {
            EventBody::Segment(segment) => {
                assert_eq!(segment.flags, SegmentFlags::RESET);
                assert_eq!(segment.rate, 0.5);
                assert_eq!(segment.format, Format::Time);
                assert_eq!((segment.start, segment.stop), (10, 20));
                assert_eq!(segment.duration, u64::MAX);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn segment_missing_nested_field() {
        let text = "GstEventSegment, segment=(string)\"segment, rate=(double)1;\";";
        let err = event(gst::EventType::Segment, text).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedEvent { ref message, .. } if message.contains("flags")
        ));

        let text = "GstEventSegment, segment=(GstSegment)\"segment\\,\\ rate\\=(double)1\\;\";";
        assert!(matches!(
            event(gst::EventType::Segment, text),
            Err(DecodeError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn buffer_size() {
        assert_eq!(
            body(
                gst::EventType::Buffersize,
                "GstEventBufferSize, format=(GstFormat)GST_FORMAT_BYTES, minsize=(gint64)1024, maxsize=(gint64)-1, async=(boolean)false;"
            ),
            EventBody::BufferSize {
                format: Format::Bytes,
                min_size: 1024,
                max_size: -1,
                is_async: false
            }
        );
    }

    #[test]
    fn qos_extracts_all_fields() {
        assert_eq!(
            body(
                gst::EventType::Qos,
                "GstEventQOS, type=(GstQOSType)GST_QOS_TYPE_UNDERFLOW, proportion=(double)0.75, diff=(gint64)-2500, timestamp=(guint64)40000000;"
            ),
            EventBody::Qos {
                qos_type: QOSType::Underflow,
                proportion: 0.75,
                diff: -2500,
                timestamp: 40_000_000
            }
        );
    }

    #[test]
    fn seek() {
        assert_eq!(
            body(
                gst::EventType::Seek,
                "GstEventSeek, rate=(double)2, format=(GstFormat)time, flags=(GstSeekFlags)GST_SEEK_FLAG_FLUSH+GST_SEEK_FLAG_KEY_UNIT, cur-type=(GstSeekType)GST_SEEK_TYPE_SET, cur=(gint64)5000000000, stop-type=(GstSeekType)GST_SEEK_TYPE_NONE, stop=(gint64)-1;"
            ),
            EventBody::Seek {
                rate: 2.0,
                format: Format::Time,
                flags: SeekFlags::FLUSH | SeekFlags::KEY_UNIT,
                start_type: SeekType::Set,
                start: 5_000_000_000,
                stop_type: SeekType::None,
                stop: -1
            }
        );
    }

    #[test]
    fn seek_with_numeric_enums() {
        match body(
            gst::EventType::Seek,
            "GstEventSeek, rate=1.0, format=3, flags=0, cur-type=1, cur=0, stop-type=0, stop=-1",
        ) {
            EventBody::Seek { format, flags, .. } => {
                assert_eq!(format, Format::Time);
                assert!(flags.is_empty());
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn latency_and_step() {
        assert_eq!(
            body(gst::EventType::Latency, "GstEventLatency, latency=(guint64)20000000;"),
            EventBody::Latency {
                latency: 20_000_000
            }
        );
        assert_eq!(
            body(
                gst::EventType::Step,
                "GstEventStep, format=(GstFormat)GST_FORMAT_BUFFERS, amount=(guint64)1, rate=(double)1, flush=(boolean)true, intermediate=(boolean)false;"
            ),
            EventBody::Step {
                format: Format::Buffers,
                amount: 1,
                rate: 1.0,
                flush: true,
                intermediate: false
            }
        );
    }

    #[test]
    fn sink_message_variants() {
        assert_eq!(
            body(
                gst::EventType::SinkMessage,
                "GstEventSinkMessage, message=(GstStructure)\"GstMessageEOS\\,\\ type\\=(GstMessageType)GST_MESSAGE_EOS\\;\";"
            ),
            EventBody::SinkMessage {
                message_type: "eos".into()
            }
        );
        assert_eq!(
            body(
                gst::EventType::SinkMessage,
                "GstEventSinkMessage, message=(GstStructure)\"GstMessageElement\\;\";"
            ),
            EventBody::SinkMessage {
                message_type: "GstMessageElement".into()
            }
        );
        assert_eq!(
            body(
                gst::EventType::SinkMessage,
                "GstEventSinkMessage, message=(string)\"GstMessageError, type=(string)GST_MESSAGE_ERROR;\";"
            ),
            EventBody::SinkMessage {
                message_type: "error".into()
            }
        );
    }

    #[test]
    fn caps_tag_toc_select_segment_done() {
        assert_eq!(
            body(
                gst::EventType::Caps,
                "GstEventCaps, caps=(GstCaps)\"audio/x-raw\\,\\ rate\\=(int)48000\";"
            ),
            EventBody::Caps {
                caps: "audio/x-raw, rate=(int)48000".into()
            }
        );
        match body(
            gst::EventType::Tag,
            "GstEventTag, taglist=(taglist)\"taglist\\,\\ title\\=(string)Intro\\;\";",
        ) {
            EventBody::Tag { taglist } => assert!(taglist.contains("title=(string)Intro")),
            other => panic!("unexpected body {other:?}"),
        }
        assert_eq!(
            body(gst::EventType::TocSelect, "GstEventTocSelect, uid=(string)chapter-1;"),
            EventBody::TocSelect {
                uid: "chapter-1".into()
            }
        );
        assert_eq!(
            body(
                gst::EventType::SegmentDone,
                "GstEventSegmentDone, format=(GstFormat)GST_FORMAT_TIME, position=(gint64)90000;"
            ),
            EventBody::SegmentDone {
                format: Format::Time,
                position: 90_000
            }
        );
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = event(gst::EventType::Latency, "GstEventLatency;").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedEvent {
                kind: gst::EventType::Latency.into(),
                message: "missing field 'latency'".into()
            }
        );
    }

    #[test]
    fn unparseable_payload_is_malformed() {
        assert!(matches!(
            event(gst::EventType::FlushStop, "GstEventFlushStop, reset-time=(boolean)maybe;"),
            Err(DecodeError::MalformedEvent { .. })
        ));
        assert!(matches!(
            event(gst::EventType::Gap, ""),
            Err(DecodeError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn sentinel_timestamp_is_none() {
        let mut payload = b"GstEventEos;".to_vec();
        payload.push(0);
        let header = RawHeader {
            version: Version { major: 1, minor: 0 },
            flags: HeaderFlags::empty(),
            payload_type_code: type_code(gst::EventType::Eos),
            payload_length: payload.len() as u32,
            timestamp: u64::MAX,
            duration: u64::MAX,
            offset: u64::MAX,
            offset_end: u64::MAX,
            buffer_flags: 0,
            dts: u64::MAX,
            header_crc: 0,
            payload_crc: 0,
        };
        assert_eq!(decode_event(&header, &payload).unwrap().timestamp, None);
    }
}
