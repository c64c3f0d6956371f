//! Event payload fixtures and sample streams.
//!
//! The payload texts follow what GStreamer 1.x serializes for each event
//! kind, including nested structures quoted and escaped as strings.

use std::fs;
use std::path::Path;

use gdp_codec::gst;
use tempfile::TempDir;

use crate::packet::PacketBuilder;

/// One second in nanoseconds.
pub const SECOND: u64 = 1_000_000_000;

/// Quotes `text` as a GstStructure string value.
///
/// Every ASCII byte outside `[A-Za-z0-9_+-/:.]` is backslash-escaped.
pub fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() * 2 + 2);
    quoted.push('"');
    for c in text.chars() {
        if c.is_ascii() && !(c.is_ascii_alphanumeric() || "_-+/:.".contains(c)) {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Text of a `GstSegment` structure.
pub fn segment_structure(flags: &str, rate: f64, format: &str, start: u64, stop: u64) -> String {
    format!(
        "segment, flags=(GstSegmentFlags){flags}, rate=(double){rate}, applied-rate=(double)1, \
         format=(GstFormat){format}, base=(guint64)0, offset=(guint64)0, start=(guint64){start}, \
         stop=(guint64){stop}, time=(guint64){start}, position=(guint64){start}, \
         duration=(guint64)18446744073709551615;"
    )
}

/// A stream-start event.
pub fn stream_start_event(stream_id: &str) -> PacketBuilder {
    PacketBuilder::event(
        gst::EventType::StreamStart,
        &format!(
            "GstEventStreamStart, stream-id=(string){}, flags=(GstStreamFlags)GST_STREAM_FLAG_NONE, group-id=(uint)1;",
            quote_string(stream_id)
        ),
    )
}

/// A caps event.
pub fn caps_event(caps: &str) -> PacketBuilder {
    PacketBuilder::event(
        gst::EventType::Caps,
        &format!("GstEventCaps, caps=(GstCaps){};", quote_string(caps)),
    )
}

/// A segment event.
pub fn segment_event(flags: &str, rate: f64, format: &str, start: u64, stop: u64) -> PacketBuilder {
    let segment = segment_structure(flags, rate, format, start, stop);
    PacketBuilder::event(
        gst::EventType::Segment,
        &format!(
            "GstEventSegment, segment=(GstSegment){};",
            quote_string(&segment)
        ),
    )
}

/// A time segment from `start` to `stop` with the reset flag.
pub fn time_segment_event(start: u64, stop: u64) -> PacketBuilder {
    segment_event("GST_SEGMENT_FLAG_RESET", 1.0, "GST_FORMAT_TIME", start, stop)
}

/// A tag event.
pub fn tag_event(taglist: &str) -> PacketBuilder {
    PacketBuilder::event(
        gst::EventType::Tag,
        &format!(
            "GstEventTag, taglist=(GstTagList){}, scope=(GstTagScope)GST_TAG_SCOPE_STREAM;",
            quote_string(taglist)
        ),
    )
}

/// A flush-stop event.
pub fn flush_stop_event(reset_time: bool) -> PacketBuilder {
    PacketBuilder::event(
        gst::EventType::FlushStop,
        &format!("GstEventFlushStop, reset-time=(boolean){reset_time};"),
    )
}

/// A gap event.
pub fn gap_event(timestamp: u64, duration: u64) -> PacketBuilder {
    PacketBuilder::event(
        gst::EventType::Gap,
        &format!("GstEventGap, timestamp=(guint64){timestamp}, duration=(guint64){duration};"),
    )
    .timestamp(timestamp)
}

/// A QoS event.
pub fn qos_event(qos_type: &str, proportion: f64, diff: i64, timestamp: u64) -> PacketBuilder {
    PacketBuilder::event(
        gst::EventType::Qos,
        &format!(
            "GstEventQOS, type=(GstQOSType){qos_type}, proportion=(double){proportion}, \
             diff=(gint64){diff}, timestamp=(guint64){timestamp};"
        ),
    )
}

/// A seek event.
pub fn seek_event(rate: f64, flags: &str, start: i64, stop: i64) -> PacketBuilder {
    PacketBuilder::event(
        gst::EventType::Seek,
        &format!(
            "GstEventSeek, rate=(double){rate}, format=(GstFormat)GST_FORMAT_TIME, \
             flags=(GstSeekFlags){flags}, cur-type=(GstSeekType)GST_SEEK_TYPE_SET, \
             cur=(gint64){start}, stop-type=(GstSeekType)GST_SEEK_TYPE_SET, stop=(gint64){stop};"
        ),
    )
}

/// A latency event.
pub fn latency_event(latency: u64) -> PacketBuilder {
    PacketBuilder::event(
        gst::EventType::Latency,
        &format!("GstEventLatency, latency=(guint64){latency};"),
    )
}

/// A sink-message event wrapping the structure text of a message.
pub fn sink_message_event(message: &str) -> PacketBuilder {
    PacketBuilder::event(
        gst::EventType::SinkMessage,
        &format!(
            "GstEventSinkMessage, message=(GstStructure){};",
            quote_string(message)
        ),
    )
}

/// An end-of-stream event.
pub fn eos_event() -> PacketBuilder {
    PacketBuilder::event(gst::EventType::Eos, "GstEventEos;")
}

/// Caps used by [`sample_packets`].
pub const SAMPLE_CAPS: &str =
    "audio/x-raw, format=(string)S16LE, layout=(string)interleaved, rate=(int)44100, channels=(int)2";

/// Packets of a typical audio capture with `buffers` buffers.
///
/// The stream holds stream-start, caps, caps event and segment before the
/// buffers, and ends with EOS: `buffers + 5` packets in total.
pub fn sample_packets(buffers: usize) -> Vec<Vec<u8>> {
    let frame = SECOND / 50;
    let mut packets = vec![
        stream_start_event("8a3f/audio").build(),
        PacketBuilder::caps(SAMPLE_CAPS).build(),
        caps_event(SAMPLE_CAPS).build(),
        time_segment_event(0, frame * buffers as u64).build(),
    ];
    for i in 0..buffers as u64 {
        let data: Vec<u8> = (0..64).map(|b| (b as u64 ^ i) as u8).collect();
        packets.push(
            PacketBuilder::buffer(data)
                .timestamp(i * frame)
                .duration(frame)
                .offset(i * 64)
                .offset_end((i + 1) * 64)
                .payload_crc(true)
                .build(),
        );
    }
    packets.push(eos_event().timestamp(frame * buffers as u64).build());
    packets
}

/// A GDP file in a temporary directory, removed on drop.
pub struct TempGdpFile {
    dir: TempDir,
}

impl TempGdpFile {
    const FILE_NAME: &'static str = "stream.gdp";

    /// Writes `bytes` to a new temporary file.
    pub fn new(bytes: &[u8]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(dir.path().join(Self::FILE_NAME), bytes).expect("Failed to write GDP file");
        Self { dir }
    }

    /// Path of the file.
    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join(Self::FILE_NAME)
    }

    /// Directory holding the file.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
