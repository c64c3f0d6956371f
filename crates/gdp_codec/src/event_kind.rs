//! GStreamer event types carried by GDP event packets.
//!
//! Event packets store `EVENT_TYPE_BASE + event type` in the payload type
//! field, where the event type is GStreamer's packed `GstEventType` value.
//! Names and direction flags come from the registered `GstEventType` enum.

use gst::glib;
use gst::glib::translate::IntoGlib;
use gst::prelude::*;
use gstreamer as gst;

/// Name reported for codes that are not a GStreamer event type.
pub const UNKNOWN_EVENT_NAME: &str = "unknown";

/// The event type of a GDP event packet.
///
/// Wraps the packed code so that unrecognised codes survive decoding;
/// [`EventKind::event_type`] resolves it against GStreamer's own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(u32);

impl EventKind {
    /// Wraps a packed GStreamer event type code.
    pub const fn from_code(code: u32) -> Self {
        Self(code)
    }

    /// The packed GStreamer event type code.
    pub const fn code(self) -> u32 {
        self.0
    }

    /// The GStreamer event type, or `None` for an unrecognised code.
    pub fn event_type(self) -> Option<gst::EventType> {
        let code = i32::try_from(self.0).ok()?;
        glib::EnumClass::with_type(gst::EventType::static_type())?
            .to_value(code)?
            .get::<gst::EventType>()
            .ok()
    }

    /// Whether the code names a GStreamer event type.
    pub fn is_known(self) -> bool {
        self.event_type().is_some()
    }

    /// The GStreamer event name, e.g. `"flush-stop"`.
    ///
    /// Unrecognised codes report `"unknown"`, as GStreamer does.
    pub fn name(self) -> String {
        i32::try_from(self.0)
            .ok()
            .and_then(|code| {
                let class = glib::EnumClass::with_type(gst::EventType::static_type())?;
                class.value(code).map(|value| value.nick().to_string())
            })
            .unwrap_or_else(|| UNKNOWN_EVENT_NAME.to_string())
    }

    /// Whether the event travels upstream.
    pub fn is_upstream(self) -> bool {
        self.event_type().is_some_and(|ty| ty.is_upstream())
    }

    /// Whether the event travels downstream.
    pub fn is_downstream(self) -> bool {
        self.event_type().is_some_and(|ty| ty.is_downstream())
    }

    /// Whether the event is serialized with the data flow.
    pub fn is_serialized(self) -> bool {
        self.event_type().is_some_and(|ty| ty.is_serialized())
    }
}

impl From<gst::EventType> for EventKind {
    fn from(ty: gst::EventType) -> Self {
        Self(ty.into_glib() as u32)
    }
}

impl PartialEq<gst::EventType> for EventKind {
    fn eq(&self, other: &gst::EventType) -> bool {
        *self == EventKind::from(*other)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_codes() {
        gst::init().unwrap();
        assert_eq!(EventKind::from(gst::EventType::FlushStart).code(), 2563);
        assert_eq!(EventKind::from(gst::EventType::FlushStop).code(), 5127);
        assert_eq!(EventKind::from(gst::EventType::Segment).code(), 17934);
        assert_eq!(EventKind::from(gst::EventType::Eos).code(), 28174);
        assert_eq!(EventKind::from(gst::EventType::Seek).code(), 51201);
    }

    #[test]
    fn resolves_known_codes() {
        gst::init().unwrap();
        assert_eq!(
            EventKind::from_code(28174).event_type(),
            Some(gst::EventType::Eos)
        );
        assert_eq!(EventKind::from_code(48641), gst::EventType::Qos);
        assert!(EventKind::from_code(0).is_known());
    }

    #[test]
    fn unrecognised_code() {
        gst::init().unwrap();
        let kind = EventKind::from_code(12345);
        assert_eq!(kind.event_type(), None);
        assert_eq!(kind.code(), 12345);
        assert_eq!(kind.name(), "unknown");
        assert!(!kind.is_upstream());
    }

    #[test]
    fn direction_flags() {
        gst::init().unwrap();
        let seek = EventKind::from(gst::EventType::Seek);
        assert!(seek.is_upstream());
        assert!(!seek.is_downstream());
        let flush_stop = EventKind::from(gst::EventType::FlushStop);
        assert!(flush_stop.is_upstream());
        assert!(flush_stop.is_serialized());
        assert!(EventKind::from(gst::EventType::Segment).is_downstream());
    }

    #[test]
    fn display_uses_gstreamer_name() {
        gst::init().unwrap();
        assert_eq!(EventKind::from(gst::EventType::Buffersize).to_string(), "buffersize");
        assert_eq!(
            EventKind::from(gst::EventType::SinkMessage).to_string(),
            "sink-message"
        );
    }
}
