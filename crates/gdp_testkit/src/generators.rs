//! Property-based test generators using proptest.
//!
//! Strategies produce well-formed packets; tests corrupt them as needed.

use gdp_codec::CLOCK_TIME_NONE;
use proptest::prelude::*;

use crate::fixtures::{
    caps_event, eos_event, flush_stop_event, gap_event, latency_event, qos_event, seek_event,
    stream_start_event, time_segment_event, SECOND,
};
use crate::packet::PacketBuilder;

/// Strategy for clock times, including the "not set" sentinel.
pub fn clock_time_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(CLOCK_TIME_NONE),
        4 => 0u64..3_600 * SECOND,
    ]
}

/// Strategy for buffer payloads.
pub fn buffer_data_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

/// Strategy for caps strings.
pub fn caps_text_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["audio/x-raw", "video/x-raw", "video/x-h264", "audio/mpeg"]),
        1i32..192_000,
        1i32..8,
    )
        .prop_map(|(media_type, rate, channels)| {
            format!("{media_type}, rate=(int){rate}, channels=(int){channels}")
        })
}

/// Strategy for buffer packets.
pub fn buffer_packet_strategy() -> impl Strategy<Value = PacketBuilder> {
    (
        buffer_data_strategy(),
        clock_time_strategy(),
        clock_time_strategy(),
        clock_time_strategy(),
        any::<u16>(),
        any::<bool>(),
    )
        .prop_map(|(data, pts, dts, duration, flags, payload_crc)| {
            PacketBuilder::buffer(data)
                .timestamp(pts)
                .dts(dts)
                .duration(duration)
                .buffer_flags(flags)
                .payload_crc(payload_crc)
        })
}

/// Strategy for caps packets.
pub fn caps_packet_strategy() -> impl Strategy<Value = PacketBuilder> {
    caps_text_strategy().prop_map(|caps| PacketBuilder::caps(&caps))
}

/// Strategy for event packets of the common kinds.
pub fn event_packet_strategy() -> impl Strategy<Value = PacketBuilder> {
    prop_oneof![
        "[a-z0-9/]{1,24}".prop_map(|id| stream_start_event(&id)),
        caps_text_strategy().prop_map(|caps| caps_event(&caps)),
        (0u64..SECOND, SECOND..10 * SECOND)
            .prop_map(|(start, stop)| time_segment_event(start, stop)),
        any::<bool>().prop_map(flush_stop_event),
        (0u64..SECOND, 0u64..SECOND).prop_map(|(ts, duration)| gap_event(ts, duration)),
        (0.0f64..2.0, any::<i32>(), 0u64..SECOND).prop_map(|(proportion, diff, ts)| {
            qos_event("GST_QOS_TYPE_THROTTLE", proportion, i64::from(diff), ts)
        }),
        (0i64..1_000, 1_000i64..2_000)
            .prop_map(|(start, stop)| seek_event(1.0, "GST_SEEK_FLAG_FLUSH", start, stop)),
        (0u64..SECOND).prop_map(latency_event),
        Just(eos_event()),
    ]
}

/// Strategy for any well-formed packet.
pub fn packet_strategy() -> impl Strategy<Value = PacketBuilder> {
    prop_oneof![
        3 => buffer_packet_strategy(),
        1 => caps_packet_strategy(),
        2 => event_packet_strategy(),
    ]
}

/// Strategy for a sequence of well-formed packets.
pub fn packet_sequence_strategy(
    min_packets: usize,
    max_packets: usize,
) -> impl Strategy<Value = Vec<PacketBuilder>> {
    prop::collection::vec(packet_strategy(), min_packets..max_packets)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
