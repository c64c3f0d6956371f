//! Benchmark utilities.

use gdp_testkit::{
    concat_packets, qos_event, sample_packets, time_segment_event, PacketBuilder, SECOND,
};
use rand::Rng;

/// Generate random buffer data of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// A stream of `count` buffers with `payload_size` random bytes each.
pub fn buffer_stream(count: usize, payload_size: usize, payload_crc: bool) -> Vec<u8> {
    concat_packets((0..count as u64).map(|i| {
        PacketBuilder::buffer(random_data(payload_size))
            .timestamp(i * SECOND / 30)
            .duration(SECOND / 30)
            .payload_crc(payload_crc)
            .build()
    }))
}

/// A stream of `count` events cycling through segment and QoS events.
pub fn event_stream(count: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    concat_packets((0..count).map(|i| {
        if i % 2 == 0 {
            time_segment_event(0, rng.gen_range(1..100) * SECOND).build()
        } else {
            qos_event(
                "GST_QOS_TYPE_OVERFLOW",
                rng.gen_range(0.0..2.0),
                rng.gen_range(-1_000_000..1_000_000),
                rng.gen_range(0..100) * SECOND,
            )
            .build()
        }
    }))
}

/// A realistic capture with `buffers` buffers.
pub fn capture_stream(buffers: usize) -> Vec<u8> {
    concat_packets(sample_packets(buffers))
}
