//! Command tests over files on disk.

use gdp_cli::commands::dump::{self, DumpOptions, OutputFormat};
use gdp_cli::commands::verify;
use gdp_core::FailureKind;
use gdp_testkit::prelude::*;

#[test]
fn dump_sample_stream() {
    let file = TempGdpFile::new(&concat_packets(sample_packets(2)));
    let (output, failure) = dump::collect(&file.path(), &DumpOptions::default()).unwrap();

    assert!(failure.is_none());
    assert_eq!(output.status, "completed");
    assert_eq!(output.records.len(), 7);
    assert_eq!(output.records[0].title, "Event stream-start");
    assert_eq!(output.records[1].title, "Caps");
    assert!(output.records[4].field("data").is_none());

    let mut text = Vec::new();
    dump::write_text(&mut text, &output).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.starts_with("[00000000] Event stream-start\n"));
    assert!(text.trim_end().ends_with("7 records, completed"));
}

#[test]
fn dump_limit_cancels() {
    let file = TempGdpFile::new(&concat_packets(sample_packets(4)));
    let options = DumpOptions {
        limit: Some(3),
        format: OutputFormat::Json,
        data: true,
    };
    let (output, failure) = dump::collect(&file.path(), &options).unwrap();
    assert!(failure.is_none());
    assert_eq!(output.records.len(), 3);
    assert_eq!(output.status, "cancelled");

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["records"].as_array().unwrap().len(), 3);
    assert!(json.get("error").is_none());
}

#[test]
fn dump_limit_zero() {
    let file = TempGdpFile::new(&concat_packets(sample_packets(1)));
    let options = DumpOptions {
        limit: Some(0),
        ..DumpOptions::default()
    };
    let (output, _) = dump::collect(&file.path(), &options).unwrap();
    assert!(output.records.is_empty());
    assert_eq!(output.status, "cancelled");
}

#[test]
fn dump_reports_failure_after_records() {
    let mut bytes = concat_packets(sample_packets(1));
    bytes.extend(PacketBuilder::raw(9, vec![0u8; 4]).build());
    let file = TempGdpFile::new(&bytes);

    let (output, failure) = dump::collect(&file.path(), &DumpOptions::default()).unwrap();
    assert_eq!(output.records.len(), 6);
    assert_eq!(output.status, "failed (unknown-payload-type)");
    assert!(output.error.as_deref().unwrap().contains("unknown payload type 9"));
    assert_eq!(failure.unwrap().source.kind(), FailureKind::UnknownPayloadType);
}

#[test]
fn dump_with_data_preview() {
    let file = TempGdpFile::new(&PacketBuilder::buffer(vec![1, 2, 3]).build());
    let options = DumpOptions {
        data: true,
        ..DumpOptions::default()
    };
    let (output, _) = dump::collect(&file.path(), &options).unwrap();
    assert_eq!(output.records[0].field("data"), Some("01 02 03"));
}

#[test]
fn verify_counts_record_types() {
    let packets = sample_packets(3);
    let total: u64 = packets.iter().map(|p| p.len() as u64).sum();
    let file = TempGdpFile::new(&concat_packets(packets));

    let result = verify::check(&file.path()).unwrap();
    assert_eq!(result.records, 8);
    assert_eq!(result.buffers, 3);
    assert_eq!(result.caps, 1);
    assert_eq!(result.events, 4);
    assert_eq!(result.bytes, total);
}

#[test]
fn verify_fails_on_corruption() {
    let mut bytes = PacketBuilder::caps("ANY").build();
    bytes.extend(PacketBuilder::buffer(vec![0u8; 8]).payload_crc(true).corrupt_payload_crc().build());
    let file = TempGdpFile::new(&bytes);

    let (partial, failure) = verify::check(&file.path()).unwrap_err();
    assert_eq!(partial.records, 1);
    assert_eq!(failure.source.kind(), FailureKind::IntegrityCheckFailed);
}

#[test]
fn verify_summary_leaves_failure_to_caller() {
    let file = TempGdpFile::new(&PacketBuilder::raw(9, vec![0u8; 4]).build());
    let (result, failure) = verify::check(&file.path()).unwrap_err();

    let mut text = Vec::new();
    verify::write_summary(&mut text, &result, false).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.trim_end().ends_with("✗ Stream verification failed"));
    assert!(!text.contains(&failure.source.to_string()));
    assert!(failure.to_string().contains("unknown payload type 9"));
}

#[test]
fn dump_text_leaves_failure_to_caller() {
    let mut bytes = PacketBuilder::caps("ANY").build();
    bytes.extend(PacketBuilder::raw(9, vec![0u8; 4]).build());
    let file = TempGdpFile::new(&bytes);
    let (output, failure) = dump::collect(&file.path(), &DumpOptions::default()).unwrap();

    let mut text = Vec::new();
    dump::write_text(&mut text, &output).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.trim_end().ends_with("1 records, failed (unknown-payload-type)"));
    assert!(!text.contains(&failure.unwrap().source.to_string()));
}

#[test]
fn verify_missing_file() {
    let file = TempGdpFile::new(b"");
    let (_, failure) = verify::check(&file.dir().join("nope.gdp")).unwrap_err();
    assert_eq!(failure.source.kind(), FailureKind::Source);
}
