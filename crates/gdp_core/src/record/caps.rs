//! Caps records.

use std::str::FromStr;

use gdp_codec::{gst, payload_text, PayloadType, RawHeader};

use super::init_gstreamer;
use crate::error::{DecodeError, DecodeResult};

/// Caps string shown for an empty caps payload.
pub const EMPTY_CAPS: &str = "EMPTY";

/// A decoded caps record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapsRecord {
    /// The caps string, as GStreamer serializes the parsed caps.
    pub caps: String,
    /// Media type of each caps structure, in order.
    pub media_types: Vec<String>,
}

/// Decode a caps payload.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedCaps`] if the header is not a caps
/// header or GStreamer rejects the text.
pub fn decode_caps(header: &RawHeader, payload: &[u8]) -> DecodeResult<CapsRecord> {
    if header.payload_type() != Some(PayloadType::Caps) {
        return Err(DecodeError::malformed_caps(format!(
            "payload type {} is not caps",
            header.payload_type_code
        )));
    }

    let text = payload_text(payload).map_err(|e| DecodeError::malformed_caps(e.to_string()))?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(CapsRecord {
            caps: EMPTY_CAPS.to_string(),
            media_types: Vec::new(),
        });
    }

    init_gstreamer()?;
    let caps = gst::Caps::from_str(text)
        .map_err(|e| DecodeError::malformed_caps(format!("{e}: {text:?}")))?;

    Ok(CapsRecord {
        caps: caps.to_string(),
        media_types: caps.iter().map(|s| s.name().to_string()).collect(),
    })
}
