//! Shared parse and format helpers for GStreamer enums and flags.
//!
//! The enum and flag types themselves are GStreamer's. Their value names
//! (`GST_FORMAT_TIME`), nicks (`time`) and numbers come from the GLib type
//! classes GStreamer registers, so every helper here works for any
//! registered enum or flags type. Flag values are tokens joined with `+`.

use gdp_codec::gst;
use gst::glib;
use gst::glib::translate::IntoGlib;
use gst::glib::value::FromValue;
use gst::prelude::*;

pub use gst::{BufferFlags, Format, QOSType, SeekFlags, SeekType, SegmentFlags};

/// Name reported for values missing from their type's table.
pub const UNKNOWN_VALUE: &str = "unknown";

/// Name reported for an empty flag set whose type has no zero value.
pub const NO_FLAGS: &str = "none";

const MESSAGE_TYPE_NAME: &str = "GstMessageType";

fn parse_integer(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Full value name of `value`, e.g. `GST_FORMAT_TIME`.
pub fn enum_name<E>(value: E) -> String
where
    E: StaticType + IntoGlib<GlibType = i32>,
{
    glib::EnumClass::with_type(E::static_type())
        .and_then(|class| class.value(value.into_glib()).map(|v| v.name().to_string()))
        .unwrap_or_else(|| UNKNOWN_VALUE.to_string())
}

/// Resolve a value name, nick or integer.
pub fn parse_enum<E>(text: &str) -> Option<E>
where
    E: StaticType + for<'a> FromValue<'a>,
{
    let class = glib::EnumClass::with_type(E::static_type())?;
    let text = text.trim();
    let value = class
        .to_value_by_name(text)
        .or_else(|| class.to_value_by_nick(text))
        .or_else(|| {
            parse_integer(text)
                .and_then(|n| i32::try_from(n).ok())
                .and_then(|n| class.to_value(n))
        })?;
    value.get::<E>().ok()
}

/// Enum value for an integer, if the type knows it.
pub fn enum_from_int<E>(value: i64) -> Option<E>
where
    E: StaticType + for<'a> FromValue<'a>,
{
    let value = i32::try_from(value).ok()?;
    glib::EnumClass::with_type(E::static_type())?
        .to_value(value)?
        .get::<E>()
        .ok()
}

/// Resolve `+`-joined flag tokens. Numeric tokens keep unknown bits.
pub fn parse_flags<F>(text: &str) -> Option<F>
where
    F: StaticType + bitflags::Flags<Bits = u32>,
{
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let class = glib::FlagsClass::with_type(F::static_type())?;
    text.split('+')
        .try_fold(0u32, |bits, token| {
            let token = token.trim();
            class
                .value_by_name(token)
                .or_else(|| class.value_by_nick(token))
                .map(|v| v.value())
                .or_else(|| parse_integer(token))
                .map(|v| bits | v)
        })
        .map(F::from_bits_retain)
}

/// Format a flag set, see [`format_flag_bits`].
pub fn format_flags<F>(flags: &F) -> String
where
    F: StaticType + bitflags::Flags<Bits = u32>,
{
    format_flag_bits(F::static_type(), flags.bits())
}

/// Format flag bits of `type_` as a `, `-separated list of value names.
///
/// An empty set renders as the zero-valued name (e.g.
/// `GST_SEEK_FLAG_NONE`), or [`NO_FLAGS`] when the type has none. Bits
/// without a name are appended in hex. Aliases sharing a bit are named
/// once.
pub fn format_flag_bits(type_: glib::Type, bits: u32) -> String {
    let Some(class) = glib::FlagsClass::with_type(type_) else {
        return format!("0x{bits:x}");
    };

    if bits == 0 {
        return class
            .values()
            .iter()
            .find(|v| v.value() == 0)
            .map_or(NO_FLAGS, |v| v.name())
            .to_string();
    }

    let mut names = Vec::new();
    let mut remaining = bits;
    for v in class.values() {
        let value = v.value();
        if value != 0 && remaining & value == value {
            names.push(v.name().to_string());
            remaining &= !value;
        }
    }
    if remaining != 0 {
        names.push(format!("0x{remaining:x}"));
    }
    names.join(", ")
}

/// Interpret the 16-bit buffer flags of a GDP header, retaining unknown
/// bits.
pub fn buffer_flags_from_wire(bits: u16) -> BufferFlags {
    BufferFlags::from_bits_retain(u32::from(bits))
}

/// Nick of an enum or single-flag value held in `value`.
pub fn value_nick(value: &glib::Value) -> Option<String> {
    let type_ = value.type_();
    if type_.is_a(glib::Type::FLAGS) {
        let bits = value.transform::<u32>().ok()?.get::<u32>().ok()?;
        let class = glib::FlagsClass::with_type(type_)?;
        return class.value(bits).map(|v| v.nick().to_string());
    }
    if type_.is_a(glib::Type::ENUM) {
        let number = value.transform::<i32>().ok()?.get::<i32>().ok()?;
        let class = glib::EnumClass::with_type(type_)?;
        return class.value(number).map(|v| v.nick().to_string());
    }
    None
}

/// Resolve a message type token to its display name (the nick, as
/// `GST_MESSAGE_TYPE_NAME` reports it).
///
/// Needs an initialized GStreamer, which registers `GstMessageType`.
pub fn message_type_name(text: &str) -> Option<String> {
    let class = glib::FlagsClass::with_type(glib::Type::from_name(MESSAGE_TYPE_NAME)?)?;
    let text = text.trim();
    class
        .value_by_name(text)
        .or_else(|| class.value_by_nick(text))
        .or_else(|| parse_integer(text).and_then(|bits| class.value(bits)))
        .map(|v| v.nick().to_string())
}
