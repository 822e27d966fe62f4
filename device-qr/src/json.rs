//! JSON serialization of device records.

use std::io;
use std::str::FromStr;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};

use crate::record::{DeviceRecord, RecordError};

/// Byte layout of the serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// `{"id": "1", "name": "x"}` with DEL and non-ASCII escaped as `\uXXXX`.
    /// This is the layout already printed on deployed device labels.
    #[default]
    Spaced,
    /// `{"id":"1","name":"x"}`
    Compact,
}

impl FromStr for JsonStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spaced" => Ok(JsonStyle::Spaced),
            "compact" => Ok(JsonStyle::Compact),
            other => Err(format!("unknown JSON style '{other}'")),
        }
    }
}

/// `", "` / `": "` separators and ASCII-only output.
#[derive(Debug, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        if fragment.is_ascii() && !fragment.contains('\u{7f}') {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() && c != '\u{7f}' {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize a record to UTF-8 JSON bytes.
pub fn to_json(record: &DeviceRecord, style: JsonStyle) -> Vec<u8> {
    let mut out = Vec::with_capacity(256);
    let result = match style {
        JsonStyle::Spaced => record.serialize(&mut Serializer::with_formatter(&mut out, SpacedFormatter)),
        JsonStyle::Compact => record.serialize(&mut Serializer::with_formatter(&mut out, CompactFormatter)),
    };
    // Writing string and number scalars into a Vec cannot fail.
    debug_assert!(result.is_ok(), "record serialization failed: {result:?}");
    out
}

/// Parse JSON bytes produced by [`to_json`] (or any equivalent JSON object) back into a record.
pub fn from_json(bytes: &[u8]) -> Result<DeviceRecord, RecordError> {
    Ok(serde_json::from_slice(bytes)?)
}
