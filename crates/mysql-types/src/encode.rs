//! Binary-protocol parameter encoding and literal timestamp formatting.

use bytes::{BufMut, BytesMut};
use chrono::{DateTime, Datelike, FixedOffset, TimeDelta, Timelike, Utc};
use mysql_protocol::column::FieldType;
use mysql_protocol::io::write_lenenc_bytes;

use crate::value::Value;

/// Tens digits of 0..=99.
const DIGITS_10: &[u8; 100] =
    b"0000000000111111111122222222223333333333444444444455555555556666666666777777777788888888889999999999";
/// Units digits of 0..=99.
const DIGITS_01: &[u8; 100] =
    b"0123456789012345678901234567890123456789012345678901234567890123456789012345678901234567890123456789";

/// The wire type and flag byte a parameter is declared with in a
/// statement-execute command.
///
/// The flag byte carries `0x80` for unsigned integers; everything stringish
/// (including timestamps, which are sent as formatted text) declares the
/// string type.
#[must_use]
pub fn binary_wire_type(value: &Value) -> (FieldType, u8) {
    match value {
        Value::Null => (FieldType::Null, 0),
        Value::Int(_) => (FieldType::LongLong, 0),
        Value::UInt(_) => (FieldType::LongLong, 0x80),
        Value::Double(_) => (FieldType::Double, 0),
        Value::Bool(_) => (FieldType::Tiny, 0),
        Value::Timestamp(_) | Value::Bytes(_) | Value::Text(_) | Value::Json(_) => {
            (FieldType::String, 0)
        }
    }
}

/// Append a parameter's binary-protocol value.
///
/// NULL appends nothing; its presence is carried by the null bitmap.
pub fn encode_binary_value(dst: &mut BytesMut, value: &Value, tz: FixedOffset) {
    match value {
        Value::Null => {}
        Value::Int(v) => dst.put_i64_le(*v),
        Value::UInt(v) => dst.put_u64_le(*v),
        Value::Double(v) => dst.put_f64_le(*v),
        Value::Bool(v) => dst.put_u8(u8::from(*v)),
        Value::Bytes(b) => write_lenenc_bytes(dst, b),
        Value::Text(s) | Value::Json(s) => write_lenenc_bytes(dst, s.as_bytes()),
        Value::Timestamp(ts) => {
            let mut text = BytesMut::with_capacity(27);
            append_timestamp(&mut text, *ts, tz);
            write_lenenc_bytes(dst, &text);
        }
    }
}

/// Append a timestamp literal, without quotes, in the given time zone.
///
/// The value is rounded to the nearest microsecond; a fractional-second
/// component is appended only when non-zero, always as six digits. The zero
/// timestamp renders as `0000-00-00`.
pub fn append_timestamp(dst: &mut BytesMut, ts: DateTime<Utc>, tz: FixedOffset) {
    if ts == Value::zero_timestamp() {
        dst.put_slice(b"0000-00-00");
        return;
    }

    // Half a microsecond rounds the truncating division below to nearest.
    let t = ts.with_timezone(&tz) + TimeDelta::nanoseconds(500);

    let year = t.year() as usize;
    let year100 = year / 100;
    let year1 = year % 100;
    put_pair(dst, year100);
    put_pair(dst, year1);
    dst.put_u8(b'-');
    put_pair(dst, t.month() as usize);
    dst.put_u8(b'-');
    put_pair(dst, t.day() as usize);
    dst.put_u8(b' ');
    put_pair(dst, t.hour() as usize);
    dst.put_u8(b':');
    put_pair(dst, t.minute() as usize);
    dst.put_u8(b':');
    put_pair(dst, t.second() as usize);

    let micro = (t.nanosecond() % 1_000_000_000) as usize / 1000;
    if micro != 0 {
        dst.put_u8(b'.');
        put_pair(dst, micro / 10_000);
        put_pair(dst, micro / 100 % 100);
        put_pair(dst, micro % 100);
    }
}

fn put_pair(dst: &mut BytesMut, n: usize) {
    debug_assert!(n < 100);
    dst.put_u8(DIGITS_10[n]);
    dst.put_u8(DIGITS_01[n]);
}
