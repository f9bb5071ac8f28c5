//! Client-side parameter interpolation.
//!
//! Rewrites a parameterized query and its argument list into one literal
//! statement, saving the prepare/execute/close round trips. Placeholders
//! are bare `?` characters; the interpolator does not parse SQL, so a `?`
//! inside a string literal counts as a placeholder and callers with such
//! queries must use a prepared statement instead.

use bytes::{BufMut, BytesMut};
use chrono::FixedOffset;
use mysql_protocol::flags::StatusFlags;
use mysql_types::Value;
use mysql_types::encode::append_timestamp;

use crate::error::Error;

/// Safety margin added to the length check after each argument, covering
/// the command byte and quoting overhead.
const LENGTH_CHECK_MARGIN: usize = 4;

/// Build a literal statement from `query` and `args` into `buf`.
///
/// Escaping follows the server's current no-backslash-escapes status flag:
/// backslash-style escaping when clear, doubled-quote-only escaping when
/// set. The output is raw bytes, not guaranteed UTF-8, because binary
/// arguments embed their escaped bytes verbatim.
///
/// # Errors
///
/// - [`Error::ArgumentMismatch`] if the placeholder count differs from the
///   argument count.
/// - [`Error::UnsupportedArgument`] for a value with no literal encoding
///   (non-finite floats); the caller falls back to a prepared statement.
/// - [`Error::StatementTooLarge`] if the literal statement would exceed
///   `max_allowed_packet`.
pub(crate) fn interpolate_params(
    query: &str,
    args: &[Value],
    status: StatusFlags,
    time_zone: FixedOffset,
    max_allowed_packet: usize,
    buf: &mut BytesMut,
) -> Result<(), Error> {
    if query.bytes().filter(|&b| b == b'?').count() != args.len() {
        return Err(Error::ArgumentMismatch);
    }

    let no_backslash = status.contains(StatusFlags::NO_BACKSLASH_ESCAPES);
    let mut rest = query;
    let mut consumed = 0usize;

    loop {
        let Some(pos) = rest.find('?') else {
            buf.extend_from_slice(rest.as_bytes());
            break;
        };
        buf.extend_from_slice(rest[..pos].as_bytes());
        rest = &rest[pos + 1..];

        let arg = &args[consumed];
        consumed += 1;
        append_argument(buf, arg, no_backslash, time_zone)?;

        if buf.len() + LENGTH_CHECK_MARGIN > max_allowed_packet {
            return Err(Error::StatementTooLarge);
        }
    }

    if consumed != args.len() {
        return Err(Error::ArgumentMismatch);
    }
    Ok(())
}

fn append_argument(
    buf: &mut BytesMut,
    arg: &Value,
    no_backslash: bool,
    time_zone: FixedOffset,
) -> Result<(), Error> {
    match arg {
        Value::Null => buf.put_slice(b"NULL"),
        Value::Int(v) => buf.put_slice(v.to_string().as_bytes()),
        Value::UInt(v) => buf.put_slice(v.to_string().as_bytes()),
        Value::Double(v) => {
            if !v.is_finite() {
                return Err(Error::UnsupportedArgument);
            }
            buf.put_slice(v.to_string().as_bytes());
        }
        Value::Bool(v) => buf.put_u8(if *v { b'1' } else { b'0' }),
        Value::Timestamp(ts) => {
            buf.put_u8(b'\'');
            append_timestamp(buf, *ts, time_zone);
            buf.put_u8(b'\'');
        }
        Value::Json(s) => {
            buf.put_u8(b'\'');
            escape_into(buf, s.as_bytes(), no_backslash);
            buf.put_u8(b'\'');
        }
        Value::Bytes(b) => {
            buf.put_slice(b"_binary'");
            escape_into(buf, b, no_backslash);
            buf.put_u8(b'\'');
        }
        Value::Text(s) => {
            buf.put_u8(b'\'');
            escape_into(buf, s.as_bytes(), no_backslash);
            buf.put_u8(b'\'');
        }
    }
    Ok(())
}

fn escape_into(buf: &mut BytesMut, data: &[u8], no_backslash: bool) {
    if no_backslash {
        escape_quotes(buf, data);
    } else {
        escape_backslash(buf, data);
    }
}

/// Backslash-style escaping, used when the server interprets backslashes.
fn escape_backslash(buf: &mut BytesMut, data: &[u8]) {
    for &b in data {
        match b {
            0x00 => buf.put_slice(b"\\0"),
            b'\n' => buf.put_slice(b"\\n"),
            b'\r' => buf.put_slice(b"\\r"),
            0x1A => buf.put_slice(b"\\Z"),
            b'\'' => buf.put_slice(b"\\'"),
            b'"' => buf.put_slice(b"\\\""),
            b'\\' => buf.put_slice(b"\\\\"),
            _ => buf.put_u8(b),
        }
    }
}

/// Doubled-quote escaping, used under `NO_BACKSLASH_ESCAPES`.
fn escape_quotes(buf: &mut BytesMut, data: &[u8]) {
    for &b in data {
        if b == b'\'' {
            buf.put_slice(b"''");
        } else {
            buf.put_u8(b);
        }
    }
}
