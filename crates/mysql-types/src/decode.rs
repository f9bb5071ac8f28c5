//! Binary-protocol row value decoding.
//!
//! Prepared-statement result rows carry typed little-endian values instead
//! of text. Numeric columns decode into native integers and floats; string
//! and decimal columns stay as raw bytes; temporal columns are rendered to
//! their canonical text form so they read identically to the text protocol.

use std::fmt::Write as _;

use bytes::{Buf, Bytes};
use mysql_protocol::column::{Field, FieldType};
use mysql_protocol::flags::FieldFlags;
use mysql_protocol::io::read_lenenc_bytes;

use crate::error::TypeError;
use crate::value::Value;

/// Decode one non-NULL column value from a binary row.
///
/// NULL columns are carried by the row's null bitmap and must be skipped by
/// the caller before this is invoked.
///
/// # Errors
///
/// Returns an error if the row data ends inside the value or a temporal
/// value has an impossible length.
pub fn decode_binary_value(src: &mut Bytes, field: &Field) -> Result<Value, TypeError> {
    let unsigned = field.flags.contains(FieldFlags::UNSIGNED);
    let ft = field.field_type;

    match ft {
        FieldType::Null => Ok(Value::Null),

        FieldType::Tiny => {
            need(src, 1, ft)?;
            Ok(if unsigned {
                Value::UInt(u64::from(src.get_u8()))
            } else {
                Value::Int(i64::from(src.get_i8()))
            })
        }
        FieldType::Short | FieldType::Year => {
            need(src, 2, ft)?;
            Ok(if unsigned {
                Value::UInt(u64::from(src.get_u16_le()))
            } else {
                Value::Int(i64::from(src.get_i16_le()))
            })
        }
        FieldType::Int24 | FieldType::Long => {
            need(src, 4, ft)?;
            Ok(if unsigned {
                Value::UInt(u64::from(src.get_u32_le()))
            } else {
                Value::Int(i64::from(src.get_i32_le()))
            })
        }
        FieldType::LongLong => {
            need(src, 8, ft)?;
            Ok(if unsigned {
                Value::UInt(src.get_u64_le())
            } else {
                Value::Int(src.get_i64_le())
            })
        }
        FieldType::Float => {
            need(src, 4, ft)?;
            Ok(Value::Double(f64::from(src.get_f32_le())))
        }
        FieldType::Double => {
            need(src, 8, ft)?;
            Ok(Value::Double(src.get_f64_le()))
        }

        FieldType::Decimal
        | FieldType::NewDecimal
        | FieldType::VarChar
        | FieldType::VarString
        | FieldType::String
        | FieldType::Enum
        | FieldType::Set
        | FieldType::TinyBlob
        | FieldType::MediumBlob
        | FieldType::LongBlob
        | FieldType::Blob
        | FieldType::Bit
        | FieldType::Geometry
        | FieldType::Json => {
            let bytes = read_lenenc_bytes(src)
                .map_err(|_| TypeError::UnexpectedEof(ft))?
                .unwrap_or_else(Bytes::new);
            Ok(Value::Bytes(bytes))
        }

        FieldType::Date | FieldType::NewDate => decode_date(src, ft),
        FieldType::DateTime | FieldType::Timestamp => decode_datetime(src, ft),
        FieldType::Time => decode_time(src, ft),
    }
}

fn decode_date(src: &mut Bytes, ft: FieldType) -> Result<Value, TypeError> {
    need(src, 1, ft)?;
    let len = usize::from(src.get_u8());
    need(src, len, ft)?;
    match len {
        0 => Ok(text("0000-00-00")),
        4 => {
            let year = src.get_u16_le();
            let month = src.get_u8();
            let day = src.get_u8();
            let mut out = String::with_capacity(10);
            let _ = write!(out, "{year:04}-{month:02}-{day:02}");
            Ok(text(&out))
        }
        _ => Err(TypeError::InvalidTemporal { what: "DATE", len }),
    }
}

fn decode_datetime(src: &mut Bytes, ft: FieldType) -> Result<Value, TypeError> {
    need(src, 1, ft)?;
    let len = usize::from(src.get_u8());
    need(src, len, ft)?;
    if !matches!(len, 0 | 4 | 7 | 11) {
        return Err(TypeError::InvalidTemporal {
            what: "DATETIME",
            len,
        });
    }

    if len == 0 {
        return Ok(text("0000-00-00 00:00:00"));
    }

    let year = src.get_u16_le();
    let month = src.get_u8();
    let day = src.get_u8();
    let mut out = String::with_capacity(26);
    let _ = write!(out, "{year:04}-{month:02}-{day:02}");

    if len >= 7 {
        let hour = src.get_u8();
        let minute = src.get_u8();
        let second = src.get_u8();
        let _ = write!(out, " {hour:02}:{minute:02}:{second:02}");
    } else {
        out.push_str(" 00:00:00");
    }

    if len == 11 {
        let micro = src.get_u32_le();
        let _ = write!(out, ".{micro:06}");
    }

    Ok(text(&out))
}

fn decode_time(src: &mut Bytes, ft: FieldType) -> Result<Value, TypeError> {
    need(src, 1, ft)?;
    let len = usize::from(src.get_u8());
    need(src, len, ft)?;
    if !matches!(len, 0 | 8 | 12) {
        return Err(TypeError::InvalidTemporal { what: "TIME", len });
    }

    if len == 0 {
        return Ok(text("00:00:00"));
    }

    let negative = src.get_u8() != 0;
    let days = src.get_u32_le();
    let hour = u64::from(days) * 24 + u64::from(src.get_u8());
    let minute = src.get_u8();
    let second = src.get_u8();

    let mut out = String::with_capacity(17);
    if negative {
        out.push('-');
    }
    let _ = write!(out, "{hour:02}:{minute:02}:{second:02}");

    if len == 12 {
        let micro = src.get_u32_le();
        let _ = write!(out, ".{micro:06}");
    }

    Ok(text(&out))
}

fn text(s: &str) -> Value {
    Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
}

fn need(src: &Bytes, n: usize, ft: FieldType) -> Result<(), TypeError> {
    if src.remaining() < n {
        return Err(TypeError::UnexpectedEof(ft));
    }
    Ok(())
}
