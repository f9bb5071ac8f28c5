//! Mapping from wire field types to host scan types.
//!
//! The input domain is the closed field-type and flag enumeration, so the
//! mapping is a pure function rather than any runtime type inspection.

use mysql_protocol::column::FieldType;
use mysql_protocol::flags::FieldFlags;

/// The host type a column should be scanned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanType {
    /// `i8`.
    Int8,
    /// `i16`.
    Int16,
    /// `i32`.
    Int32,
    /// `i64`.
    Int64,
    /// `u8`.
    UInt8,
    /// `u16`.
    UInt16,
    /// `u32`.
    UInt32,
    /// `u64`.
    UInt64,
    /// `f32`.
    Float32,
    /// `f64`.
    Float64,
    /// Nullable 64-bit integer.
    NullInt64,
    /// Nullable double.
    NullFloat64,
    /// Nullable timestamp.
    NullTime,
    /// Raw bytes, the caller decides further conversion.
    RawBytes,
    /// No fixed mapping.
    Unknown,
}

/// Map a column's wire type and flags to the type it scans into.
///
/// Nullable numeric columns map to their nullable wrappers regardless of
/// width; temporal columns always map to [`ScanType::NullTime`] so callers
/// get consistent behavior whether or not the column is nullable.
#[must_use]
pub fn scan_type(field_type: FieldType, flags: FieldFlags) -> ScanType {
    let not_null = flags.contains(FieldFlags::NOT_NULL);
    let unsigned = flags.contains(FieldFlags::UNSIGNED);

    match field_type {
        FieldType::Tiny => int_scan(not_null, unsigned, ScanType::UInt8, ScanType::Int8),
        FieldType::Short | FieldType::Year => {
            int_scan(not_null, unsigned, ScanType::UInt16, ScanType::Int16)
        }
        FieldType::Int24 | FieldType::Long => {
            int_scan(not_null, unsigned, ScanType::UInt32, ScanType::Int32)
        }
        FieldType::LongLong => int_scan(not_null, unsigned, ScanType::UInt64, ScanType::Int64),
        FieldType::Float => {
            if not_null {
                ScanType::Float32
            } else {
                ScanType::NullFloat64
            }
        }
        FieldType::Double => {
            if not_null {
                ScanType::Float64
            } else {
                ScanType::NullFloat64
            }
        }
        FieldType::Decimal
        | FieldType::NewDecimal
        | FieldType::VarChar
        | FieldType::Bit
        | FieldType::Enum
        | FieldType::Set
        | FieldType::TinyBlob
        | FieldType::MediumBlob
        | FieldType::LongBlob
        | FieldType::Blob
        | FieldType::VarString
        | FieldType::String
        | FieldType::Geometry
        | FieldType::Json
        | FieldType::Time => ScanType::RawBytes,
        FieldType::Date | FieldType::NewDate | FieldType::Timestamp | FieldType::DateTime => {
            ScanType::NullTime
        }
        FieldType::Null => ScanType::Unknown,
    }
}

fn int_scan(not_null: bool, unsigned: bool, u: ScanType, i: ScanType) -> ScanType {
    if not_null {
        if unsigned { u } else { i }
    } else {
        ScanType::NullInt64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_widths_and_signedness() {
        assert_eq!(
            scan_type(FieldType::Tiny, FieldFlags::NOT_NULL),
            ScanType::Int8
        );
        assert_eq!(
            scan_type(FieldType::Tiny, FieldFlags::NOT_NULL | FieldFlags::UNSIGNED),
            ScanType::UInt8
        );
        assert_eq!(
            scan_type(FieldType::LongLong, FieldFlags::NOT_NULL),
            ScanType::Int64
        );
        assert_eq!(
            scan_type(
                FieldType::LongLong,
                FieldFlags::NOT_NULL | FieldFlags::UNSIGNED
            ),
            ScanType::UInt64
        );
    }

    #[test]
    fn nullable_integers_collapse_to_null_int() {
        for ft in [
            FieldType::Tiny,
            FieldType::Short,
            FieldType::Int24,
            FieldType::Long,
            FieldType::LongLong,
        ] {
            assert_eq!(scan_type(ft, FieldFlags::empty()), ScanType::NullInt64);
        }
    }

    #[test]
    fn temporal_types_always_scan_as_null_time() {
        for ft in [FieldType::Date, FieldType::Timestamp, FieldType::DateTime] {
            assert_eq!(scan_type(ft, FieldFlags::NOT_NULL), ScanType::NullTime);
            assert_eq!(scan_type(ft, FieldFlags::empty()), ScanType::NullTime);
        }
    }

    #[test]
    fn stringish_types_scan_as_raw_bytes() {
        for ft in [
            FieldType::VarChar,
            FieldType::Blob,
            FieldType::Json,
            FieldType::NewDecimal,
            FieldType::Time,
        ] {
            assert_eq!(scan_type(ft, FieldFlags::empty()), ScanType::RawBytes);
        }
    }
}
