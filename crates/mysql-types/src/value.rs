//! The argument and row value sum type.

// The zero-timestamp constant is in range by construction.
#![allow(clippy::expect_used)]

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Seconds from the Unix epoch to 0001-01-01 00:00:00 UTC.
const CALENDAR_ORIGIN_SECS: i64 = -62_135_596_800;

/// A statement argument or decoded column value.
///
/// This is a closed set: the interpolator and the binary parameter encoder
/// match over it exhaustively, and anything a caller cannot express as one
/// of these variants must go through a server-side prepared statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Double-precision float.
    Double(f64),
    /// Boolean, rendered as `1`/`0`.
    Bool(bool),
    /// A point in time, rendered in the connection's configured time zone.
    Timestamp(DateTime<Utc>),
    /// Raw binary payload, quoted with the binary-charset marker.
    Bytes(Bytes),
    /// Text string.
    Text(String),
    /// Pre-serialized JSON document, quoted without the binary marker.
    Json(String),
}

impl Value {
    /// The "zero" timestamp, which interpolates to the literal
    /// `'0000-00-00'` with no time-of-day component.
    ///
    /// MySQL's zero date has no instant on the timeline, so the calendar
    /// origin (0001-01-01 00:00:00 UTC) stands in for it.
    #[must_use]
    pub fn zero_timestamp() -> DateTime<Utc> {
        DateTime::from_timestamp(CALENDAR_ORIGIN_SECS, 0).expect("constant is in range")
    }

    /// Whether this value is SQL NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The raw bytes of a `Bytes` or `Text` value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            Self::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(v))
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
