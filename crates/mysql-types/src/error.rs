//! Type conversion error types.

use mysql_protocol::column::FieldType;
use thiserror::Error;

/// Errors that can occur converting between wire and host values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Row data ended before the value was complete.
    #[error("unexpected end of row data decoding a {0:?} column")]
    UnexpectedEof(FieldType),

    /// A temporal value with an impossible wire length.
    #[error("invalid {what} value of {len} bytes")]
    InvalidTemporal {
        /// Which temporal kind was being decoded.
        what: &'static str,
        /// The offending length.
        len: usize,
    },

    /// A column type the binary protocol decoder does not handle.
    #[error("cannot decode column type {0:?}")]
    UnsupportedColumn(FieldType),
}
