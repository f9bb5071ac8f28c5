//! Protocol error types.

use thiserror::Error;

/// Errors produced while decoding or constructing protocol structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The buffer ended inside an encoding.
    #[error("incomplete data: expected {expected} more bytes, have {actual}")]
    Incomplete {
        /// Bytes required to continue decoding.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// A payload longer than a single packet allows.
    #[error("payload of {0} bytes exceeds the maximum packet payload")]
    PayloadTooLong(usize),

    /// A length-encoded integer starting with a reserved prefix.
    #[error("invalid length-encoded integer prefix {0:#04x}")]
    BadLengthPrefix(u8),

    /// A command byte with no assigned command.
    #[error("unknown command byte {0:#04x}")]
    UnknownCommand(u8),

    /// A field type byte with no assigned type.
    #[error("unknown column field type {0:#04x}")]
    UnknownFieldType(u8),

    /// A payload whose first byte does not fit the expected message class.
    #[error("unexpected header byte {header:#04x} in {context}")]
    UnexpectedHeader {
        /// What was being decoded.
        context: &'static str,
        /// The offending byte.
        header: u8,
    },

    /// A structurally invalid payload.
    #[error("malformed {what}")]
    Malformed {
        /// What was being decoded.
        what: &'static str,
    },
}
