//! Client error types.

use mysql_codec::CodecError;
use thiserror::Error;

/// Errors that can occur during connection operations.
///
/// The variants distinguish three caller obligations: retry the whole
/// operation on a fresh connection ([`Error::BadConnection`]), give up on
/// this connection entirely ([`Error::InvalidConnection`], fatal codec
/// errors), or fix the statement ([`Error::Server`] and the interpolation
/// errors).
#[derive(Debug, Error)]
pub enum Error {
    /// The connection is closed or canceled and must never be reused.
    #[error("invalid connection")]
    InvalidConnection,

    /// Transport-level failure at a safe retry boundary.
    ///
    /// The caller should discard this connection, obtain a new one, and may
    /// retry the logical operation once.
    #[error("bad connection")]
    BadConnection,

    /// Authoritative rejection from the server; the connection stays usable.
    #[error("server error {code} ({sql_state}): {message}")]
    Server {
        /// Server error code.
        code: u16,
        /// Five-character SQLSTATE, empty if the server sent none.
        sql_state: String,
        /// Human-readable message.
        message: String,
    },

    /// Framing-layer failure, including fatal sequence desynchronization.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Placeholder count differs from the argument count.
    #[error("placeholder count does not match argument count")]
    ArgumentMismatch,

    /// An argument that cannot be rendered as a literal; use a prepared
    /// statement instead.
    #[error("argument not representable as a literal; use a prepared statement")]
    UnsupportedArgument,

    /// The statement has parameters but interpolation is disabled; use a
    /// prepared statement instead.
    #[error("parameter interpolation is disabled; use a prepared statement")]
    InterpolationDisabled,

    /// The interpolated statement would exceed `max_allowed_packet`.
    #[error("interpolated statement exceeds max_allowed_packet")]
    StatementTooLarge,

    /// The operation was canceled through its cancellation context.
    ///
    /// Surfaced once per cancellation; afterwards the connection reports
    /// [`Error::InvalidConnection`].
    #[error("operation canceled")]
    Canceled,

    /// The server requested a `LOCAL INFILE` transfer, which this client
    /// refuses.
    #[error("server requested LOCAL INFILE, which is not supported")]
    LocalInfileNotSupported,
}

impl Error {
    /// Whether the caller may retry the operation on a fresh connection.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BadConnection)
    }

    /// Whether this error means the connection must be discarded.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::InvalidConnection | Self::BadConnection | Self::Canceled => true,
            Self::Codec(e) => e.is_desync(),
            _ => false,
        }
    }

    /// The server error code, if this is a server error.
    #[must_use]
    pub fn server_code(&self) -> Option<u16> {
        match self {
            Self::Server { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
