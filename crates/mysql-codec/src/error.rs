//! Codec error types.

use mysql_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur in the framing layer.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Underlying transport failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Envelope-level protocol violation.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A received sequence number did not match the expected next value.
    ///
    /// This is fatal: the stream position can no longer be trusted and the
    /// connection must be discarded, never retried.
    #[error("commands out of sync: expected sequence {expected}, got {got}")]
    OutOfOrderPacket {
        /// The sequence number the codec expected.
        expected: u8,
        /// The sequence number actually received.
        got: u8,
    },

    /// An outgoing payload larger than the connection allows.
    #[error("payload of {size} bytes exceeds max_allowed_packet ({max})")]
    PayloadExceedsMaxPacket {
        /// Payload size in bytes.
        size: usize,
        /// Configured `max_allowed_packet`.
        max: usize,
    },

    /// The transport closed mid-payload.
    #[error("connection closed with a partial packet pending")]
    ConnectionClosed,

    /// The wire buffer is already checked out by another operation.
    #[error("wire buffer already checked out")]
    BufferBusy,
}

impl CodecError {
    /// Whether this error means the stream state is unrecoverable and the
    /// connection must be discarded.
    #[must_use]
    pub fn is_desync(&self) -> bool {
        matches!(self, Self::OutOfOrderPacket { .. })
    }
}
