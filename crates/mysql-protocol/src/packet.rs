//! Packet envelope definitions.
//!
//! Every MySQL protocol packet starts with a 4-byte header: a 3-byte
//! little-endian payload length followed by a 1-byte sequence number.
//! Payloads of `0xFFFFFF` bytes or more are split across multiple packets.

use bytes::{Buf, BufMut};

use crate::error::ProtocolError;

/// Packet header size in bytes.
pub const PACKET_HEADER_SIZE: usize = 4;

/// Maximum payload size of a single packet (2^24 - 1).
///
/// A payload of exactly this size signals that a continuation packet
/// follows; the logical payload ends with the first shorter fragment.
pub const MAX_PAYLOAD_SIZE: usize = 0xFF_FFFF;

/// Default value of the `max_allowed_packet` server variable (4 MiB).
pub const DEFAULT_MAX_ALLOWED_PACKET: usize = 4 << 20;

/// MySQL packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Payload length, `0..=0xFFFFFF`.
    pub length: usize,
    /// Packet sequence number (wraps mod 256, resets to 0 per command).
    pub sequence: u8,
}

impl PacketHeader {
    /// Create a new packet header.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` exceeds [`MAX_PAYLOAD_SIZE`].
    pub fn new(length: usize, sequence: u8) -> Result<Self, ProtocolError> {
        if length > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::PayloadTooLong(length));
        }
        Ok(Self { length, sequence })
    }

    /// Parse a packet header from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Incomplete`] if fewer than
    /// [`PACKET_HEADER_SIZE`] bytes are available.
    pub fn decode(src: &mut impl Buf) -> Result<Self, ProtocolError> {
        if src.remaining() < PACKET_HEADER_SIZE {
            return Err(ProtocolError::Incomplete {
                expected: PACKET_HEADER_SIZE,
                actual: src.remaining(),
            });
        }

        let length = src.get_uint_le(3) as usize;
        let sequence = src.get_u8();

        Ok(Self { length, sequence })
    }

    /// Encode the packet header to bytes.
    pub fn encode(&self, dst: &mut impl BufMut) {
        debug_assert!(self.length <= MAX_PAYLOAD_SIZE);
        dst.put_uint_le(self.length as u64, 3);
        dst.put_u8(self.sequence);
    }

    /// Whether the payload this header describes is a fragment of a larger
    /// logical payload.
    #[must_use]
    pub const fn is_fragment(&self) -> bool {
        self.length == MAX_PAYLOAD_SIZE
    }
}
