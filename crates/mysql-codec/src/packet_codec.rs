//! MySQL packet codec implementation.
//!
//! Frames are the 4-byte envelope from [`mysql_protocol::packet`]; the codec
//! reassembles fragmented payloads on decode and splits oversized payloads on
//! encode, so both sides of the framing deal in complete logical payloads.

use bytes::{Bytes, BytesMut};
use mysql_protocol::packet::{
    DEFAULT_MAX_ALLOWED_PACKET, MAX_PAYLOAD_SIZE, PACKET_HEADER_SIZE, PacketHeader,
};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::CodecError;

/// Codec for the MySQL packet envelope.
///
/// The codec owns the packet sequence counter shared by both directions:
/// a command stamps sequence 0 on its first packet and the server's response
/// continues the same numbering. [`PacketCodec::reset_sequence`] must be
/// called at the start of every command.
#[derive(Debug)]
pub struct PacketCodec {
    /// Largest logical payload accepted for encoding.
    max_allowed_packet: usize,
    /// Next expected (and next stamped) sequence number.
    sequence: u8,
    /// Reassembly buffer for fragmented payloads.
    partial: BytesMut,
    /// Whether a fragment chain is in progress.
    assembling: bool,
}

impl PacketCodec {
    /// Create a new codec with the default `max_allowed_packet`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_allowed_packet: DEFAULT_MAX_ALLOWED_PACKET,
            sequence: 0,
            partial: BytesMut::new(),
            assembling: false,
        }
    }

    /// Set the largest logical payload the codec will encode.
    #[must_use]
    pub fn with_max_allowed_packet(mut self, max: usize) -> Self {
        self.max_allowed_packet = max;
        self
    }

    /// Update the largest logical payload the codec will encode.
    pub fn set_max_allowed_packet(&mut self, max: usize) {
        self.max_allowed_packet = max;
    }

    /// Reset the sequence counter for a new command.
    pub fn reset_sequence(&mut self) {
        self.sequence = 0;
    }

    /// The next expected sequence number.
    #[must_use]
    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    fn check_sequence(&mut self, got: u8) -> Result<(), CodecError> {
        if got != self.sequence {
            return Err(CodecError::OutOfOrderPacket {
                expected: self.sequence,
                got,
            });
        }
        self.sequence = self.sequence.wrapping_add(1);
        Ok(())
    }
}

impl Default for PacketCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for PacketCodec {
    type Item = Bytes;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if src.len() < PACKET_HEADER_SIZE {
                return Ok(None);
            }

            // Peek the length without consuming the header.
            let length = u32::from_le_bytes([src[0], src[1], src[2], 0]) as usize;
            if src.len() < PACKET_HEADER_SIZE + length {
                src.reserve(PACKET_HEADER_SIZE + length - src.len());
                return Ok(None);
            }

            let mut frame = src.split_to(PACKET_HEADER_SIZE + length);
            let header = PacketHeader::decode(&mut frame)?;
            self.check_sequence(header.sequence)?;

            tracing::trace!(
                length = header.length,
                sequence = header.sequence,
                fragment = header.is_fragment(),
                "decoded packet"
            );

            if header.is_fragment() {
                // Logical payload continues in the next packet.
                self.partial.extend_from_slice(&frame);
                self.assembling = true;
                continue;
            }

            if self.assembling {
                self.partial.extend_from_slice(&frame);
                self.assembling = false;
                return Ok(Some(self.partial.split().freeze()));
            }

            return Ok(Some(frame.freeze()));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(payload) => Ok(Some(payload)),
            None => {
                if self.assembling || !src.is_empty() {
                    return Err(CodecError::ConnectionClosed);
                }
                Ok(None)
            }
        }
    }
}

impl Encoder<Bytes> for PacketCodec {
    type Error = CodecError;

    fn encode(&mut self, payload: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if payload.len() > self.max_allowed_packet {
            return Err(CodecError::PayloadExceedsMaxPacket {
                size: payload.len(),
                max: self.max_allowed_packet,
            });
        }

        let total = payload.len();
        let mut rest = payload;
        loop {
            let take = rest.len().min(MAX_PAYLOAD_SIZE);
            let chunk = rest.split_to(take);

            dst.reserve(PACKET_HEADER_SIZE + take);
            let header = PacketHeader {
                length: take,
                sequence: self.sequence,
            };
            header.encode(dst);
            dst.extend_from_slice(&chunk);

            tracing::trace!(length = take, sequence = self.sequence, "encoded packet");
            self.sequence = self.sequence.wrapping_add(1);

            // A full-size packet promises a continuation, so a payload that
            // is an exact multiple of the maximum ends with an empty packet.
            if take < MAX_PAYLOAD_SIZE {
                break;
            }
        }
        debug_assert!(rest.is_empty(), "payload of {total} bytes not fully sent");

        Ok(())
    }
}
