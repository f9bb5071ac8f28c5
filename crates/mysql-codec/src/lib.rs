//! # mysql-codec
//!
//! Async framing layer for MySQL packet handling.
//!
//! This crate transforms raw byte streams into logical protocol payloads,
//! handling fragment reassembly for oversized payloads and sequence-number
//! bookkeeping for both directions.
//!
//! ## Architecture
//!
//! The codec layer sits between the raw transport and the connection engine:
//!
//! ```text
//! TCP stream → PacketCodec (envelope framing) → PacketStream → Conn
//! ```
//!
//! The codec owns the per-command sequence counter. Writing a command resets
//! it to zero; every packet written or read advances it, and a received
//! packet whose sequence number does not match the expected value is a fatal
//! desynchronization and the connection must be discarded.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod framed;
pub mod packet_codec;

pub use buffer::WireBuffer;
pub use error::CodecError;
pub use framed::PacketStream;
pub use packet_codec::PacketCodec;
