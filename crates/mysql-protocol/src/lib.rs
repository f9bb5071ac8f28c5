//! # mysql-protocol
//!
//! Pure implementation of the MySQL client/server wire protocol.
//!
//! This crate provides the packet envelope, command codes, capability and
//! status flags, column metadata decoding, and the length-encoded primitives
//! the protocol is built from. All numeric values match the upstream protocol
//! documentation exactly, since they are read from and written to the wire
//! verbatim.
//!
//! ## Design Philosophy
//!
//! This crate is intentionally IO-agnostic. It contains no networking logic
//! and makes no assumptions about the async runtime. Higher-level crates
//! build upon this foundation to provide framing and async I/O.
//!
//! ## Example
//!
//! ```rust
//! use mysql_protocol::packet::PacketHeader;
//! use bytes::BytesMut;
//!
//! let header = PacketHeader { length: 5, sequence: 0 };
//! let mut buf = BytesMut::new();
//! header.encode(&mut buf);
//! assert_eq!(&buf[..], &[0x05, 0x00, 0x00, 0x00]);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod column;
pub mod command;
pub mod error;
pub mod flags;
pub mod io;
pub mod packet;
pub mod response;

pub use column::{BINARY_COLLATION_ID, Field, FieldType};
pub use command::Command;
pub use error::ProtocolError;
pub use flags::{CapabilityFlags, FieldFlags, StatusFlags};
pub use packet::{MAX_PAYLOAD_SIZE, PACKET_HEADER_SIZE, PacketHeader};
pub use response::{
    AUTH_MORE_DATA_HEADER, EOF_HEADER, ERR_HEADER, EofPacket, ErrPacket, LOCAL_INFILE_HEADER,
    OK_HEADER, OkPacket,
};
