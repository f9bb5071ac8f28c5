//! Server response packet classification and decoding.
//!
//! The first byte of a reassembled response payload selects the message
//! class. In the command-response context any value other than the markers
//! below is the start of a result-set column count.

use bytes::{Buf, Bytes};

use crate::error::ProtocolError;
use crate::flags::StatusFlags;
use crate::io::read_lenenc_int;

/// First byte of an OK packet (also used for a prepare-OK packet).
pub const OK_HEADER: u8 = 0x00;
/// First byte of an authentication-continuation packet.
pub const AUTH_MORE_DATA_HEADER: u8 = 0x01;
/// First byte of a `LOCAL INFILE` request.
pub const LOCAL_INFILE_HEADER: u8 = 0xFB;
/// First byte of an EOF packet (context-dependent; also the 8-byte
/// length-encoded integer prefix).
pub const EOF_HEADER: u8 = 0xFE;
/// First byte of an ERR packet.
pub const ERR_HEADER: u8 = 0xFF;

/// A decoded OK packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OkPacket {
    /// Rows affected by the command.
    pub affected_rows: u64,
    /// Last value generated for an AUTO_INCREMENT column.
    pub last_insert_id: u64,
    /// Server status after the command.
    pub status: StatusFlags,
    /// Warning count.
    pub warnings: u16,
}

impl OkPacket {
    /// Decode an OK payload, including its leading header byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a well-formed OK packet.
    pub fn decode(mut payload: Bytes) -> Result<Self, ProtocolError> {
        let header = take_header(&mut payload, "OK packet")?;
        if header != OK_HEADER && header != EOF_HEADER {
            return Err(ProtocolError::UnexpectedHeader {
                context: "OK packet",
                header,
            });
        }

        let affected_rows = read_int(&mut payload, "OK packet")?;
        let last_insert_id = read_int(&mut payload, "OK packet")?;
        if payload.remaining() < 4 {
            return Err(ProtocolError::Incomplete {
                expected: 4,
                actual: payload.remaining(),
            });
        }
        let status = StatusFlags::from_bits_retain(payload.get_u16_le());
        let warnings = payload.get_u16_le();

        Ok(Self {
            affected_rows,
            last_insert_id,
            status,
            warnings,
        })
    }
}

/// A decoded ERR packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrPacket {
    /// Server error code.
    pub code: u16,
    /// Five-character SQLSTATE, when the server sent one.
    pub sql_state: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl ErrPacket {
    /// Decode an ERR payload, including its leading `0xFF` byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a well-formed ERR packet.
    pub fn decode(mut payload: Bytes) -> Result<Self, ProtocolError> {
        let header = take_header(&mut payload, "ERR packet")?;
        if header != ERR_HEADER {
            return Err(ProtocolError::UnexpectedHeader {
                context: "ERR packet",
                header,
            });
        }
        if payload.remaining() < 2 {
            return Err(ProtocolError::Incomplete {
                expected: 2,
                actual: payload.remaining(),
            });
        }
        let code = payload.get_u16_le();

        // SQLSTATE is optional: '#' followed by five characters.
        let sql_state = if payload.first() == Some(&b'#') && payload.remaining() >= 6 {
            let marker = payload.split_to(6);
            Some(String::from_utf8_lossy(&marker[1..]).into_owned())
        } else {
            None
        };

        let message = String::from_utf8_lossy(&payload).into_owned();
        Ok(Self {
            code,
            sql_state,
            message,
        })
    }
}

/// A decoded EOF packet (protocol 4.1 form: five bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EofPacket {
    /// Warning count.
    pub warnings: u16,
    /// Server status after the command.
    pub status: StatusFlags,
}

impl EofPacket {
    /// Decode an EOF payload, including its leading `0xFE` byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a five-byte EOF packet.
    pub fn decode(mut payload: Bytes) -> Result<Self, ProtocolError> {
        if payload.len() != 5 || payload[0] != EOF_HEADER {
            return Err(ProtocolError::Malformed { what: "EOF packet" });
        }
        payload.advance(1);
        let warnings = payload.get_u16_le();
        let status = StatusFlags::from_bits_retain(payload.get_u16_le());
        Ok(Self { warnings, status })
    }
}

/// Whether a payload is a protocol 4.1 EOF packet.
///
/// The `0xFE` byte is also the 8-byte length-encoded integer prefix, so the
/// packet length disambiguates.
#[must_use]
pub fn is_eof_packet(payload: &[u8]) -> bool {
    payload.len() == 5 && payload[0] == EOF_HEADER
}

fn take_header(payload: &mut Bytes, context: &'static str) -> Result<u8, ProtocolError> {
    if payload.is_empty() {
        return Err(ProtocolError::Malformed { what: context });
    }
    Ok(payload.get_u8())
}

fn read_int(payload: &mut Bytes, context: &'static str) -> Result<u64, ProtocolError> {
    read_lenenc_int(payload)?.ok_or(ProtocolError::Malformed { what: context })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::io::write_lenenc_int;

    #[test]
    fn decode_ok_packet() {
        let mut buf = BytesMut::new();
        buf.put_u8(OK_HEADER);
        write_lenenc_int(&mut buf, 3); // affected rows
        write_lenenc_int(&mut buf, 7); // last insert id
        buf.put_u16_le(StatusFlags::AUTOCOMMIT.bits());
        buf.put_u16_le(1);

        let ok = OkPacket::decode(buf.freeze()).unwrap();
        assert_eq!(ok.affected_rows, 3);
        assert_eq!(ok.last_insert_id, 7);
        assert!(ok.status.contains(StatusFlags::AUTOCOMMIT));
        assert_eq!(ok.warnings, 1);
    }

    #[test]
    fn decode_err_packet_with_sqlstate() {
        let mut buf = BytesMut::new();
        buf.put_u8(ERR_HEADER);
        buf.put_u16_le(1064);
        buf.put_slice(b"#42000You have an error in your SQL syntax");

        let err = ErrPacket::decode(buf.freeze()).unwrap();
        assert_eq!(err.code, 1064);
        assert_eq!(err.sql_state.as_deref(), Some("42000"));
        assert!(err.message.starts_with("You have an error"));
    }

    #[test]
    fn decode_err_packet_without_sqlstate() {
        let mut buf = BytesMut::new();
        buf.put_u8(ERR_HEADER);
        buf.put_u16_le(1045);
        buf.put_slice(b"Access denied");

        let err = ErrPacket::decode(buf.freeze()).unwrap();
        assert_eq!(err.code, 1045);
        assert_eq!(err.sql_state, None);
        assert_eq!(err.message, "Access denied");
    }

    #[test]
    fn decode_eof_packet() {
        let mut buf = BytesMut::new();
        buf.put_u8(EOF_HEADER);
        buf.put_u16_le(0);
        buf.put_u16_le(StatusFlags::MORE_RESULTS_EXISTS.bits());

        let payload = buf.freeze();
        assert!(is_eof_packet(&payload));
        let eof = EofPacket::decode(payload).unwrap();
        assert!(eof.status.contains(StatusFlags::MORE_RESULTS_EXISTS));
    }

    #[test]
    fn long_fe_payload_is_not_eof() {
        // 0xFE followed by eight bytes is a length-encoded integer, not EOF.
        let payload = [EOF_HEADER, 0, 0, 0, 0, 0, 0, 0, 1];
        assert!(!is_eof_packet(&payload));
    }

    #[test]
    fn ok_decode_rejects_err_header() {
        let payload = Bytes::from_static(&[ERR_HEADER, 0x01, 0x00]);
        assert!(OkPacket::decode(payload).is_err());
    }
}
