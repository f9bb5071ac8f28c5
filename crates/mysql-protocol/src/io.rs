//! Length-encoded primitives.
//!
//! Integers and strings in result sets, column definitions, and OK packets
//! are length-encoded: a one-byte prefix selects an inline value or a 2-, 3-,
//! or 8-byte little-endian integer. The `0xFB` prefix denotes NULL in row
//! data.

use bytes::{Buf, BufMut, Bytes};

use crate::error::ProtocolError;

/// Prefix byte for a NULL value in row data.
pub const NULL_VALUE: u8 = 0xFB;

/// Read a length-encoded integer.
///
/// Returns `None` for the NULL marker (`0xFB`), which is only meaningful in
/// row data; callers in other contexts treat it as an error.
///
/// # Errors
///
/// Returns [`ProtocolError::Incomplete`] when the buffer ends inside the
/// encoding.
pub fn read_lenenc_int(src: &mut Bytes) -> Result<Option<u64>, ProtocolError> {
    if src.is_empty() {
        return Err(ProtocolError::Incomplete {
            expected: 1,
            actual: 0,
        });
    }
    let prefix = src.get_u8();
    let needed = match prefix {
        0x00..=0xFA => return Ok(Some(u64::from(prefix))),
        NULL_VALUE => return Ok(None),
        0xFC => 2,
        0xFD => 3,
        0xFE => 8,
        0xFF => return Err(ProtocolError::BadLengthPrefix(prefix)),
    };
    if src.remaining() < needed {
        return Err(ProtocolError::Incomplete {
            expected: needed,
            actual: src.remaining(),
        });
    }
    Ok(Some(src.get_uint_le(needed)))
}

/// Write a length-encoded integer.
pub fn write_lenenc_int(dst: &mut impl BufMut, value: u64) {
    match value {
        0..=0xFA => dst.put_u8(value as u8),
        0xFB..=0xFFFF => {
            dst.put_u8(0xFC);
            dst.put_u16_le(value as u16);
        }
        0x1_0000..=0xFF_FFFF => {
            dst.put_u8(0xFD);
            dst.put_uint_le(value, 3);
        }
        _ => {
            dst.put_u8(0xFE);
            dst.put_u64_le(value);
        }
    }
}

/// Read a length-encoded byte string, returning `None` for NULL.
///
/// # Errors
///
/// Returns [`ProtocolError::Incomplete`] when the buffer ends inside the
/// length prefix or the payload.
pub fn read_lenenc_bytes(src: &mut Bytes) -> Result<Option<Bytes>, ProtocolError> {
    let Some(len) = read_lenenc_int(src)? else {
        return Ok(None);
    };
    let len = len as usize;
    if src.remaining() < len {
        return Err(ProtocolError::Incomplete {
            expected: len,
            actual: src.remaining(),
        });
    }
    Ok(Some(src.split_to(len)))
}

/// Write a length-encoded byte string.
pub fn write_lenenc_bytes(dst: &mut impl BufMut, value: &[u8]) {
    write_lenenc_int(dst, value.len() as u64);
    dst.put_slice(value);
}

/// Skip a length-encoded byte string (NULL counts as skipped).
///
/// # Errors
///
/// Returns [`ProtocolError::Incomplete`] when the buffer ends inside the
/// encoding.
pub fn skip_lenenc_bytes(src: &mut Bytes) -> Result<(), ProtocolError> {
    read_lenenc_bytes(src).map(|_| ())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    fn roundtrip(value: u64) -> u64 {
        let mut buf = BytesMut::new();
        write_lenenc_int(&mut buf, value);
        let mut bytes = buf.freeze();
        let decoded = read_lenenc_int(&mut bytes).unwrap().unwrap();
        assert!(bytes.is_empty(), "trailing bytes after {value}");
        decoded
    }

    #[test]
    fn lenenc_int_boundaries() {
        for value in [
            0,
            1,
            0xFA,
            0xFB,
            0xFF,
            0xFFFF,
            0x1_0000,
            0xFF_FFFF,
            0x100_0000,
            u64::MAX,
        ] {
            assert_eq!(roundtrip(value), value);
        }
    }

    #[test]
    fn lenenc_int_encoded_widths() {
        let widths = [(0xFAu64, 1usize), (0xFB, 3), (0xFFFF, 3), (0x1_0000, 4), (0x100_0000, 9)];
        for (value, width) in widths {
            let mut buf = BytesMut::new();
            write_lenenc_int(&mut buf, value);
            assert_eq!(buf.len(), width, "width for {value:#x}");
        }
    }

    #[test]
    fn null_marker_reads_as_none() {
        let mut bytes = Bytes::from_static(&[NULL_VALUE]);
        assert_eq!(read_lenenc_int(&mut bytes).unwrap(), None);

        let mut bytes = Bytes::from_static(&[NULL_VALUE]);
        assert_eq!(read_lenenc_bytes(&mut bytes).unwrap(), None);
    }

    #[test]
    fn err_prefix_rejected() {
        let mut bytes = Bytes::from_static(&[0xFF]);
        assert!(read_lenenc_int(&mut bytes).is_err());
    }

    #[test]
    fn lenenc_bytes_roundtrip() {
        let mut buf = BytesMut::new();
        write_lenenc_bytes(&mut buf, b"hello");
        let mut bytes = buf.freeze();
        let decoded = read_lenenc_bytes(&mut bytes).unwrap().unwrap();
        assert_eq!(&decoded[..], b"hello");
    }

    #[test]
    fn truncated_payload_rejected() {
        let mut bytes = Bytes::from_static(&[0x05, b'a', b'b']);
        assert!(read_lenenc_bytes(&mut bytes).is_err());
    }
}
