//! Shared fixtures: captured-byte server responses over an in-memory
//! duplex transport.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use bytes::{BufMut, BytesMut};
use mysql_client::{Config, Conn, Handshake};
use mysql_protocol::column::FieldType;
use mysql_protocol::flags::{CapabilityFlags, FieldFlags, StatusFlags};
use mysql_protocol::io::{write_lenenc_bytes, write_lenenc_int};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

/// A connection over an in-memory duplex pipe plus the server end of it.
pub fn conn_pair() -> (Conn<DuplexStream>, DuplexStream) {
    conn_pair_with_config(Config::new())
}

pub fn conn_pair_with_config(cfg: Config) -> (Conn<DuplexStream>, DuplexStream) {
    let (client, server) = tokio::io::duplex(1 << 20);
    let handshake = Handshake {
        capabilities: CapabilityFlags::PROTOCOL_41
            | CapabilityFlags::TRANSACTIONS
            | CapabilityFlags::MULTI_RESULTS,
        status: StatusFlags::AUTOCOMMIT,
    };
    (Conn::establish(client, cfg, handshake), server)
}

/// Wrap a payload in the packet envelope.
pub fn packet(sequence: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes()[..3]);
    out.push(sequence);
    out.extend_from_slice(payload);
    out
}

pub fn ok_payload(affected_rows: u64, last_insert_id: u64, status: StatusFlags) -> Vec<u8> {
    let mut buf = BytesMut::new();
    buf.put_u8(0x00);
    write_lenenc_int(&mut buf, affected_rows);
    write_lenenc_int(&mut buf, last_insert_id);
    buf.put_u16_le(status.bits());
    buf.put_u16_le(0);
    buf.to_vec()
}

pub fn eof_payload(status: StatusFlags) -> Vec<u8> {
    let mut buf = BytesMut::new();
    buf.put_u8(0xFE);
    buf.put_u16_le(0);
    buf.put_u16_le(status.bits());
    buf.to_vec()
}

pub fn err_payload(code: u16, sql_state: &str, message: &str) -> Vec<u8> {
    let mut buf = BytesMut::new();
    buf.put_u8(0xFF);
    buf.put_u16_le(code);
    buf.put_u8(b'#');
    buf.put_slice(sql_state.as_bytes());
    buf.put_slice(message.as_bytes());
    buf.to_vec()
}

/// A `ColumnDefinition41` payload.
pub fn column_payload(name: &str, field_type: FieldType, charset: u16, flags: FieldFlags) -> Vec<u8> {
    let mut buf = BytesMut::new();
    write_lenenc_bytes(&mut buf, b"def");
    write_lenenc_bytes(&mut buf, b"test");
    write_lenenc_bytes(&mut buf, b"t");
    write_lenenc_bytes(&mut buf, b"t");
    write_lenenc_bytes(&mut buf, name.as_bytes());
    write_lenenc_bytes(&mut buf, name.as_bytes());
    buf.put_u8(0x0C);
    buf.put_u16_le(charset);
    buf.put_u32_le(255);
    buf.put_u8(field_type as u8);
    buf.put_u16_le(flags.bits());
    buf.put_u8(0);
    buf.put_u16_le(0);
    buf.to_vec()
}

/// A text-protocol row: `None` renders the NULL marker.
pub fn text_row_payload(values: &[Option<&[u8]>]) -> Vec<u8> {
    let mut buf = BytesMut::new();
    for value in values {
        match value {
            Some(v) => write_lenenc_bytes(&mut buf, v),
            None => buf.put_u8(0xFB),
        }
    }
    buf.to_vec()
}

/// A prepare-OK payload.
pub fn prepare_ok_payload(id: u32, column_count: u16, param_count: u16) -> Vec<u8> {
    let mut buf = BytesMut::new();
    buf.put_u8(0x00);
    buf.put_u32_le(id);
    buf.put_u16_le(column_count);
    buf.put_u16_le(param_count);
    buf.put_u8(0x00);
    buf.put_u16_le(0);
    buf.to_vec()
}

/// Pre-load a scripted server response (a sequence of packets).
pub async fn script(server: &mut DuplexStream, packets: &[Vec<u8>]) {
    for bytes in packets {
        server.write_all(bytes).await.unwrap();
    }
}

/// Read one packet off the server end and assert its payload.
pub async fn expect_command(server: &mut DuplexStream, expected_payload: &[u8]) {
    let mut header = [0u8; 4];
    server.read_exact(&mut header).await.unwrap();
    let length = u32::from_le_bytes([header[0], header[1], header[2], 0]) as usize;
    assert_eq!(
        length,
        expected_payload.len(),
        "unexpected command payload length"
    );

    let mut payload = vec![0u8; length];
    server.read_exact(&mut payload).await.unwrap();
    assert_eq!(payload, expected_payload);
}

/// Read and discard one packet off the server end, returning its payload.
pub async fn read_command(server: &mut DuplexStream) -> Vec<u8> {
    let mut header = [0u8; 4];
    server.read_exact(&mut header).await.unwrap();
    let length = u32::from_le_bytes([header[0], header[1], header[2], 0]) as usize;
    let mut payload = vec![0u8; length];
    server.read_exact(&mut payload).await.unwrap();
    payload
}
