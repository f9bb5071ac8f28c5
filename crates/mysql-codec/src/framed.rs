//! Framed packet stream for async I/O.
//!
//! [`PacketStream`] wraps a tokio-util [`Framed`] transport and deals in
//! complete logical payloads: fragmentation and sequence numbering are
//! handled by the [`PacketCodec`] underneath.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_util::{Sink, SinkExt, StreamExt};
use pin_project_lite::pin_project;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;

use crate::error::CodecError;
use crate::packet_codec::PacketCodec;

pin_project! {
    /// A framed payload stream over an async I/O transport.
    ///
    /// A single codec instance serves both directions so the packet
    /// sequence counter is shared between writes and reads, as the
    /// protocol requires.
    pub struct PacketStream<T> {
        #[pin]
        inner: Framed<T, PacketCodec>,
    }
}

impl<T> PacketStream<T>
where
    T: AsyncRead + AsyncWrite,
{
    /// Create a new packet stream over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            inner: Framed::new(transport, PacketCodec::new()),
        }
    }

    /// Create a new packet stream with a custom codec.
    pub fn with_codec(transport: T, codec: PacketCodec) -> Self {
        Self {
            inner: Framed::new(transport, codec),
        }
    }

    /// Get a reference to the codec.
    pub fn codec(&self) -> &PacketCodec {
        self.inner.codec()
    }

    /// Get a mutable reference to the codec.
    pub fn codec_mut(&mut self) -> &mut PacketCodec {
        self.inner.codec_mut()
    }

    /// Get a reference to the underlying transport.
    pub fn get_ref(&self) -> &T {
        self.inner.get_ref()
    }

    /// Consume the stream and return the underlying transport.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T> PacketStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Send one logical payload, flushing the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the transport write fails.
    pub async fn send_payload(&mut self, payload: Bytes) -> Result<(), CodecError> {
        self.inner.send(payload).await
    }

    /// Receive the next logical payload.
    ///
    /// Returns `Ok(None)` when the transport closes cleanly between
    /// payloads.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, sequence desynchronization,
    /// or a close mid-payload.
    pub async fn next_payload(&mut self) -> Result<Option<Bytes>, CodecError> {
        self.inner.next().await.transpose()
    }
}

impl<T> Stream for PacketStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    type Item = Result<Bytes, CodecError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }
}

impl<T> Sink<Bytes> for PacketStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    type Error = CodecError;

    fn poll_ready(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.project().inner.poll_ready(cx)
    }

    fn start_send(self: Pin<&mut Self>, item: Bytes) -> Result<(), Self::Error> {
        self.project().inner.start_send(item)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.project().inner.poll_flush(cx)
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.project().inner.poll_close(cx)
    }
}

impl<T> std::fmt::Debug for PacketStream<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacketStream")
            .field("transport", self.inner.get_ref())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn payload_roundtrip_over_duplex() {
        let (a, b) = tokio::io::duplex(64 * 1024);
        let mut writer = PacketStream::new(a);
        let mut reader = PacketStream::new(b);

        writer
            .send_payload(Bytes::from_static(b"\x03SELECT 1"))
            .await
            .unwrap();

        let payload = reader.next_payload().await.unwrap().unwrap();
        assert_eq!(&payload[..], b"\x03SELECT 1");
    }

    #[tokio::test]
    async fn sequence_shared_between_directions() {
        let (a, b) = tokio::io::duplex(64 * 1024);
        let mut client = PacketStream::new(a);
        let mut server = PacketStream::new(b);

        // Client writes the command with sequence 0; the response must be
        // stamped with sequence 1 for the client to accept it.
        client.send_payload(Bytes::from_static(b"\x0E")).await.unwrap();
        assert_eq!(client.codec().sequence(), 1);

        server.next_payload().await.unwrap().unwrap();
        server
            .send_payload(Bytes::from_static(b"\x00\x00\x00\x02\x00\x00\x00"))
            .await
            .unwrap();

        let response = client.next_payload().await.unwrap().unwrap();
        assert_eq!(response[0], 0x00);
        assert_eq!(client.codec().sequence(), 2);
    }

    #[tokio::test]
    async fn clean_close_yields_none() {
        let (a, b) = tokio::io::duplex(1024);
        drop(a);
        let mut reader = PacketStream::new(b);
        assert!(reader.next_payload().await.unwrap().is_none());
    }
}
