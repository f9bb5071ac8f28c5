//! Reusable wire buffer with exclusive checkout.
//!
//! A connection owns exactly one [`WireBuffer`], used both for assembling
//! outgoing payloads and for building interpolated statements without a
//! fresh allocation per command. Checkout is exclusive and fails fast: at
//! most one in-flight operation may hold the buffer, so no caller ever
//! observes another operation's partially written bytes.

use bytes::BytesMut;

use crate::error::CodecError;

/// Initial capacity of the wire buffer.
const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// A reusable byte buffer with single-holder checkout.
#[derive(Debug)]
pub struct WireBuffer {
    slot: Option<BytesMut>,
}

impl WireBuffer {
    /// Create a wire buffer with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Some(BytesMut::with_capacity(DEFAULT_BUFFER_CAPACITY)),
        }
    }

    /// Take exclusive ownership of the buffer.
    ///
    /// The returned buffer is empty. Ownership must be returned with
    /// [`WireBuffer::release`] once the operation completes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::BufferBusy`] if the buffer is already checked
    /// out.
    pub fn checkout(&mut self) -> Result<BytesMut, CodecError> {
        match self.slot.take() {
            Some(mut buf) => {
                buf.clear();
                Ok(buf)
            }
            None => Err(CodecError::BufferBusy),
        }
    }

    /// Return ownership of a previously checked-out buffer.
    pub fn release(&mut self, buf: BytesMut) {
        self.slot = Some(buf);
    }

    /// Whether the buffer is currently checked out.
    #[must_use]
    pub fn is_checked_out(&self) -> bool {
        self.slot.is_none()
    }
}

impl Default for WireBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn checkout_is_exclusive() {
        let mut wire = WireBuffer::new();
        let buf = wire.checkout().unwrap();
        assert!(wire.is_checked_out());
        assert!(matches!(wire.checkout(), Err(CodecError::BufferBusy)));

        wire.release(buf);
        assert!(!wire.is_checked_out());
        assert!(wire.checkout().is_ok());
    }

    #[test]
    fn checkout_returns_an_empty_buffer() {
        let mut wire = WireBuffer::new();
        let mut buf = wire.checkout().unwrap();
        buf.extend_from_slice(b"leftover");
        wire.release(buf);

        let buf = wire.checkout().unwrap();
        assert!(buf.is_empty());
    }
}
