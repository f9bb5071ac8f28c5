//! Lazily streamed result sets.

use bytes::Bytes;
use mysql_protocol::column::Field;
use mysql_protocol::flags::StatusFlags;
use mysql_protocol::io::read_lenenc_bytes;
use mysql_protocol::response::{ERR_HEADER, OK_HEADER, is_eof_packet};
use mysql_types::{Value, decode_binary_value};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::conn::Conn;
use crate::error::{Error, Result};

/// Wire format of the rows in a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowFormat {
    /// Text protocol: every value is a length-encoded string.
    Text,
    /// Binary protocol, used by prepared-statement results.
    Binary,
}

/// A streaming result set.
///
/// Rows are read lazily from the connection as [`Rows::next`] is called.
/// A result set must be fully consumed or explicitly [closed](Rows::close)
/// before the connection can run another command; dropping it mid-stream
/// only releases the cancellation watcher, it cannot drain the wire.
pub struct Rows<'c, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    conn: &'c mut Conn<T>,
    columns: Vec<Field>,
    format: RowFormat,
    done: bool,
    finished: bool,
}

impl<'c, T> Rows<'c, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(
        conn: &'c mut Conn<T>,
        columns: Vec<Field>,
        format: RowFormat,
        done: bool,
    ) -> Self {
        Self {
            conn,
            columns,
            format,
            done,
            finished: false,
        }
    }

    /// Column metadata for the current result set.
    #[must_use]
    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    /// Whether the current result set has been fully read.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Read the next row of the current result set.
    ///
    /// Returns `Ok(None)` at the end of the result set; use
    /// [`Rows::next_result_set`] to advance past it when the server has
    /// more queued.
    pub async fn next(&mut self) -> Result<Option<Vec<Value>>> {
        if self.done {
            return Ok(None);
        }

        let payload = match self.conn.read_packet().await {
            Ok(payload) => payload,
            Err(e) => {
                self.done = true;
                self.release_watcher();
                return Err(e);
            }
        };

        if is_eof_packet(&payload) {
            if let Err(e) = self.conn.apply_eof(payload) {
                self.done = true;
                self.release_watcher();
                return Err(e);
            }
            self.done = true;
            if !self.conn.status().contains(StatusFlags::MORE_RESULTS_EXISTS) {
                self.release_watcher();
            }
            return Ok(None);
        }
        if payload.first() == Some(&ERR_HEADER) {
            self.done = true;
            let err = self.conn.server_error(payload);
            self.release_watcher();
            return Err(err);
        }

        match self.format {
            RowFormat::Text => self.decode_text_row(payload),
            RowFormat::Binary => self.decode_binary_row(payload),
        }
    }

    /// Advance to the next result set.
    ///
    /// Unread rows of the current set are drained first. Returns `false`
    /// when the server has no further result sets.
    pub async fn next_result_set(&mut self) -> Result<bool> {
        loop {
            if !self.done {
                self.conn.read_until_eof().await?;
                self.done = true;
            }
            if !self.conn.status().contains(StatusFlags::MORE_RESULTS_EXISTS) {
                self.release_watcher();
                return Ok(false);
            }

            let count = self.conn.read_result_set_header().await?;
            if count == 0 {
                // An empty result set in the chain; keep advancing.
                continue;
            }
            self.columns = self.conn.read_columns(count).await?;
            self.done = false;
            return Ok(true);
        }
    }

    /// Advance past an empty leading result set, so the caller never sees
    /// it. A lone empty result set stays terminal.
    pub(crate) async fn auto_advance(&mut self) -> Result<()> {
        self.next_result_set().await.map(|_| ())
    }

    /// Drain everything left in this result set chain and release the
    /// connection.
    pub async fn close(mut self) -> Result<()> {
        let res = self.drain().await;
        self.release_watcher();
        res
    }

    async fn drain(&mut self) -> Result<()> {
        if !self.done {
            self.conn.read_until_eof().await?;
            self.done = true;
        }
        self.conn.discard_results().await
    }

    fn decode_text_row(&mut self, mut payload: Bytes) -> Result<Option<Vec<Value>>> {
        let count = self.columns.len();
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            match read_lenenc_bytes(&mut payload) {
                Ok(Some(bytes)) => values.push(Value::Bytes(bytes)),
                Ok(None) => values.push(Value::Null),
                Err(e) => {
                    tracing::debug!(error = %e, "malformed text row");
                    return self.poison();
                }
            }
        }
        Ok(Some(values))
    }

    fn decode_binary_row(&mut self, payload: Bytes) -> Result<Option<Vec<Value>>> {
        // Header byte, then the null bitmap with its two-bit offset.
        let count = self.columns.len();
        let mask_len = (count + 7 + 2) / 8;
        if payload.first() != Some(&OK_HEADER) || payload.len() < 1 + mask_len {
            tracing::debug!("malformed binary row");
            return self.poison();
        }
        let mask = payload.slice(1..1 + mask_len);
        let mut rest = payload.slice(1 + mask_len..);

        let mut values = Vec::with_capacity(count);
        for i in 0..count {
            let bit = i + 2;
            if mask[bit / 8] & (1 << (bit % 8)) != 0 {
                values.push(Value::Null);
                continue;
            }
            match decode_binary_value(&mut rest, &self.columns[i]) {
                Ok(value) => values.push(value),
                Err(e) => {
                    tracing::debug!(error = %e, column = %self.columns[i].name, "malformed binary row");
                    return self.poison();
                }
            }
        }
        Ok(Some(values))
    }

    /// A row failed to decode: the result set aborts and the connection is
    /// marked bad.
    fn poison(&mut self) -> Result<Option<Vec<Value>>> {
        self.done = true;
        self.conn.cleanup();
        self.release_watcher();
        Err(Error::BadConnection)
    }

    /// Hand the cancellation watcher back for reuse. Idempotent.
    fn release_watcher(&mut self) {
        if !self.finished {
            self.finished = true;
            self.conn.finish();
        }
    }
}

impl<T> Drop for Rows<'_, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    fn drop(&mut self) {
        self.release_watcher();
    }
}

impl<T> std::fmt::Debug for Rows<'_, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows")
            .field("columns", &self.columns.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
