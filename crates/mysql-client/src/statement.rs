//! Server-side prepared statements.

use bytes::{BufMut, BytesMut};
use mysql_protocol::command::Command;
use mysql_types::{Value, binary_wire_type, encode_binary_value};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::cancel::Context;
use crate::conn::{Conn, ExecResult};
use crate::error::{Error, Result};
use crate::rows::{RowFormat, Rows};

/// A prepared statement bound to its connection.
///
/// The statement id is a server-side handle; it becomes invalid when the
/// owning connection closes, and any use after that fails with
/// [`Error::InvalidConnection`] without touching the network.
pub struct Statement<'c, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    conn: &'c mut Conn<T>,
    id: u32,
    param_count: usize,
    column_count: usize,
}

impl<'c, T> Statement<'c, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(
        conn: &'c mut Conn<T>,
        id: u32,
        param_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            conn,
            id,
            param_count,
            column_count,
        }
    }

    /// The server-assigned statement id.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Number of `?` parameters the statement was prepared with.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Number of columns in the statement's result set, zero for
    /// statements that return no rows.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Execute the statement, discarding any rows it returns.
    pub async fn execute(&mut self, ctx: &Context, args: &[Value]) -> Result<ExecResult> {
        self.conn.watch_cancel(ctx).await?;
        let res = self.execute_inner(args).await;
        self.conn.finish();
        res
    }

    /// Execute the statement and stream its result set, rows arriving in
    /// the binary protocol.
    pub async fn query(&mut self, ctx: &Context, args: &[Value]) -> Result<Rows<'_, T>> {
        self.conn.watch_cancel(ctx).await?;
        match self.query_inner(args).await {
            Ok((columns, done)) => {
                let mut rows = Rows::new(&mut *self.conn, columns, RowFormat::Binary, done);
                if done {
                    rows.auto_advance().await?;
                }
                Ok(rows)
            }
            Err(e) => {
                self.conn.finish();
                Err(e)
            }
        }
    }

    /// Destroy the statement server-side.
    ///
    /// Fire-and-forget per protocol: no response is read. On a closed
    /// connection this fails with [`Error::InvalidConnection`] and performs
    /// no network write.
    pub async fn close(self) -> Result<()> {
        if self.conn.shared_closed() {
            return Err(Error::InvalidConnection);
        }
        self.conn.write_stmt_close(self.id).await
    }

    async fn execute_inner(&mut self, args: &[Value]) -> Result<ExecResult> {
        if self.conn.shared_closed() {
            return Err(Error::InvalidConnection);
        }
        self.conn.reset_command_counters();
        self.write_execute(args).await?;

        let count = self.conn.read_result_set_header().await?;
        if count > 0 {
            self.conn.read_until_eof().await?; // column definitions
            self.conn.read_until_eof().await?; // rows
        }
        self.conn.discard_results().await?;
        Ok(self.conn.exec_result())
    }

    async fn query_inner(&mut self, args: &[Value]) -> Result<(Vec<mysql_protocol::Field>, bool)> {
        if self.conn.shared_closed() {
            return Err(Error::InvalidConnection);
        }
        self.conn.reset_command_counters();
        self.write_execute(args).await?;

        let count = self.conn.read_result_set_header().await?;
        if count == 0 {
            return Ok((Vec::new(), true));
        }
        let columns = self.conn.read_columns(count).await?;
        Ok((columns, false))
    }

    /// Encode and send the statement-execute command: statement id, cursor
    /// flags, iteration count, then the null bitmap, the new-params-bound
    /// flag, the parameter wire types, and the binary-encoded values.
    async fn write_execute(&mut self, args: &[Value]) -> Result<()> {
        if args.len() != self.param_count {
            return Err(Error::ArgumentMismatch);
        }

        let time_zone = self.conn.config().time_zone;
        let mut payload = BytesMut::with_capacity(16 + args.len() * 10);
        payload.put_u8(Command::StmtExecute as u8);
        payload.put_u32_le(self.id);
        payload.put_u8(0); // no cursor
        payload.put_u32_le(1); // iteration count, always 1

        if !args.is_empty() {
            let mask_start = payload.len();
            let mask_len = (args.len() + 7) / 8;
            payload.resize(mask_start + mask_len, 0);
            payload.put_u8(1); // new params bound

            for arg in args {
                let (field_type, flag) = binary_wire_type(arg);
                payload.put_u8(field_type as u8);
                payload.put_u8(flag);
            }
            for (i, arg) in args.iter().enumerate() {
                if arg.is_null() {
                    payload[mask_start + i / 8] |= 1 << (i % 8);
                } else {
                    encode_binary_value(&mut payload, arg, time_zone);
                }
            }
        }

        self.conn.write_command_payload(payload.freeze()).await
    }
}

impl<T> std::fmt::Debug for Statement<'_, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statement")
            .field("id", &self.id)
            .field("param_count", &self.param_count)
            .field("column_count", &self.column_count)
            .finish_non_exhaustive()
    }
}
