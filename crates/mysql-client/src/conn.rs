//! The connection engine: command dispatch and response streaming.

use std::sync::Arc;

use bytes::{Buf, BufMut, Bytes};
use mysql_codec::{PacketCodec, PacketStream, WireBuffer};
use mysql_codec::error::CodecError;
use mysql_protocol::column::Field;
use mysql_protocol::command::Command;
use mysql_protocol::flags::{CapabilityFlags, StatusFlags};
use mysql_protocol::io::{read_lenenc_bytes, read_lenenc_int};
use mysql_protocol::response::{
    EOF_HEADER, ERR_HEADER, EofPacket, ErrPacket, LOCAL_INFILE_HEADER, OK_HEADER, OkPacket,
    is_eof_packet,
};
use mysql_types::Value;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::cancel::{Context, Shared, WatcherHandle, spawn_watcher};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::interpolate::interpolate_params;
use crate::rows::{RowFormat, Rows};
use crate::statement::Statement;
use crate::transaction::{IsolationLevel, Transaction};

/// Outcome of the authentication handshake, performed outside this crate.
#[derive(Debug, Clone, Copy)]
pub struct Handshake {
    /// Capability flags negotiated with the server.
    pub capabilities: CapabilityFlags,
    /// Initial server status.
    pub status: StatusFlags,
}

/// Result of a statement that returns no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Rows affected by the statement.
    pub affected_rows: u64,
    /// Last value generated for an AUTO_INCREMENT column.
    pub last_insert_id: u64,
}

/// A single MySQL connection.
///
/// One logical holder drives all protocol I/O: the engine provides no
/// internal locking for concurrent callers, which the `&mut self` receivers
/// enforce at compile time. The only second task per connection is the
/// cancellation watcher, which never writes protocol bytes.
pub struct Conn<T> {
    stream: PacketStream<T>,
    buffer: WireBuffer,
    cfg: Config,
    capabilities: CapabilityFlags,
    status: StatusFlags,
    affected_rows: u64,
    last_insert_id: u64,
    shared: Arc<Shared>,
    watcher: Option<WatcherHandle>,
    watching: bool,
}

impl<T> Conn<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an authenticated transport in a connection engine.
    #[must_use]
    pub fn establish(transport: T, cfg: Config, handshake: Handshake) -> Self {
        let codec = PacketCodec::new().with_max_allowed_packet(cfg.max_allowed_packet);
        Self {
            stream: PacketStream::with_codec(transport, codec),
            buffer: WireBuffer::new(),
            capabilities: handshake.capabilities,
            status: handshake.status,
            affected_rows: 0,
            last_insert_id: 0,
            shared: Arc::new(Shared::new()),
            watcher: None,
            watching: false,
            cfg,
        }
    }

    /// The negotiated capability flags.
    #[must_use]
    pub fn capabilities(&self) -> CapabilityFlags {
        self.capabilities
    }

    /// The server status reported by the most recent response.
    #[must_use]
    pub fn status(&self) -> StatusFlags {
        self.status
    }

    /// Rows affected by the most recent command.
    #[must_use]
    pub fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    /// Last insert id reported by the most recent command.
    #[must_use]
    pub fn last_insert_id(&self) -> u64 {
        self.last_insert_id
    }

    /// Whether the connection has been closed or canceled.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    // ------------------------------------------------------------------
    // Public operations
    // ------------------------------------------------------------------

    /// Send a keepalive and wait for the server's OK.
    pub async fn ping(&mut self, ctx: &Context) -> Result<()> {
        self.watch_cancel(ctx).await?;
        let res = self.ping_inner().await;
        self.finish();
        res
    }

    /// Execute a statement, discarding any rows it returns.
    ///
    /// With a non-empty `args`, the query is interpolated client-side when
    /// the configuration allows it; otherwise the call fails and the caller
    /// should prepare the statement instead.
    pub async fn exec(&mut self, ctx: &Context, query: &str, args: &[Value]) -> Result<ExecResult> {
        self.watch_cancel(ctx).await?;
        let res = self.exec_with_args(query, args).await;
        self.finish();
        res
    }

    /// Execute a query and stream its result set lazily.
    ///
    /// An empty leading result set with more results pending is advanced
    /// over transparently; a lone empty result set yields a terminal
    /// [`Rows`] with no columns.
    pub async fn query(&mut self, ctx: &Context, query: &str, args: &[Value]) -> Result<Rows<'_, T>> {
        self.watch_cancel(ctx).await?;
        match self.query_inner(query, args).await {
            Ok((columns, done)) => {
                let mut rows = Rows::new(self, columns, RowFormat::Text, done);
                if done {
                    rows.auto_advance().await?;
                }
                Ok(rows)
            }
            Err(e) => {
                self.finish();
                Err(e)
            }
        }
    }

    /// Start a transaction.
    pub async fn begin(&mut self, ctx: &Context, read_only: bool) -> Result<Transaction<'_, T>> {
        self.begin_with(ctx, None, read_only).await
    }

    /// Start a transaction at an explicit isolation level.
    pub async fn begin_with_isolation(
        &mut self,
        ctx: &Context,
        level: IsolationLevel,
        read_only: bool,
    ) -> Result<Transaction<'_, T>> {
        self.begin_with(ctx, Some(level), read_only).await
    }

    /// Prepare a statement server-side.
    pub async fn prepare(&mut self, ctx: &Context, query: &str) -> Result<Statement<'_, T>> {
        self.watch_cancel(ctx).await?;
        let res = self.prepare_inner(query).await;
        self.finish();
        let (id, param_count, column_count) = res?;
        Ok(Statement::new(self, id, param_count, column_count))
    }

    /// Fetch the raw value of a server system variable.
    pub async fn get_system_variable(&mut self, ctx: &Context, name: &str) -> Result<Bytes> {
        self.watch_cancel(ctx).await?;
        let res = self.get_system_variable_inner(name).await;
        self.finish();
        res
    }

    /// Apply session parameters after the handshake.
    ///
    /// The `charset` key holds comma-separated candidates tried with
    /// `SET NAMES` until one succeeds; every other key is batched into a
    /// single `SET` statement.
    pub async fn set_session_params(
        &mut self,
        ctx: &Context,
        params: &[(&str, &str)],
    ) -> Result<()> {
        self.watch_cancel(ctx).await?;
        let res = self.set_session_params_inner(params).await;
        self.finish();
        res
    }

    /// Mark the connection for reuse, clearing per-command bookkeeping.
    pub fn reset_session(&mut self) -> Result<()> {
        if self.shared.is_closed() {
            return Err(Error::BadConnection);
        }
        self.affected_rows = 0;
        self.last_insert_id = 0;
        Ok(())
    }

    /// Close the connection.
    ///
    /// A best-effort quit command is sent first; a failure to send it is
    /// surfaced once and otherwise swallowed; the connection is torn down
    /// regardless, and close is idempotent.
    pub async fn close(&mut self) -> Result<()> {
        let mut result = Ok(());
        if !self.shared.is_closed() {
            if let Err(e) = self.write_command(Command::Quit, &[]).await {
                tracing::warn!(error = %e, "failed to send quit command during close");
                result = Err(e);
            }
        }
        self.cleanup();
        result
    }

    // ------------------------------------------------------------------
    // Cancellation plumbing
    // ------------------------------------------------------------------

    /// Register the operation's cancellation context with the watcher.
    pub(crate) async fn watch_cancel(&mut self, ctx: &Context) -> Result<()> {
        if self.watching {
            // Still armed from a previous operation: that cancellation
            // already won, so the connection is invalid.
            self.cleanup();
            return Ok(());
        }
        let Some(token) = ctx.token() else {
            return Ok(());
        };
        if token.is_cancelled() {
            return Err(Error::Canceled);
        }

        let shared = Arc::clone(&self.shared);
        let watcher = self.watcher.get_or_insert_with(|| spawn_watcher(shared));
        if watcher.register(token.clone()).await {
            self.watching = true;
        }
        Ok(())
    }

    /// Signal the watcher that the current operation completed.
    pub(crate) fn finish(&mut self) {
        if !self.watching {
            return;
        }
        if let Some(watcher) = &self.watcher {
            if watcher.finish() {
                self.watching = false;
            }
        }
    }

    /// Tear the connection down. Idempotent.
    pub(crate) fn cleanup(&mut self) {
        if self.shared.force_close() {
            tracing::debug!("connection closed");
        }
    }

    /// The error reported for operations on a closed connection: the
    /// stored cancellation cause once, [`Error::InvalidConnection`] for a
    /// canceled connection afterwards, and [`Error::BadConnection`] for a
    /// plainly closed one (safe to retry elsewhere).
    pub(crate) fn closed_error(&self) -> Error {
        if let Some(e) = self.shared.take_canceled() {
            return e;
        }
        if self.shared.was_canceled() {
            Error::InvalidConnection
        } else {
            Error::BadConnection
        }
    }

    pub(crate) fn shared_closed(&self) -> bool {
        self.shared.is_closed()
    }

    pub(crate) fn config(&self) -> &Config {
        &self.cfg
    }

    // ------------------------------------------------------------------
    // Low-level I/O
    // ------------------------------------------------------------------

    /// Write one logical payload, racing the shutdown token so a forced
    /// close unblocks the holder immediately.
    async fn write_payload(&mut self, payload: Bytes) -> Result<()> {
        let shutdown = self.shared.shutdown_token();
        let sent = tokio::select! {
            biased;
            () = shutdown.cancelled() => return Err(self.closed_error()),
            sent = self.stream.send_payload(payload) => sent,
        };
        match sent {
            Ok(()) => Ok(()),
            Err(e @ CodecError::PayloadExceedsMaxPacket { .. }) => Err(Error::Codec(e)),
            Err(e) => {
                tracing::debug!(error = %e, "write failed");
                self.cleanup();
                Err(Error::BadConnection)
            }
        }
    }

    /// Read one logical payload, racing the shutdown token.
    pub(crate) async fn read_packet(&mut self) -> Result<Bytes> {
        let shutdown = self.shared.shutdown_token();
        let received = tokio::select! {
            biased;
            () = shutdown.cancelled() => return Err(self.closed_error()),
            received = self.stream.next_payload() => received,
        };
        match received {
            Ok(Some(payload)) => Ok(payload),
            Ok(None) => {
                tracing::debug!("connection closed by server");
                self.cleanup();
                Err(Error::BadConnection)
            }
            Err(e) if e.is_desync() => {
                tracing::error!(error = %e, "protocol desynchronization");
                self.cleanup();
                Err(Error::Codec(e))
            }
            Err(e) => {
                tracing::debug!(error = %e, "read failed");
                self.cleanup();
                Err(Error::BadConnection)
            }
        }
    }

    /// Send a complete command payload, resetting the packet sequence.
    pub(crate) async fn write_command_payload(&mut self, payload: Bytes) -> Result<()> {
        if self.shared.is_closed() {
            return Err(self.closed_error());
        }
        self.stream.codec_mut().reset_sequence();
        self.write_payload(payload).await
    }

    /// Send a command with an inline argument.
    pub(crate) async fn write_command(&mut self, cmd: Command, arg: &[u8]) -> Result<()> {
        if self.shared.is_closed() {
            return Err(self.closed_error());
        }
        let mut buf = self
            .buffer
            .checkout()
            .map_err(|_| Error::InvalidConnection)?;
        buf.put_u8(cmd as u8);
        buf.put_slice(arg);
        let payload = buf.split().freeze();
        let res = self.write_command_payload(payload).await;
        self.buffer.release(buf);
        if res.is_ok() {
            tracing::debug!(command = cmd.name(), "sent command");
        }
        res
    }

    pub(crate) async fn write_stmt_close(&mut self, id: u32) -> Result<()> {
        self.write_command(Command::StmtClose, &id.to_le_bytes()).await
    }

    // ------------------------------------------------------------------
    // Response handling
    // ------------------------------------------------------------------

    /// Record the contents of an OK packet.
    pub(crate) fn handle_ok(&mut self, payload: Bytes) -> Result<()> {
        match OkPacket::decode(payload) {
            Ok(ok) => {
                self.affected_rows = ok.affected_rows;
                self.last_insert_id = ok.last_insert_id;
                self.status = ok.status;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "malformed OK packet");
                self.cleanup();
                Err(Error::BadConnection)
            }
        }
    }

    /// Turn an ERR payload into a server error. A well-formed server error
    /// leaves the connection usable; a malformed one poisons it.
    pub(crate) fn server_error(&mut self, payload: Bytes) -> Error {
        match ErrPacket::decode(payload) {
            Ok(err) => Error::Server {
                code: err.code,
                sql_state: err.sql_state.unwrap_or_default(),
                message: err.message,
            },
            Err(e) => {
                tracing::debug!(error = %e, "malformed ERR packet");
                self.cleanup();
                Error::BadConnection
            }
        }
    }

    /// Read a response that must be OK or ERR.
    pub(crate) async fn read_result_ok(&mut self) -> Result<()> {
        let payload = self.read_packet().await?;
        match payload.first() {
            Some(&OK_HEADER) => self.handle_ok(payload),
            Some(&ERR_HEADER) => Err(self.server_error(payload)),
            _ => {
                tracing::debug!("unexpected response packet");
                self.cleanup();
                Err(Error::BadConnection)
            }
        }
    }

    /// Read a result-set header: OK (no columns), ERR, a refused
    /// local-infile request, or a column count.
    pub(crate) async fn read_result_set_header(&mut self) -> Result<usize> {
        let mut payload = self.read_packet().await?;
        match payload.first() {
            None => {
                self.cleanup();
                Err(Error::BadConnection)
            }
            Some(&OK_HEADER) => {
                self.handle_ok(payload)?;
                Ok(0)
            }
            Some(&ERR_HEADER) => Err(self.server_error(payload)),
            Some(&LOCAL_INFILE_HEADER) => self.reject_local_infile().await,
            Some(_) => match read_lenenc_int(&mut payload) {
                Ok(Some(count)) if payload.is_empty() => Ok(count as usize),
                _ => {
                    tracing::debug!("malformed result set header");
                    self.cleanup();
                    Err(Error::BadConnection)
                }
            },
        }
    }

    /// Discard packets until the EOF that terminates the current sequence,
    /// keeping the status flags it carries.
    pub(crate) async fn read_until_eof(&mut self) -> Result<()> {
        loop {
            let payload = self.read_packet().await?;
            match payload.first() {
                Some(&ERR_HEADER) => return Err(self.server_error(payload)),
                Some(&EOF_HEADER) if is_eof_packet(&payload) => {
                    self.apply_eof(payload)?;
                    return Ok(());
                }
                _ => {}
            }
        }
    }

    /// Read `count` column definitions and their terminating EOF.
    pub(crate) async fn read_columns(&mut self, count: usize) -> Result<Vec<Field>> {
        let mut fields = Vec::with_capacity(count);
        loop {
            let payload = self.read_packet().await?;
            if is_eof_packet(&payload) {
                self.apply_eof(payload)?;
                if fields.len() != count {
                    tracing::debug!(
                        expected = count,
                        got = fields.len(),
                        "column count mismatch"
                    );
                    self.cleanup();
                    return Err(Error::BadConnection);
                }
                return Ok(fields);
            }
            if payload.first() == Some(&ERR_HEADER) {
                return Err(self.server_error(payload));
            }
            match Field::decode(payload) {
                Ok(field) => fields.push(field),
                Err(e) => {
                    tracing::debug!(error = %e, "malformed column definition");
                    self.cleanup();
                    return Err(Error::BadConnection);
                }
            }
        }
    }

    /// Drain any further result sets the server has queued.
    pub(crate) async fn discard_results(&mut self) -> Result<()> {
        while self.status.contains(StatusFlags::MORE_RESULTS_EXISTS) {
            let count = self.read_result_set_header().await?;
            if count > 0 {
                self.read_until_eof().await?; // column definitions
                self.read_until_eof().await?; // rows
            }
        }
        Ok(())
    }

    pub(crate) fn apply_eof(&mut self, payload: Bytes) -> Result<()> {
        match EofPacket::decode(payload) {
            Ok(eof) => {
                self.status = eof.status;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "malformed EOF packet");
                self.cleanup();
                Err(Error::BadConnection)
            }
        }
    }

    /// Refuse a `LOCAL INFILE` request by sending the empty terminating
    /// packet and draining the server's verdict.
    async fn reject_local_infile(&mut self) -> Result<usize> {
        tracing::warn!("server requested LOCAL INFILE; refusing");
        self.write_payload(Bytes::new()).await?;
        let payload = self.read_packet().await?;
        if payload.first() == Some(&ERR_HEADER) {
            return Err(self.server_error(payload));
        }
        // The server acknowledges the empty transfer with an OK.
        self.handle_ok(payload)?;
        Err(Error::LocalInfileNotSupported)
    }

    // ------------------------------------------------------------------
    // Operation internals
    // ------------------------------------------------------------------

    async fn ping_inner(&mut self) -> Result<()> {
        self.write_command(Command::Ping, &[]).await?;
        self.read_result_ok().await
    }

    /// Execute a literal statement, draining everything it returns.
    pub(crate) async fn exec_text(&mut self, query: &[u8]) -> Result<()> {
        self.write_command(Command::Query, query).await?;
        let count = self.read_result_set_header().await?;
        if count > 0 {
            self.read_until_eof().await?; // column definitions
            self.read_until_eof().await?; // rows
        }
        self.discard_results().await
    }

    async fn exec_with_args(&mut self, query: &str, args: &[Value]) -> Result<ExecResult> {
        if self.shared.is_closed() {
            return Err(self.closed_error());
        }
        let interpolated = self.maybe_interpolate(query, args)?;
        self.reset_command_counters();
        match interpolated {
            Some(literal) => self.exec_text(&literal).await?,
            None => self.exec_text(query.as_bytes()).await?,
        }
        Ok(ExecResult {
            affected_rows: self.affected_rows,
            last_insert_id: self.last_insert_id,
        })
    }

    async fn query_inner(&mut self, query: &str, args: &[Value]) -> Result<(Vec<Field>, bool)> {
        if self.shared.is_closed() {
            return Err(self.closed_error());
        }
        let interpolated = self.maybe_interpolate(query, args)?;
        self.reset_command_counters();
        let literal = interpolated
            .as_deref()
            .unwrap_or_else(|| query.as_bytes());
        self.write_command(Command::Query, literal).await?;

        let count = self.read_result_set_header().await?;
        if count == 0 {
            return Ok((Vec::new(), true));
        }
        let columns = self.read_columns(count).await?;
        Ok((columns, false))
    }

    async fn begin_with(
        &mut self,
        ctx: &Context,
        isolation: Option<IsolationLevel>,
        read_only: bool,
    ) -> Result<Transaction<'_, T>> {
        self.watch_cancel(ctx).await?;
        let res = self.begin_inner(isolation, read_only).await;
        self.finish();
        res?;
        Ok(Transaction::new(self))
    }

    async fn begin_inner(
        &mut self,
        isolation: Option<IsolationLevel>,
        read_only: bool,
    ) -> Result<()> {
        if self.shared.is_closed() {
            return Err(self.closed_error());
        }
        if let Some(level) = isolation {
            let stmt = format!("SET TRANSACTION ISOLATION LEVEL {}", level.as_sql());
            self.exec_text(stmt.as_bytes()).await?;
        }
        let query: &[u8] = if read_only {
            b"START TRANSACTION READ ONLY"
        } else {
            b"START TRANSACTION"
        };
        self.exec_text(query).await
    }

    async fn prepare_inner(&mut self, query: &str) -> Result<(u32, usize, usize)> {
        if self.shared.is_closed() {
            return Err(self.closed_error());
        }
        self.write_command(Command::StmtPrepare, query.as_bytes())
            .await?;

        let mut payload = self.read_packet().await?;
        if payload.first() == Some(&ERR_HEADER) {
            return Err(self.server_error(payload));
        }
        // Prepare-OK: 0x00, statement id, column count, parameter count,
        // one filler byte, warning count.
        if payload.len() < 12 || payload[0] != OK_HEADER {
            tracing::debug!("malformed prepare response");
            self.cleanup();
            return Err(Error::BadConnection);
        }
        payload.advance(1);
        let id = payload.get_u32_le();
        let column_count = usize::from(payload.get_u16_le());
        let param_count = usize::from(payload.get_u16_le());

        if param_count > 0 {
            if let Err(e) = self.read_until_eof().await {
                return self.fail_prepare(id, e).await;
            }
        }
        if column_count > 0 {
            if let Err(e) = self.read_until_eof().await {
                return self.fail_prepare(id, e).await;
            }
        }

        tracing::debug!(id, param_count, column_count, "statement prepared");
        Ok((id, param_count, column_count))
    }

    /// A prepare that failed after the server assigned a statement id:
    /// close the statement best-effort so it is not leaked server-side.
    async fn fail_prepare(&mut self, id: u32, err: Error) -> Result<(u32, usize, usize)> {
        if !self.shared.is_closed() {
            let _ = self.write_stmt_close(id).await;
        }
        Err(err)
    }

    async fn get_system_variable_inner(&mut self, name: &str) -> Result<Bytes> {
        if self.shared.is_closed() {
            return Err(self.closed_error());
        }
        let mut query = Vec::with_capacity(9 + name.len());
        query.extend_from_slice(b"SELECT @@");
        query.extend_from_slice(name.as_bytes());
        self.write_command(Command::Query, &query).await?;

        let count = self.read_result_set_header().await?;
        if count > 0 {
            self.read_until_eof().await?; // the single varchar column
        }

        let mut row = self.read_packet().await?;
        if row.first() == Some(&ERR_HEADER) {
            return Err(self.server_error(row));
        }
        if is_eof_packet(&row) {
            tracing::debug!(name, "system variable query returned no rows");
            self.cleanup();
            return Err(Error::BadConnection);
        }
        let value = match read_lenenc_bytes(&mut row) {
            Ok(bytes) => bytes.unwrap_or_default(),
            Err(e) => {
                tracing::debug!(error = %e, "malformed row");
                self.cleanup();
                return Err(Error::BadConnection);
            }
        };
        self.read_until_eof().await?;
        Ok(value)
    }

    async fn set_session_params_inner(&mut self, params: &[(&str, &str)]) -> Result<()> {
        if self.shared.is_closed() {
            return Err(self.closed_error());
        }

        let mut batched = String::new();
        for (key, value) in params {
            if *key == "charset" {
                // A charset may not exist; only the first working one is
                // needed.
                let mut last = Ok(());
                for charset in value.split(',') {
                    last = self.exec_text(format!("SET NAMES {charset}").as_bytes()).await;
                    match &last {
                        Ok(()) => break,
                        Err(Error::Server { .. }) => {}
                        Err(_) => return last,
                    }
                }
                last?;
            } else {
                if batched.is_empty() {
                    batched.push_str("SET ");
                } else {
                    batched.push(',');
                }
                batched.push_str(key);
                batched.push('=');
                batched.push_str(value);
            }
        }

        if !batched.is_empty() {
            self.exec_text(batched.as_bytes()).await?;
        }
        Ok(())
    }

    /// Interpolate `args` into `query` when present and permitted.
    fn maybe_interpolate(&mut self, query: &str, args: &[Value]) -> Result<Option<Bytes>> {
        if args.is_empty() {
            return Ok(None);
        }
        if !self.cfg.interpolate_params {
            return Err(Error::InterpolationDisabled);
        }
        let mut buf = self
            .buffer
            .checkout()
            .map_err(|_| Error::InvalidConnection)?;
        let res = interpolate_params(
            query,
            args,
            self.status,
            self.cfg.time_zone,
            self.cfg.max_allowed_packet,
            &mut buf,
        );
        let literal = buf.split().freeze();
        self.buffer.release(buf);
        res.map(|()| Some(literal))
    }

    pub(crate) fn reset_command_counters(&mut self) {
        self.affected_rows = 0;
        self.last_insert_id = 0;
    }

    pub(crate) fn exec_result(&self) -> ExecResult {
        ExecResult {
            affected_rows: self.affected_rows,
            last_insert_id: self.last_insert_id,
        }
    }
}

impl<T> std::fmt::Debug for Conn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conn")
            .field("status", &self.status)
            .field("closed", &self.shared.is_closed())
            .field("watching", &self.watching)
            .finish_non_exhaustive()
    }
}
