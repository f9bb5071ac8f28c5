//! Transaction support.

use tokio::io::{AsyncRead, AsyncWrite};

use crate::conn::Conn;
use crate::error::{Error, Result};

/// Transaction isolation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsolationLevel {
    /// Read uncommitted (dirty reads allowed).
    ReadUncommitted,
    /// Read committed.
    ReadCommitted,
    /// Repeatable read (the server default).
    #[default]
    RepeatableRead,
    /// Serializable (highest isolation).
    Serializable,
}

impl IsolationLevel {
    /// The level's SQL spelling, as used in
    /// `SET TRANSACTION ISOLATION LEVEL ...`.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        }
    }
}

/// An open transaction.
///
/// A thin marker over the connection between a begin and its commit or
/// rollback: the protocol allows one open transaction per connection, and
/// the server enforces it. Dropping the guard without committing leaves
/// the transaction open until the connection closes or the next rollback.
pub struct Transaction<'c, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    conn: &'c mut Conn<T>,
}

impl<'c, T> Transaction<'c, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(conn: &'c mut Conn<T>) -> Self {
        Self { conn }
    }

    /// The underlying connection, for running statements inside the
    /// transaction.
    pub fn conn(&mut self) -> &mut Conn<T> {
        self.conn
    }

    /// Commit the transaction.
    pub async fn commit(mut self) -> Result<()> {
        self.complete(b"COMMIT").await
    }

    /// Roll the transaction back.
    pub async fn rollback(mut self) -> Result<()> {
        self.complete(b"ROLLBACK").await
    }

    async fn complete(&mut self, query: &'static [u8]) -> Result<()> {
        if self.conn.shared_closed() {
            return Err(Error::InvalidConnection);
        }
        self.conn.exec_text(query).await
    }
}

impl<T> std::fmt::Debug for Transaction<'_, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction").finish_non_exhaustive()
    }
}
