//! Client command codes.

use crate::error::ProtocolError;

/// Command byte sent as the first byte of every client request payload.
///
/// Values match the upstream text protocol documentation; several are
/// server-internal and never sent by a client, but are kept so a raw byte
/// can always be named in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Close the connection.
    Quit = 0x01,
    /// Change the default schema.
    InitDb = 0x02,
    /// Execute a text-protocol SQL statement immediately.
    Query = 0x03,
    /// List a table's fields.
    FieldList = 0x04,
    /// Create a schema.
    CreateDb = 0x05,
    /// Drop a schema.
    DropDb = 0x06,
    /// Flush server caches.
    Refresh = 0x07,
    /// Shut the server down.
    Shutdown = 0x08,
    /// Fetch server statistics.
    Statistics = 0x09,
    /// List active server threads.
    ProcessInfo = 0x0A,
    /// Server-internal.
    Connect = 0x0B,
    /// Kill a connection.
    ProcessKill = 0x0C,
    /// Dump server debug info.
    Debug = 0x0D,
    /// Keepalive check.
    Ping = 0x0E,
    /// Server-internal.
    Time = 0x0F,
    /// Server-internal.
    DelayedInsert = 0x10,
    /// Re-authenticate without reconnecting.
    ChangeUser = 0x11,
    /// Request a binlog stream.
    BinlogDump = 0x12,
    /// Dump a table.
    TableDump = 0x13,
    /// Server-internal.
    ConnectOut = 0x14,
    /// Register a replica with the source.
    RegisterReplica = 0x15,
    /// Prepare a statement server-side.
    StmtPrepare = 0x16,
    /// Execute a prepared statement.
    StmtExecute = 0x17,
    /// Stream long parameter data for a prepared statement.
    StmtSendLongData = 0x18,
    /// Destroy a prepared statement.
    StmtClose = 0x19,
    /// Reset a prepared statement's parameter buffers.
    StmtReset = 0x1A,
    /// Toggle a connection option.
    SetOption = 0x1B,
    /// Fetch rows from a prepared-statement cursor.
    StmtFetch = 0x1C,
}

impl Command {
    /// Create a command from its raw byte value.
    ///
    /// # Errors
    ///
    /// Returns an error for byte values with no assigned command.
    pub fn from_u8(value: u8) -> Result<Self, ProtocolError> {
        match value {
            0x01 => Ok(Self::Quit),
            0x02 => Ok(Self::InitDb),
            0x03 => Ok(Self::Query),
            0x04 => Ok(Self::FieldList),
            0x05 => Ok(Self::CreateDb),
            0x06 => Ok(Self::DropDb),
            0x07 => Ok(Self::Refresh),
            0x08 => Ok(Self::Shutdown),
            0x09 => Ok(Self::Statistics),
            0x0A => Ok(Self::ProcessInfo),
            0x0B => Ok(Self::Connect),
            0x0C => Ok(Self::ProcessKill),
            0x0D => Ok(Self::Debug),
            0x0E => Ok(Self::Ping),
            0x0F => Ok(Self::Time),
            0x10 => Ok(Self::DelayedInsert),
            0x11 => Ok(Self::ChangeUser),
            0x12 => Ok(Self::BinlogDump),
            0x13 => Ok(Self::TableDump),
            0x14 => Ok(Self::ConnectOut),
            0x15 => Ok(Self::RegisterReplica),
            0x16 => Ok(Self::StmtPrepare),
            0x17 => Ok(Self::StmtExecute),
            0x18 => Ok(Self::StmtSendLongData),
            0x19 => Ok(Self::StmtClose),
            0x1A => Ok(Self::StmtReset),
            0x1B => Ok(Self::SetOption),
            0x1C => Ok(Self::StmtFetch),
            _ => Err(ProtocolError::UnknownCommand(value)),
        }
    }

    /// The protocol-level name of this command, for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quit => "COM_QUIT",
            Self::InitDb => "COM_INIT_DB",
            Self::Query => "COM_QUERY",
            Self::FieldList => "COM_FIELD_LIST",
            Self::CreateDb => "COM_CREATE_DB",
            Self::DropDb => "COM_DROP_DB",
            Self::Refresh => "COM_REFRESH",
            Self::Shutdown => "COM_SHUTDOWN",
            Self::Statistics => "COM_STATISTICS",
            Self::ProcessInfo => "COM_PROCESS_INFO",
            Self::Connect => "COM_CONNECT",
            Self::ProcessKill => "COM_PROCESS_KILL",
            Self::Debug => "COM_DEBUG",
            Self::Ping => "COM_PING",
            Self::Time => "COM_TIME",
            Self::DelayedInsert => "COM_DELAYED_INSERT",
            Self::ChangeUser => "COM_CHANGE_USER",
            Self::BinlogDump => "COM_BINLOG_DUMP",
            Self::TableDump => "COM_TABLE_DUMP",
            Self::ConnectOut => "COM_CONNECT_OUT",
            Self::RegisterReplica => "COM_REGISTER_SLAVE",
            Self::StmtPrepare => "COM_STMT_PREPARE",
            Self::StmtExecute => "COM_STMT_EXECUTE",
            Self::StmtSendLongData => "COM_STMT_SEND_LONG_DATA",
            Self::StmtClose => "COM_STMT_CLOSE",
            Self::StmtReset => "COM_STMT_RESET",
            Self::SetOption => "COM_SET_OPTION",
            Self::StmtFetch => "COM_STMT_FETCH",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn command_values_match_wire() {
        assert_eq!(Command::Quit as u8, 0x01);
        assert_eq!(Command::Query as u8, 0x03);
        assert_eq!(Command::Ping as u8, 0x0E);
        assert_eq!(Command::StmtPrepare as u8, 0x16);
        assert_eq!(Command::StmtExecute as u8, 0x17);
        assert_eq!(Command::StmtClose as u8, 0x19);
    }

    #[test]
    fn command_from_u8() {
        assert_eq!(Command::from_u8(0x03).unwrap(), Command::Query);
        assert_eq!(Command::from_u8(0x0E).unwrap(), Command::Ping);
        assert!(Command::from_u8(0x00).is_err());
        assert!(Command::from_u8(0xFF).is_err());
    }

    #[test]
    fn command_names() {
        assert_eq!(Command::Query.name(), "COM_QUERY");
        assert_eq!(Command::StmtClose.name(), "COM_STMT_CLOSE");
    }
}
