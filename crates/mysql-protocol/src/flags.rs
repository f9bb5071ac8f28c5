//! Capability, status, and field flag sets.
//!
//! All three are negotiated or reported as plain little-endian integers on
//! the wire; the bit assignments are fixed by the upstream protocol.

use bitflags::bitflags;

bitflags! {
    /// Capability flags negotiated during the handshake.
    ///
    /// The handshake itself happens outside this crate; the negotiated set
    /// is consumed read-only by the connection engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CapabilityFlags: u32 {
        /// Use the improved password scheme.
        const LONG_PASSWORD = 1 << 0;
        /// Report found rows instead of affected rows.
        const FOUND_ROWS = 1 << 1;
        /// All column flags are sent as two bytes.
        const LONG_FLAG = 1 << 2;
        /// A schema name can be supplied on connect.
        const CONNECT_WITH_DB = 1 << 3;
        /// Do not allow `schema.table.column` syntax.
        const NO_SCHEMA = 1 << 4;
        /// Compression protocol supported.
        const COMPRESS = 1 << 5;
        /// ODBC client.
        const ODBC = 1 << 6;
        /// `LOAD DATA LOCAL INFILE` allowed.
        const LOCAL_FILES = 1 << 7;
        /// Ignore spaces before `(`.
        const IGNORE_SPACE = 1 << 8;
        /// The 4.1 protocol is in use.
        const PROTOCOL_41 = 1 << 9;
        /// Interactive client timeouts apply.
        const INTERACTIVE = 1 << 10;
        /// Switch to TLS after the handshake.
        const SSL = 1 << 11;
        /// Ignore SIGPIPE.
        const IGNORE_SIGPIPE = 1 << 12;
        /// Transaction status flags are understood.
        const TRANSACTIONS = 1 << 13;
        /// Unused, historical.
        const RESERVED = 1 << 14;
        /// 4.1 authentication.
        const SECURE_CONNECTION = 1 << 15;
        /// Multiple statements per query string.
        const MULTI_STATEMENTS = 1 << 16;
        /// Multiple result sets per query.
        const MULTI_RESULTS = 1 << 17;
        /// Multiple result sets from prepared statements.
        const PS_MULTI_RESULTS = 1 << 18;
        /// Pluggable authentication.
        const PLUGIN_AUTH = 1 << 19;
        /// Connection attributes in the handshake.
        const CONNECT_ATTRS = 1 << 20;
        /// Length-encoded authentication response.
        const PLUGIN_AUTH_LENENC_CLIENT_DATA = 1 << 21;
        /// Client can handle expired passwords.
        const CAN_HANDLE_EXPIRED_PASSWORDS = 1 << 22;
        /// Session state change information in OK packets.
        const SESSION_TRACK = 1 << 23;
        /// EOF packets are replaced by OK packets.
        const DEPRECATE_EOF = 1 << 24;
    }
}

bitflags! {
    /// Server status flags, reported in every OK and EOF packet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u16 {
        /// A transaction is active.
        const IN_TRANS = 1 << 0;
        /// Autocommit is enabled.
        const AUTOCOMMIT = 1 << 1;
        /// Not documented upstream.
        const RESERVED = 1 << 2;
        /// Another result set follows the current one.
        const MORE_RESULTS_EXISTS = 1 << 3;
        /// No good index was available for the last query.
        const NO_GOOD_INDEX_USED = 1 << 4;
        /// No index was used for the last query.
        const NO_INDEX_USED = 1 << 5;
        /// A read-only cursor is open.
        const CURSOR_EXISTS = 1 << 6;
        /// The last row of the open cursor has been sent.
        const LAST_ROW_SENT = 1 << 7;
        /// The current schema was dropped.
        const DB_DROPPED = 1 << 8;
        /// Backslash is not an escape character; quotes double instead.
        const NO_BACKSLASH_ESCAPES = 1 << 9;
        /// Prepared-statement metadata changed since prepare.
        const METADATA_CHANGED = 1 << 10;
        /// The last query was logged as slow.
        const QUERY_WAS_SLOW = 1 << 11;
        /// The result set contains out parameters.
        const PS_OUT_PARAMS = 1 << 12;
        /// A read-only transaction is active.
        const IN_TRANS_READONLY = 1 << 13;
        /// Connection state information has changed.
        const SESSION_STATE_CHANGED = 1 << 14;
    }
}

bitflags! {
    /// Column definition flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u16 {
        /// Column may not be NULL.
        const NOT_NULL = 1 << 0;
        /// Column is part of the primary key.
        const PRI_KEY = 1 << 1;
        /// Column is part of a unique key.
        const UNIQUE_KEY = 1 << 2;
        /// Column is part of a non-unique key.
        const MULTIPLE_KEY = 1 << 3;
        /// Column holds a BLOB or TEXT value.
        const BLOB = 1 << 4;
        /// Numeric column is unsigned.
        const UNSIGNED = 1 << 5;
        /// Column is zero-filled.
        const ZEROFILL = 1 << 6;
        /// Column uses the binary character set.
        const BINARY = 1 << 7;
        /// Column is an ENUM.
        const ENUM = 1 << 8;
        /// Column auto-increments.
        const AUTO_INCREMENT = 1 << 9;
        /// Column is a TIMESTAMP.
        const TIMESTAMP = 1 << 10;
        /// Column is a SET.
        const SET = 1 << 11;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_bits_match_wire() {
        assert_eq!(CapabilityFlags::PROTOCOL_41.bits(), 0x0200);
        assert_eq!(CapabilityFlags::MULTI_RESULTS.bits(), 0x0002_0000);
        assert_eq!(CapabilityFlags::DEPRECATE_EOF.bits(), 0x0100_0000);
    }

    #[test]
    fn status_bits_match_wire() {
        assert_eq!(StatusFlags::IN_TRANS.bits(), 0x0001);
        assert_eq!(StatusFlags::MORE_RESULTS_EXISTS.bits(), 0x0008);
        assert_eq!(StatusFlags::NO_BACKSLASH_ESCAPES.bits(), 0x0200);
    }

    #[test]
    fn field_bits_match_wire() {
        assert_eq!(FieldFlags::NOT_NULL.bits(), 0x0001);
        assert_eq!(FieldFlags::UNSIGNED.bits(), 0x0020);
        assert_eq!(FieldFlags::AUTO_INCREMENT.bits(), 0x0200);
    }

    #[test]
    fn unknown_status_bits_are_preserved() {
        let status = StatusFlags::from_bits_retain(0xFFFF);
        assert!(status.contains(StatusFlags::MORE_RESULTS_EXISTS));
    }
}
