//! Column metadata (field) definitions and decoding.

use bytes::{Buf, Bytes};

use crate::error::ProtocolError;
use crate::flags::FieldFlags;
use crate::io::{read_lenenc_bytes, read_lenenc_int, skip_lenenc_bytes};

/// Collation id of the `binary` character set.
///
/// String-ish columns with this collation hold raw bytes rather than text,
/// which changes their reported database type name.
pub const BINARY_COLLATION_ID: u16 = 63;

/// Column field type as sent in a column definition packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldType {
    /// Old-style DECIMAL.
    Decimal = 0x00,
    /// TINYINT.
    Tiny = 0x01,
    /// SMALLINT.
    Short = 0x02,
    /// INT.
    Long = 0x03,
    /// FLOAT.
    Float = 0x04,
    /// DOUBLE.
    Double = 0x05,
    /// NULL-typed column.
    Null = 0x06,
    /// TIMESTAMP.
    Timestamp = 0x07,
    /// BIGINT.
    LongLong = 0x08,
    /// MEDIUMINT.
    Int24 = 0x09,
    /// DATE.
    Date = 0x0A,
    /// TIME.
    Time = 0x0B,
    /// DATETIME.
    DateTime = 0x0C,
    /// YEAR.
    Year = 0x0D,
    /// Internal DATE variant.
    NewDate = 0x0E,
    /// VARCHAR.
    VarChar = 0x0F,
    /// BIT.
    Bit = 0x10,
    /// JSON.
    Json = 0xF5,
    /// DECIMAL.
    NewDecimal = 0xF6,
    /// ENUM.
    Enum = 0xF7,
    /// SET.
    Set = 0xF8,
    /// TINYBLOB / TINYTEXT.
    TinyBlob = 0xF9,
    /// MEDIUMBLOB / MEDIUMTEXT.
    MediumBlob = 0xFA,
    /// LONGBLOB / LONGTEXT.
    LongBlob = 0xFB,
    /// BLOB / TEXT.
    Blob = 0xFC,
    /// VAR_STRING.
    VarString = 0xFD,
    /// CHAR / BINARY.
    String = 0xFE,
    /// GEOMETRY.
    Geometry = 0xFF,
}

impl FieldType {
    /// Create a field type from its raw byte value.
    ///
    /// # Errors
    ///
    /// Returns an error for byte values with no assigned type.
    pub fn from_u8(value: u8) -> Result<Self, ProtocolError> {
        match value {
            0x00 => Ok(Self::Decimal),
            0x01 => Ok(Self::Tiny),
            0x02 => Ok(Self::Short),
            0x03 => Ok(Self::Long),
            0x04 => Ok(Self::Float),
            0x05 => Ok(Self::Double),
            0x06 => Ok(Self::Null),
            0x07 => Ok(Self::Timestamp),
            0x08 => Ok(Self::LongLong),
            0x09 => Ok(Self::Int24),
            0x0A => Ok(Self::Date),
            0x0B => Ok(Self::Time),
            0x0C => Ok(Self::DateTime),
            0x0D => Ok(Self::Year),
            0x0E => Ok(Self::NewDate),
            0x0F => Ok(Self::VarChar),
            0x10 => Ok(Self::Bit),
            0xF5 => Ok(Self::Json),
            0xF6 => Ok(Self::NewDecimal),
            0xF7 => Ok(Self::Enum),
            0xF8 => Ok(Self::Set),
            0xF9 => Ok(Self::TinyBlob),
            0xFA => Ok(Self::MediumBlob),
            0xFB => Ok(Self::LongBlob),
            0xFC => Ok(Self::Blob),
            0xFD => Ok(Self::VarString),
            0xFE => Ok(Self::String),
            0xFF => Ok(Self::Geometry),
            _ => Err(ProtocolError::UnknownFieldType(value)),
        }
    }
}

/// Column metadata from a column definition packet.
///
/// Decoded once per column per result set; immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Table name (or alias) the column belongs to.
    pub table: String,
    /// Column name (or alias).
    pub name: String,
    /// Declared maximum length.
    pub length: u32,
    /// Column flags.
    pub flags: FieldFlags,
    /// Wire field type.
    pub field_type: FieldType,
    /// Digits after the decimal point.
    pub decimals: u8,
    /// Collation id of the column's character set.
    pub charset: u16,
}

impl Field {
    /// Decode a `ColumnDefinition41` payload.
    ///
    /// The catalog, schema, original-table, and original-name strings are
    /// skipped; the remaining fixed-length block carries charset, length,
    /// type, flags, and decimals.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is truncated or names are not valid
    /// UTF-8.
    pub fn decode(mut payload: Bytes) -> Result<Self, ProtocolError> {
        // catalog (always "def") and schema
        skip_lenenc_bytes(&mut payload)?;
        skip_lenenc_bytes(&mut payload)?;

        let table = read_string(&mut payload, "table name")?;
        skip_lenenc_bytes(&mut payload)?; // original table
        let name = read_string(&mut payload, "column name")?;
        skip_lenenc_bytes(&mut payload)?; // original name

        // Fixed-length block: its own length prefix (always 0x0C), then
        // charset(2) length(4) type(1) flags(2) decimals(1) filler(2).
        let _ = read_lenenc_int(&mut payload)?;
        if payload.remaining() < 10 {
            return Err(ProtocolError::Incomplete {
                expected: 10,
                actual: payload.remaining(),
            });
        }
        let charset = payload.get_u16_le();
        let length = payload.get_u32_le();
        let field_type = FieldType::from_u8(payload.get_u8())?;
        let flags = FieldFlags::from_bits_truncate(payload.get_u16_le());
        let decimals = payload.get_u8();

        Ok(Self {
            table,
            name,
            length,
            flags,
            field_type,
            decimals,
            charset,
        })
    }

    /// Whether the column uses the binary character set.
    #[must_use]
    pub const fn is_binary_charset(&self) -> bool {
        self.charset == BINARY_COLLATION_ID
    }

    /// The database type name of this column, as a user would have declared
    /// it. String-ish types split on the binary character set.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        let binary = self.is_binary_charset();
        match self.field_type {
            FieldType::Tiny => "TINYINT",
            FieldType::Short => "SMALLINT",
            FieldType::Int24 => "MEDIUMINT",
            FieldType::Long => "INT",
            FieldType::LongLong => "BIGINT",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Decimal | FieldType::NewDecimal => "DECIMAL",
            FieldType::String => {
                if binary {
                    "BINARY"
                } else {
                    "CHAR"
                }
            }
            FieldType::VarChar | FieldType::VarString => {
                if binary {
                    "VARBINARY"
                } else {
                    "VARCHAR"
                }
            }
            FieldType::TinyBlob => {
                if binary {
                    "TINYBLOB"
                } else {
                    "TINYTEXT"
                }
            }
            FieldType::Blob => {
                if binary {
                    "BLOB"
                } else {
                    "TEXT"
                }
            }
            FieldType::MediumBlob => {
                if binary {
                    "MEDIUMBLOB"
                } else {
                    "MEDIUMTEXT"
                }
            }
            FieldType::LongBlob => {
                if binary {
                    "LONGBLOB"
                } else {
                    "LONGTEXT"
                }
            }
            FieldType::Year => "YEAR",
            FieldType::Date | FieldType::NewDate => "DATE",
            FieldType::Time => "TIME",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::DateTime => "DATETIME",
            FieldType::Bit => "BIT",
            FieldType::Enum => "ENUM",
            FieldType::Set => "SET",
            FieldType::Geometry => "GEOMETRY",
            FieldType::Json => "JSON",
            FieldType::Null => "NULL",
        }
    }

    /// Whether the column can hold NULL.
    #[must_use]
    pub const fn nullable(&self) -> bool {
        !self.flags.contains(FieldFlags::NOT_NULL)
    }
}

fn read_string(src: &mut Bytes, what: &'static str) -> Result<String, ProtocolError> {
    let bytes = read_lenenc_bytes(src)?.ok_or(ProtocolError::Malformed { what })?;
    String::from_utf8(bytes.to_vec()).map_err(|_| ProtocolError::Malformed { what })
}
