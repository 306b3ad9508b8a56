use crate::{Error, Result};

use std::{fmt, str::FromStr};

/// The semantic type of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 64-bit integer
    I64,

    /// Unsigned 64-bit integer
    U64,

    /// 64-bit floating point number
    F64,

    /// UTF-8 text
    String,

    /// Civil date without a time zone
    Date,

    /// Civil date-time without a time zone
    DateTime,

    /// Opaque byte string
    Bytes,
}

impl Type {
    /// The lowercase name used in configuration files and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Type::Bool => "bool",
            Type::I64 => "i64",
            Type::U64 => "u64",
            Type::F64 => "f64",
            Type::String => "string",
            Type::Date => "date",
            Type::DateTime => "datetime",
            Type::Bytes => "bytes",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Type::I64 | Type::U64 | Type::F64)
    }

    pub const fn is_temporal(self) -> bool {
        matches!(self, Type::Date | Type::DateTime)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Type {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let ty = match s.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Type::Bool,
            "i64" | "int" | "integer" => Type::I64,
            "u64" | "unsigned" => Type::U64,
            "f64" | "float" | "real" | "double" => Type::F64,
            "string" | "str" | "text" => Type::String,
            "date" => Type::Date,
            "datetime" | "timestamp" => Type::DateTime,
            "bytes" | "blob" => Type::Bytes,
            _ => return Err(Error::invalid_schema(format!("unknown column type `{s}`"))),
        };
        Ok(ty)
    }
}
