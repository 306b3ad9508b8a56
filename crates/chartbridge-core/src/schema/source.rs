use crate::stmt::Type;

use std::fmt;

/// A column as reported by the foreign source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumn {
    pub name: String,

    /// The column's declared type, verbatim.
    pub declared: String,

    pub storage: StorageClass,

    pub nullable: bool,
}

/// How the foreign source stores a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Integer,
    Real,
    Text,
    Blob,

    /// Declared with a numeric affinity (`NUMERIC`, `DECIMAL`, ...)
    Numeric,
    Boolean,
    Date,
    DateTime,
}

impl StorageClass {
    /// Returns true if values of `ty` can be read from this storage class.
    pub fn accepts(self, ty: Type) -> bool {
        use StorageClass::*;

        match ty {
            Type::Bool => matches!(self, Integer | Numeric | Boolean),
            Type::I64 | Type::U64 => matches!(self, Integer | Numeric),
            Type::F64 => matches!(self, Real | Numeric | Integer),
            Type::String => matches!(self, Text),
            Type::Date => matches!(self, Date | Text),
            Type::DateTime => matches!(self, DateTime | Text),
            Type::Bytes => matches!(self, Blob),
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageClass::Integer => "integer",
            StorageClass::Real => "real",
            StorageClass::Text => "text",
            StorageClass::Blob => "blob",
            StorageClass::Numeric => "numeric",
            StorageClass::Boolean => "boolean",
            StorageClass::Date => "date",
            StorageClass::DateTime => "datetime",
        };
        f.write_str(name)
    }
}
