use super::Type;
use crate::{Error, Result};

use jiff::civil;
use std::fmt;

/// A single field value read from, or written to, a foreign table.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// Unsigned 64-bit integer
    U64(u64),

    /// 64-bit float
    F64(f64),

    /// String value
    String(String),

    /// Civil date
    Date(civil::Date),

    /// Civil date-time
    DateTime(civil::DateTime),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the type of a non-null value.
    pub fn infer_ty(&self) -> Option<Type> {
        Some(match self {
            Value::Bool(_) => Type::Bool,
            Value::I64(_) => Type::I64,
            Value::U64(_) => Type::U64,
            Value::F64(_) => Type::F64,
            Value::String(_) => Type::String,
            Value::Date(_) => Type::Date,
            Value::DateTime(_) => Type::DateTime,
            Value::Bytes(_) => Type::Bytes,
            Value::Null => return None,
        })
    }

    pub fn is_a(&self, ty: Type) -> bool {
        self.infer_ty() == Some(ty)
    }

    /// Converts the value to `ty` when the conversion is lossless.
    ///
    /// Strings are parsed when the target is a date or date-time. `Null`
    /// coerces to every type.
    pub fn coerce(self, ty: Type) -> Result<Value> {
        let value = match (self, ty) {
            (Value::Null, _) => Value::Null,
            (value, ty) if value.is_a(ty) => value,
            (Value::I64(v), Type::U64) if v >= 0 => Value::U64(v as u64),
            (Value::U64(v), Type::I64) if v <= i64::MAX as u64 => Value::I64(v as i64),
            (Value::I64(v), Type::F64) => Value::F64(v as f64),
            (Value::U64(v), Type::F64) => Value::F64(v as f64),
            (Value::String(s), Type::Date) => Value::Date(s.parse()?),
            (Value::String(s), Type::DateTime) => Value::DateTime(s.parse()?),
            (Value::DateTime(v), Type::Date) => Value::Date(v.date()),
            (value, ty) => return Err(Error::type_conversion(value, ty.name())),
        };
        Ok(value)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::I64(v) => Some(v as f64),
            Value::U64(v) => Some(v as f64),
            Value::F64(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => v.fmt(f),
            Value::I64(v) => v.fmt(f),
            Value::U64(v) => v.fmt(f),
            Value::F64(v) => v.fmt(f),
            Value::String(v) => write!(f, "{v:?}"),
            Value::Date(v) => v.fmt(f),
            Value::DateTime(v) => v.fmt(f),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<u32> for Value {
    fn from(src: u32) -> Self {
        Self::U64(src.into())
    }
}

impl From<u64> for Value {
    fn from(src: u64) -> Self {
        Self::U64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Null,
        }
    }
}
