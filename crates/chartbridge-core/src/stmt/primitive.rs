use super::{Type, Value};
use crate::{Error, Result};

use jiff::civil;

/// A Rust type that can be stored in a single mapped column.
///
/// Implemented for the scalar types `#[derive(Record)]` accepts as field
/// types. `Option<T>` marks the column nullable.
pub trait Primitive: Sized {
    /// True when the column accepts `NULL`.
    const NULLABLE: bool = false;

    /// The column's semantic type.
    fn ty() -> Type;

    /// Converts a loaded value into `Self`.
    fn load(value: Value) -> Result<Self>;

    fn into_value(self) -> Value;
}

macro_rules! impl_primitive {
    ($t:ty, $ty:ident, $variant:ident, $lit:literal) => {
        impl Primitive for $t {
            fn ty() -> Type {
                Type::$ty
            }

            fn load(value: Value) -> Result<Self> {
                match value.coerce(Type::$ty) {
                    Ok(Value::$variant(v)) => Ok(v),
                    Ok(value) => Err(Error::type_conversion(value, $lit)),
                    Err(err) => Err(err),
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

impl_primitive!(bool, Bool, Bool, "bool");
impl_primitive!(i64, I64, I64, "i64");
impl_primitive!(u64, U64, U64, "u64");
impl_primitive!(f64, F64, F64, "f64");
impl_primitive!(String, String, String, "String");
impl_primitive!(civil::Date, Date, Date, "Date");
impl_primitive!(civil::DateTime, DateTime, DateTime, "DateTime");
impl_primitive!(Vec<u8>, Bytes, Bytes, "Vec<u8>");

macro_rules! impl_primitive_narrow {
    ($t:ty, $ty:ident, $variant:ident, $lit:literal) => {
        impl Primitive for $t {
            fn ty() -> Type {
                Type::$ty
            }

            fn load(value: Value) -> Result<Self> {
                match value.coerce(Type::$ty)? {
                    Value::$variant(v) => {
                        <$t>::try_from(v).map_err(|_| Error::type_conversion(Value::$variant(v), $lit))
                    }
                    value => Err(Error::type_conversion(value, $lit)),
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self.into())
            }
        }
    };
}

impl_primitive_narrow!(i32, I64, I64, "i32");
impl_primitive_narrow!(u32, U64, U64, "u32");

impl<T: Primitive> Primitive for Option<T> {
    const NULLABLE: bool = true;

    fn ty() -> Type {
        T::ty()
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::load(value).map(Some),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }
}
