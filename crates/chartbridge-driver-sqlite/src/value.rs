use chartbridge_core::{
    schema::{Column, Table},
    stmt::{self, Value as CoreValue},
    Error, Result,
};
use jiff::civil;
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Decodes a SQLite value within a row as the column's declared type.
    ///
    /// SQLite columns are dynamically typed, so a stored value may not match
    /// the declared type even when the column itself does. That is reported
    /// as a schema mismatch.
    pub fn from_sql(row: &Row, index: usize, table: &Table, column: &Column) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::driver)?;
        let ty = column.ty;

        let mismatch = |stored: &str| {
            Error::schema_mismatch(format!(
                "column `{}` in `{}` holds {stored}, which cannot be read as {ty}",
                column.storage_name(),
                table.name
            ))
        };

        let core_value = match value {
            SqlValue::Null => stmt::Value::Null,
            SqlValue::Integer(value) => match ty {
                stmt::Type::Bool => stmt::Value::Bool(value != 0),
                stmt::Type::I64 => stmt::Value::I64(value),
                stmt::Type::U64 => match u64::try_from(value) {
                    Ok(value) => stmt::Value::U64(value),
                    Err(_) => return Err(mismatch(&format!("the negative integer {value}"))),
                },
                stmt::Type::F64 => stmt::Value::F64(value as f64),
                _ => return Err(mismatch("an integer")),
            },
            SqlValue::Real(value) => match ty {
                stmt::Type::F64 => stmt::Value::F64(value),
                _ => return Err(mismatch("a real")),
            },
            SqlValue::Text(value) => match ty {
                stmt::Type::String => stmt::Value::String(value),
                stmt::Type::Date => match value.parse::<civil::Date>() {
                    Ok(date) => stmt::Value::Date(date),
                    Err(_) => return Err(mismatch(&format!("the text {value:?}"))),
                },
                stmt::Type::DateTime => match value.replacen(' ', "T", 1).parse::<civil::DateTime>()
                {
                    Ok(datetime) => stmt::Value::DateTime(datetime),
                    Err(_) => return Err(mismatch(&format!("the text {value:?}"))),
                },
                _ => return Err(mismatch("text")),
            },
            SqlValue::Blob(value) => match ty {
                stmt::Type::Bytes => stmt::Value::Bytes(value),
                _ => return Err(mismatch("a blob")),
            },
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::U64(v) => match i64::try_from(*v) {
                Ok(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(v))),
                Err(err) => Err(rusqlite::Error::ToSqlConversionFailure(Box::new(err))),
            },
            Value::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Date(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            Value::DateTime(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.to_string().replacen('T', " ", 1),
            ))),
            Value::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
