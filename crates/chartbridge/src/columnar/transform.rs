use chartbridge_core::{stmt::Value, Error, Result};

use serde::Deserialize;
use std::{fmt, str::FromStr};

/// A per-column conversion applied while shaping rows.
///
/// `Null` passes through every transform unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Date or date-time rendered as `YYYY-MM-DD`
    CalendarDate,

    /// Date or date-time rendered as ISO-8601
    Iso8601,

    /// Any scalar rendered as a string
    ToString,

    /// Any number widened to `f64`
    ToFloat,
}

impl Transform {
    pub fn name(self) -> &'static str {
        match self {
            Transform::CalendarDate => "calendar_date",
            Transform::Iso8601 => "iso8601",
            Transform::ToString => "to_string",
            Transform::ToFloat => "to_float",
        }
    }

    /// Applies the transform to one value of `column`.
    pub fn apply(self, column: &str, value: Value) -> Result<Value> {
        let value = match (self, value) {
            (_, Value::Null) => Value::Null,
            (Transform::CalendarDate, Value::Date(v)) => Value::String(v.to_string()),
            (Transform::CalendarDate, Value::DateTime(v)) => Value::String(v.date().to_string()),
            (Transform::Iso8601, Value::Date(v)) => Value::String(v.to_string()),
            (Transform::Iso8601, Value::DateTime(v)) => Value::String(v.to_string()),
            (Transform::ToString, Value::Bytes(_)) => return Err(self.mismatch(column, "bytes")),
            (Transform::ToString, Value::String(v)) => Value::String(v),
            (Transform::ToString, v) => Value::String(v.to_string()),
            (Transform::ToFloat, v) => match v.as_f64() {
                Some(v) => Value::F64(v),
                None => return Err(self.mismatch(column, type_name(&v))),
            },
            (_, v) => return Err(self.mismatch(column, type_name(&v))),
        };
        Ok(value)
    }

    fn mismatch(self, column: &str, ty: &str) -> Error {
        Error::transform(format!(
            "`{}` cannot apply to {ty} value in column `{column}`",
            self.name()
        ))
    }
}

fn type_name(value: &Value) -> &'static str {
    value.infer_ty().map(|ty| ty.name()).unwrap_or("null")
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "calendar_date" => Transform::CalendarDate,
            "iso8601" => Transform::Iso8601,
            "to_string" => Transform::ToString,
            "to_float" => Transform::ToFloat,
            _ => return Err(Error::transform(format!("unknown transform `{s}`"))),
        })
    }
}
