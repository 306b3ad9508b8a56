use super::{Expr, Value};

/// Matches a text field against a SQL `LIKE` pattern, where `%` matches any
/// run of characters and `_` matches exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    pub field: String,

    /// Always a [`Value::String`].
    pub pattern: Value,
}

impl Expr {
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        ExprLike {
            field: field.into(),
            pattern: Value::String(pattern.into()),
        }
        .into()
    }
}

impl From<ExprLike> for Expr {
    fn from(value: ExprLike) -> Self {
        Self::Like(value)
    }
}
