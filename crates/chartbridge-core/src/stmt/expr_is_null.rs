use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprIsNull {
    pub field: String,

    /// When true, the expression is `IS NOT NULL`.
    pub negate: bool,
}

impl Expr {
    pub fn is_null(field: impl Into<String>) -> Self {
        ExprIsNull {
            field: field.into(),
            negate: false,
        }
        .into()
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        ExprIsNull {
            field: field.into(),
            negate: true,
        }
        .into()
    }
}

impl From<ExprIsNull> for Expr {
    fn from(value: ExprIsNull) -> Self {
        Self::IsNull(value)
    }
}
