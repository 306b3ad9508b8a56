use super::{BinaryOp, Expr, Value};

/// Compares a field with a literal.
///
/// ```text
/// eq(day, '2020-10-01')   // day = '2020-10-01'
/// gt(sales, 200)          // sales > 200
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    /// Application name of the compared field.
    pub field: String,

    pub op: BinaryOp,

    /// The literal operand.
    pub value: Value,
}

impl Expr {
    pub fn binary_op(field: impl Into<String>, op: BinaryOp, value: impl Into<Value>) -> Self {
        ExprBinaryOp {
            field: field.into(),
            op,
            value: value.into(),
        }
        .into()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::binary_op(field, BinaryOp::Eq, value)
    }

    /// Returns true if the expression is a binary expression with the equality operator
    pub fn is_eq(&self) -> bool {
        matches!(
            self,
            Self::BinaryOp(ExprBinaryOp {
                op: BinaryOp::Eq,
                ..
            })
        )
    }
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Self::BinaryOp(value)
    }
}
