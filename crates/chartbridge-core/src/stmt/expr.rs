use super::{
    BinaryOp, ExprAnd, ExprBinaryOp, ExprInList, ExprIsNull, ExprLike, ExprNot, ExprOr, Value,
};
use crate::Result;

use std::fmt;

/// A filter predicate over the fields of a schema mapping.
///
/// Fields are referenced by application name. An expression is resolved
/// against a mapping when a query is bound; until then field names are not
/// checked.
#[derive(Clone, PartialEq)]
pub enum Expr {
    /// AND a set of predicates
    And(ExprAnd),

    /// Compare a field with a literal
    BinaryOp(ExprBinaryOp),

    /// Whether a field's value is one of a list of literals
    InList(ExprInList),

    /// Whether a field is null
    IsNull(ExprIsNull),

    /// Match a text field against a pattern
    Like(ExprLike),

    /// Negate a predicate
    Not(ExprNot),

    /// OR a set of predicates
    Or(ExprOr),
}

impl Expr {
    /// Parses a SQL predicate such as `sales >= 200 and day < '2020-10-10'`.
    ///
    /// Supported forms are comparisons of a field with a literal, `BETWEEN`,
    /// `IN`, `LIKE`, `IS [NOT] NULL` and their combinations with `AND`, `OR`,
    /// `NOT` and parentheses.
    pub fn parse(src: &str) -> Result<Expr> {
        super::parse::parse(src)
    }

    /// Calls `f` with the name of every field the expression references.
    pub fn for_each_field<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Expr::And(e) => e.operands.iter().for_each(|e| e.for_each_field(f)),
            Expr::Or(e) => e.operands.iter().for_each(|e| e.for_each_field(f)),
            Expr::Not(e) => e.expr.for_each_field(f),
            Expr::BinaryOp(e) => f(&e.field),
            Expr::InList(e) => f(&e.field),
            Expr::IsNull(e) => f(&e.field),
            Expr::Like(e) => f(&e.field),
        }
    }

    /// Calls `f` on every literal along with the field it is compared against.
    pub fn try_for_each_value_mut(
        &mut self,
        f: &mut impl FnMut(&str, &mut Value) -> Result<()>,
    ) -> Result<()> {
        match self {
            Expr::And(e) => e
                .operands
                .iter_mut()
                .try_for_each(|e| e.try_for_each_value_mut(f)),
            Expr::Or(e) => e
                .operands
                .iter_mut()
                .try_for_each(|e| e.try_for_each_value_mut(f)),
            Expr::Not(e) => e.expr.try_for_each_value_mut(f),
            Expr::BinaryOp(e) => f(&e.field, &mut e.value),
            Expr::InList(e) => e.list.iter_mut().try_for_each(|v| f(&e.field, v)),
            // Patterns are text whatever the field's type
            Expr::IsNull(_) | Expr::Like(_) => Ok(()),
        }
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::binary_op(field, BinaryOp::Ne, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::binary_op(field, BinaryOp::Lt, value)
    }

    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::binary_op(field, BinaryOp::Le, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::binary_op(field, BinaryOp::Gt, value)
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::binary_op(field, BinaryOp::Ge, value)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(e) => e.fmt(f),
            Self::BinaryOp(e) => e.fmt(f),
            Self::InList(e) => e.fmt(f),
            Self::IsNull(e) => e.fmt(f),
            Self::Like(e) => e.fmt(f),
            Self::Not(e) => e.fmt(f),
            Self::Or(e) => e.fmt(f),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn fmt_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
            match value {
                Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
                Value::Date(_) | Value::DateTime(_) => write!(f, "'{value}'"),
                value => write!(f, "{value}"),
            }
        }

        fn join(f: &mut fmt::Formatter<'_>, operands: &[Expr], sep: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, operand) in operands.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{operand}")?;
            }
            f.write_str(")")
        }

        match self {
            Expr::And(e) => join(f, &e.operands, " and "),
            Expr::Or(e) => join(f, &e.operands, " or "),
            Expr::Not(e) => write!(f, "not {}", e.expr),
            Expr::BinaryOp(e) => {
                write!(f, "{} {} ", e.field, e.op)?;
                fmt_literal(f, &e.value)
            }
            Expr::InList(e) => {
                write!(f, "{} in (", e.field)?;
                for (i, v) in e.list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt_literal(f, v)?;
                }
                f.write_str(")")
            }
            Expr::IsNull(e) if e.negate => write!(f, "{} is not null", e.field),
            Expr::IsNull(e) => write!(f, "{} is null", e.field),
            Expr::Like(e) => {
                write!(f, "{} like ", e.field)?;
                fmt_literal(f, &e.pattern)
            }
        }
    }
}
