use super::{Comma, Delimited, Formatter, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(expr) if expr.operands.is_empty() => fmt!(f, "1 = 1"),
            And(expr) => {
                fmt!(f, Delimited(expr.operands.iter().map(Grouped), " AND "));
            }
            Or(expr) if expr.operands.is_empty() => fmt!(f, "1 = 0"),
            Or(expr) => {
                fmt!(f, Delimited(expr.operands.iter().map(Grouped), " OR "));
            }
            Not(expr) => {
                let inner = &*expr.expr;
                fmt!(f, "NOT (" inner ")");
            }
            BinaryOp(expr) => {
                let temporal = f.temporal_fn(&expr.field);
                let column = Temporal(temporal, f.field_name(&expr.field));
                let value = Temporal(temporal, &expr.value);
                fmt!(f, column " " expr.op.as_sql() " " value);
            }
            // An empty IN list is a syntax error in most dialects
            InList(expr) if expr.list.is_empty() => fmt!(f, "1 = 0"),
            InList(expr) => {
                let temporal = f.temporal_fn(&expr.field);
                let column = Temporal(temporal, f.field_name(&expr.field));
                let list = Comma(expr.list.iter().map(|value| Temporal(temporal, value)));
                fmt!(f, column " IN (" list ")");
            }
            Like(expr) => {
                let column = f.field_name(&expr.field);
                let pattern = &expr.pattern;
                fmt!(f, column " LIKE " pattern);
            }
            IsNull(expr) => {
                let column = f.field_name(&expr.field);
                if expr.negate {
                    fmt!(f, column " IS NOT NULL");
                } else {
                    fmt!(f, column " IS NULL");
                }
            }
        }
    }
}

/// Applies a SQLite date function to both sides of a comparison.
///
/// SQLite keeps dates as text and a foreign table may store them as either
/// `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`. Text comparison across the
/// two layouts is wrong, so both operands are normalized first.
pub(super) struct Temporal<T>(pub(super) Option<&'static str>, pub(super) T);

impl<T: ToSql> ToSql for Temporal<T> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.0 {
            Some(func) => fmt!(f, func "(" self.1 ")"),
            None => fmt!(f, self.1),
        }
    }
}

impl<P> Formatter<'_, P> {
    /// The SQLite date function that normalizes `field`, if it holds a date.
    pub(super) fn temporal_fn(&self, field: &str) -> Option<&'static str> {
        if !self.serializer.is_sqlite() {
            return None;
        }

        match self.table.column_by_name(field)?.ty {
            stmt::Type::Date => Some("date"),
            stmt::Type::DateTime => Some("datetime"),
            _ => None,
        }
    }
}

/// Wraps compound operands in parentheses.
struct Grouped<'a>(&'a stmt::Expr);

impl ToSql for Grouped<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self.0 {
            stmt::Expr::And(_) | stmt::Expr::Or(_) => fmt!(f, "(" self.0 ")"),
            expr => fmt!(f, expr),
        }
    }
}
