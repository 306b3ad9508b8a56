use super::{BinaryOp, Expr, Value};
use crate::{Error, Result};

use sqlparser::{
    ast::{self as sql, UnaryOperator},
    dialect::GenericDialect,
    parser::{Parser, ParserError},
    tokenizer::Token,
};

pub(super) fn parse(src: &str) -> Result<Expr> {
    let invalid = |err: ParserError| Error::query(format!("invalid filter `{src}`: {err}"));

    let dialect = GenericDialect {};
    let mut parser = Parser::new(&dialect).try_with_sql(src).map_err(invalid)?;

    let expr = parser.parse_expr().map_err(invalid)?;
    parser.expect_token(&Token::EOF).map_err(invalid)?;

    lower(&expr)
}

/// Lowers a parsed SQL expression to a filter predicate.
fn lower(expr: &sql::Expr) -> Result<Expr> {
    match expr {
        sql::Expr::Nested(inner) => lower(inner),
        sql::Expr::BinaryOp { left, op, right } => match op {
            sql::BinaryOperator::And => Ok(Expr::and(lower(left)?, lower(right)?)),
            sql::BinaryOperator::Or => Ok(Expr::or(lower(left)?, lower(right)?)),
            op => comparison(left, op, right),
        },
        sql::Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr,
        } => Ok(Expr::not(lower(expr)?)),
        sql::Expr::IsNull(expr) => Ok(Expr::is_null(field(expr)?)),
        sql::Expr::IsNotNull(expr) => Ok(Expr::is_not_null(field(expr)?)),
        sql::Expr::InList {
            expr,
            list,
            negated,
        } => {
            let list = list.iter().map(literal).collect::<Result<Vec<_>>>()?;
            Ok(negate(*negated, Expr::in_list(field(expr)?, list)))
        }
        sql::Expr::Between {
            expr,
            negated,
            low,
            high,
        } => {
            let field = field(expr)?;
            let between = Expr::and(
                Expr::ge(field.clone(), literal(low)?),
                Expr::le(field, literal(high)?),
            );
            Ok(negate(*negated, between))
        }
        sql::Expr::Like {
            negated,
            expr: target,
            pattern,
            escape_char,
            ..
        } => {
            if escape_char.is_some() {
                return Err(unsupported(expr));
            }

            let Value::String(pattern) = literal(pattern)? else {
                return Err(Error::query(format!(
                    "the pattern in `{expr}` must be a string"
                )));
            };

            Ok(negate(*negated, Expr::like(field(target)?, pattern)))
        }
        expr => Err(unsupported(expr)),
    }
}

/// A comparison between a field and a literal, in either order.
fn comparison(left: &sql::Expr, op: &sql::BinaryOperator, right: &sql::Expr) -> Result<Expr> {
    use sql::BinaryOperator::*;

    let op = match op {
        Eq => BinaryOp::Eq,
        NotEq => BinaryOp::Ne,
        Lt => BinaryOp::Lt,
        LtEq => BinaryOp::Le,
        Gt => BinaryOp::Gt,
        GtEq => BinaryOp::Ge,
        op => return Err(Error::query(format!("unsupported operator `{op}`"))),
    };

    if is_field(left) {
        Ok(Expr::binary_op(field(left)?, op, literal(right)?))
    } else {
        // `200 < sales` reads as `sales > 200`
        let op = match op {
            BinaryOp::Lt => BinaryOp::Gt,
            BinaryOp::Le => BinaryOp::Ge,
            BinaryOp::Gt => BinaryOp::Lt,
            BinaryOp::Ge => BinaryOp::Le,
            op => op,
        };
        Ok(Expr::binary_op(field(right)?, op, literal(left)?))
    }
}

fn negate(negated: bool, expr: Expr) -> Expr {
    if negated {
        Expr::not(expr)
    } else {
        expr
    }
}

fn is_field(expr: &sql::Expr) -> bool {
    match expr {
        sql::Expr::Identifier(_) => true,
        sql::Expr::Nested(inner) => is_field(inner),
        _ => false,
    }
}

fn field(expr: &sql::Expr) -> Result<String> {
    match expr {
        sql::Expr::Identifier(ident) => Ok(ident.value.clone()),
        sql::Expr::Nested(inner) => field(inner),
        expr => Err(Error::query(format!("expected a field name, found `{expr}`"))),
    }
}

fn literal(expr: &sql::Expr) -> Result<Value> {
    match expr {
        sql::Expr::Value(value) => literal_value(value),
        sql::Expr::Nested(inner) => literal(inner),
        sql::Expr::UnaryOp { op, expr: operand } => match (op, &**operand) {
            (UnaryOperator::Minus, sql::Expr::Value(sql::Value::Number(n, _))) => {
                number(&format!("-{n}"))
            }
            (UnaryOperator::Plus, sql::Expr::Value(sql::Value::Number(n, _))) => number(n),
            _ => Err(Error::query(format!("expected a literal, found `{expr}`"))),
        },
        expr => Err(Error::query(format!("expected a literal, found `{expr}`"))),
    }
}

fn literal_value(value: &sql::Value) -> Result<Value> {
    match value {
        sql::Value::Number(n, _) => number(n),
        sql::Value::SingleQuotedString(s) => Ok(Value::String(s.clone())),
        sql::Value::Boolean(b) => Ok(Value::Bool(*b)),
        sql::Value::Null => Ok(Value::Null),
        value => Err(Error::query(format!("unsupported literal `{value}`"))),
    }
}

fn number(n: &str) -> Result<Value> {
    if n.contains(['.', 'e', 'E']) {
        return n
            .parse::<f64>()
            .map(Value::F64)
            .map_err(|_| Error::query(format!("invalid number {n}")));
    }

    if let Ok(v) = n.parse::<i64>() {
        Ok(Value::I64(v))
    } else if let Ok(v) = n.parse::<u64>() {
        Ok(Value::U64(v))
    } else {
        Err(Error::query(format!("integer literal {n} is out of range")))
    }
}

fn unsupported(expr: &sql::Expr) -> Error {
    Error::query(format!("unsupported filter expression `{expr}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn comparison_and_conjunction() {
        let expr = parse("sales >= 200 and day < '2020-10-10'").unwrap();
        assert_eq!(
            expr,
            Expr::and(Expr::ge("sales", 200i64), Expr::lt("day", "2020-10-10"))
        );
    }

    #[test]
    fn precedence_and_binds_tighter_than_or() {
        let expr = parse("a = 1 or b = 2 and c = 3").unwrap();
        assert_eq!(
            expr,
            Expr::or(
                Expr::eq("a", 1i64),
                Expr::and(Expr::eq("b", 2i64), Expr::eq("c", 3i64))
            )
        );
    }

    #[test]
    fn parens_and_not() {
        let expr = parse("NOT (a = 1 OR a = 2)").unwrap();
        assert_eq!(
            expr,
            Expr::not(Expr::or(Expr::eq("a", 1i64), Expr::eq("a", 2i64)))
        );
    }

    #[test]
    fn null_checks() {
        assert_eq!(parse("note is null").unwrap(), Expr::is_null("note"));
        assert_eq!(parse("note IS NOT NULL").unwrap(), Expr::is_not_null("note"));
    }

    #[test]
    fn in_lists() {
        assert_eq!(
            parse("day in ('2020-10-01', '2020-10-02')").unwrap(),
            Expr::in_list("day", ["2020-10-01", "2020-10-02"])
        );
        assert_eq!(
            parse("sales not in (1, 2.5)").unwrap(),
            Expr::not(Expr::in_list("sales", [Value::I64(1), Value::F64(2.5)]))
        );
    }

    #[test]
    fn between_is_an_inclusive_range() {
        assert_eq!(
            parse("sales between 200 and 210").unwrap(),
            Expr::and(Expr::ge("sales", 200i64), Expr::le("sales", 210i64))
        );
        assert_eq!(
            parse("sales not between 200 and 210").unwrap(),
            Expr::not(Expr::and(
                Expr::ge("sales", 200i64),
                Expr::le("sales", 210i64)
            ))
        );
    }

    #[test]
    fn like_patterns() {
        assert_eq!(parse("region like 'n%'").unwrap(), Expr::like("region", "n%"));
        assert_eq!(
            parse("region NOT LIKE '_orth'").unwrap(),
            Expr::not(Expr::like("region", "_orth"))
        );
    }

    #[test]
    fn quoted_identifiers() {
        assert_eq!(parse(r#""sales" > 0"#).unwrap(), Expr::gt("sales", 0i64));
        assert_eq!(
            parse(r#""Sale Day" = '2020-10-01'"#).unwrap(),
            Expr::eq("Sale Day", "2020-10-01")
        );
    }

    #[test]
    fn literal_on_the_left() {
        assert_eq!(parse("200 < sales").unwrap(), Expr::gt("sales", 200i64));
        assert_eq!(parse("0 = sales").unwrap(), Expr::eq("sales", 0i64));
    }

    #[test]
    fn operators() {
        assert_eq!(parse("a != 1").unwrap(), Expr::ne("a", 1i64));
        assert_eq!(parse("a <> 1").unwrap(), Expr::ne("a", 1i64));
        assert_eq!(parse("a > -1").unwrap(), Expr::gt("a", -1i64));
        assert_eq!(parse("a <= true").unwrap(), Expr::le("a", true));
        assert_eq!(parse("a = null").unwrap(), Expr::eq("a", Value::Null));
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            parse("name = 'O''Brien'").unwrap(),
            Expr::eq("name", "O'Brien")
        );
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(
            parse("n = 18446744073709551615").unwrap(),
            Expr::eq("n", u64::MAX)
        );
        assert_eq!(parse("n = -2.5").unwrap(), Expr::eq("n", -2.5));
        assert!(parse("n = -18446744073709551615").unwrap_err().is_query());
    }

    #[test]
    fn errors() {
        for src in [
            "",
            "sales >",
            "sales 200",
            "(a = 1",
            "a = 1)",
            "a = 'open",
            "a is 1",
            "a not = 1",
            "a = b",
            "sales + 1 > 2",
            "region ilike 'n%'",
            "region like 5",
            "a = 1 ; drop table x",
        ] {
            let err = parse(src).unwrap_err();
            assert!(err.is_query(), "{src:?} => {err}");
        }
    }
}
