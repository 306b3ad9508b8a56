use chartbridge_core::{
    driver::operation::Select,
    schema::Table,
    stmt::{Expr, OrderBy, Type, Value},
    Error, Result,
};

use std::{mem, sync::Arc};

/// A filter, ordering and limit applied when reading a mapped table.
///
/// An empty query reads every row.
#[derive(Debug, Default, Clone)]
pub struct Query {
    filter: Option<Expr>,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
}

impl Query {
    /// A query matching every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parses filter text into a query.
    pub fn parse(filter: &str) -> Result<Self> {
        Ok(Self::all().filter(Expr::parse(filter)?))
    }

    /// Adds a filter. Successive filters are combined with `AND`.
    pub fn filter(mut self, expr: impl Into<Expr>) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr.into()),
            None => expr.into(),
        });
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by.push(order_by);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter_expr(&self) -> Option<&Expr> {
        self.filter.as_ref()
    }

    /// Resolves the query against a mapping.
    ///
    /// Every referenced field must be mapped and every literal must coerce to
    /// its field's type. Without an explicit order a keyed mapping is read in
    /// key order.
    pub fn bind(&self, table: &Arc<Table>) -> Result<Select> {
        let mut filter = self.filter.clone();

        if let Some(filter) = &mut filter {
            let mut unknown = None;
            filter.for_each_field(&mut |field| {
                if unknown.is_none() && table.column_by_name(field).is_none() {
                    unknown = Some(field.to_string());
                }
            });

            if let Some(field) = unknown {
                return Err(unknown_field(table, &field));
            }

            check_patterns(table, filter)?;

            filter.try_for_each_value_mut(&mut |field, value| {
                bind_value(table, field, value)
            })?;
        }

        let mut order_by = Vec::with_capacity(self.order_by.len());
        for order in &self.order_by {
            if table.column_by_name(&order.field).is_none() {
                return Err(Error::query(format!(
                    "cannot order by `{}`; no such field in `{}`",
                    order.field, table.name
                )));
            }
            order_by.push(order.clone());
        }

        if order_by.is_empty() {
            order_by.extend(
                table
                    .key_columns()
                    .map(|column| OrderBy::asc(column.app_name())),
            );
        }

        Ok(Select {
            table: table.clone(),
            filter,
            order_by,
            limit: self.limit,
        })
    }
}

impl From<Expr> for Query {
    fn from(value: Expr) -> Self {
        Self::all().filter(value)
    }
}

fn unknown_field(table: &Table, field: &str) -> Error {
    Error::query(format!(
        "unknown field `{field}` in filter on `{}`",
        table.name
    ))
}

/// `LIKE` only applies to text fields.
fn check_patterns(table: &Table, expr: &Expr) -> Result<()> {
    match expr {
        Expr::And(e) => e.operands.iter().try_for_each(|e| check_patterns(table, e)),
        Expr::Or(e) => e.operands.iter().try_for_each(|e| check_patterns(table, e)),
        Expr::Not(e) => check_patterns(table, &e.expr),
        Expr::Like(e) => match table.column_by_name(&e.field) {
            Some(column) if column.ty != Type::String => Err(Error::query(format!(
                "cannot match `{}` against a pattern; it is `{}`, not text",
                e.field, column.ty
            ))),
            Some(_) => Ok(()),
            None => Err(unknown_field(table, &e.field)),
        },
        Expr::BinaryOp(_) | Expr::InList(_) | Expr::IsNull(_) => Ok(()),
    }
}

fn bind_value(table: &Table, field: &str, value: &mut Value) -> Result<()> {
    let Some(column) = table.column_by_name(field) else {
        return Err(unknown_field(table, field));
    };

    if value.is_null() {
        return Err(Error::query(format!(
            "cannot compare `{field}` with null; use `is null`"
        )));
    }

    *value = mem::take(value).coerce(column.ty).map_err(|err| {
        err.context(Error::query(format!(
            "value for `{field}` does not match its type `{}`",
            column.ty
        )))
    })?;

    Ok(())
}
