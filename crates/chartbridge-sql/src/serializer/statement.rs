use super::{expr::Temporal, Comma, Ident, Params, ToSql};

use crate::stmt::{self, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = f.table;
        let columns = Comma(table.columns.iter().map(|c| Ident(c.storage_name())));
        let name = Ident(&table.name);

        fmt!(f, "SELECT " columns " FROM " name);

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }

        if !self.order_by.is_empty() {
            let order_by = Comma(self.order_by.iter().map(OrderByTerm));
            fmt!(f, " ORDER BY " order_by);
        }

        if let Some(limit) = self.limit {
            fmt!(f, " LIMIT " limit);
        }
    }
}

struct OrderByTerm<'a>(&'a stmt::OrderBy);

impl ToSql for OrderByTerm<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = f.field_name(&self.0.field);
        fmt!(f, column " " self.0.direction.as_sql());
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = f.table;
        let columns = Comma(table.columns.iter().map(|c| Ident(c.storage_name())));
        let name = Ident(&table.name);

        fmt!(f, "INSERT INTO " name " (" columns ") VALUES (" Comma(&self.values.fields) ")");
    }
}

impl ToSql for &stmt::UpdateByKey {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = f.table;
        let name = Ident(&table.name);

        fmt!(f, "UPDATE " name " SET ");

        let mut s = "";
        for (id, value) in &self.assignments {
            let column = f.column_name(*id);
            fmt!(f, s column " = " value);
            s = ", ";
        }

        fmt!(f, " WHERE " KeyFilter(&self.key));
    }
}

impl ToSql for &stmt::DeleteByKey {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = f.table;
        let name = Ident(&table.name);

        fmt!(f, "DELETE FROM " name " WHERE " KeyFilter(&self.key));
    }
}

/// `"k1" = ?1 AND "k2" = ?2` over the table's key columns.
struct KeyFilter<'a>(&'a stmt::ValueRecord);

impl ToSql for KeyFilter<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = f.table;

        let mut s = "";
        for (column, value) in table.key_columns().zip(self.0.iter()) {
            let temporal = f.temporal_fn(column.app_name());
            let column = Temporal(temporal, f.column_name(column.id));
            fmt!(f, s column " = " Temporal(temporal, value));
            s = " AND ";
        }
    }
}
