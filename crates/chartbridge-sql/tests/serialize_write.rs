use chartbridge_core::schema::{ColumnId, Table};
use chartbridge_core::stmt::{Type, Value, ValueRecord};
use chartbridge_sql::{
    stmt::{DeleteByKey, Insert, UpdateByKey},
    Serializer, Statement,
};
use jiff::civil::date;
use pretty_assertions::assert_eq;

use std::sync::Arc;

fn sales_day() -> Arc<Table> {
    Arc::new(
        Table::builder("sales_2020Q4")
            .column("day", Type::Date)
            .column("sales", Type::U64)
            .key(["day"])
            .build()
            .unwrap(),
    )
}

fn sqlite(stmt: impl Into<Statement>) -> (String, Vec<Value>) {
    let mut params = vec![];
    let sql = Serializer::sqlite().serialize(&stmt.into(), &mut params);
    (sql, params)
}

#[test]
fn insert() {
    let (sql, params) = sqlite(Statement::Insert(Insert {
        table: sales_day(),
        values: ValueRecord::from_vec(vec![date(2020, 10, 1).into(), 208u64.into()]),
    }));

    assert_eq!(
        sql,
        r#"INSERT INTO "sales_2020Q4" ("day", "sales") VALUES (?1, ?2);"#
    );
    assert_eq!(params, vec![Value::Date(date(2020, 10, 1)), Value::U64(208)]);
}

#[test]
fn update_by_key() {
    let (sql, params) = sqlite(Statement::Update(UpdateByKey {
        table: sales_day(),
        key: ValueRecord::from_vec(vec![date(2020, 10, 1).into()]),
        assignments: vec![(ColumnId(1), Value::U64(300))],
    }));

    assert_eq!(
        sql,
        r#"UPDATE "sales_2020Q4" SET "sales" = ?1 WHERE date("day") = date(?2);"#
    );
    assert_eq!(params, vec![Value::U64(300), Value::Date(date(2020, 10, 1))]);
}

#[test]
fn delete_by_key() {
    let (sql, params) = sqlite(Statement::Delete(DeleteByKey {
        table: sales_day(),
        key: ValueRecord::from_vec(vec![date(2020, 10, 2).into()]),
    }));

    assert_eq!(sql, r#"DELETE FROM "sales_2020Q4" WHERE date("day") = date(?1);"#);
    assert_eq!(params, vec![Value::Date(date(2020, 10, 2))]);
}

#[test]
fn composite_key() {
    let table = Arc::new(
        Table::builder("sales")
            .column("region", Type::String)
            .column("day", Type::Date)
            .column("sales", Type::U64)
            .key(["region", "day"])
            .build()
            .unwrap(),
    );

    let (sql, _) = sqlite(Statement::Delete(DeleteByKey {
        table,
        key: ValueRecord::from_vec(vec!["eu".into(), date(2020, 10, 2).into()]),
    }));

    assert_eq!(
        sql,
        r#"DELETE FROM "sales" WHERE "region" = ?1 AND date("day") = date(?2);"#
    );
}
