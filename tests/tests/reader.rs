use chartbridge::{
    driver::Driver,
    schema::{ColumnDef, Table},
    stmt::{Expr, OrderBy, Type, Value},
    Query, Reader, Source,
};
use jiff::civil::date;
use pretty_assertions::assert_eq;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tests::{assert_err, assert_ok, sales_day, sales_source, SALES_ROWS};

fn days(rows: &[chartbridge::Row]) -> Vec<Value> {
    rows.iter().map(|row| row.get("day").unwrap().clone()).collect()
}

#[tokio::test]
async fn empty_query_reads_every_row() {
    let (_driver, source) = sales_source().await;

    let rows = assert_ok!(Reader::new(sales_day()).read_all(&source).await);
    assert_eq!(rows.len(), SALES_ROWS);

    // Keyed mappings default to key order.
    assert_eq!(
        days(&rows),
        [
            Value::Date(date(2020, 10, 1)),
            Value::Date(date(2020, 10, 2)),
            Value::Date(date(2020, 10, 3)),
            Value::Date(date(2020, 10, 4)),
        ]
    );

    let first: Vec<_> = rows[0].iter().collect();
    assert_eq!(
        first,
        [
            ("day", &Value::Date(date(2020, 10, 1))),
            ("sales", &Value::U64(208)),
        ]
    );
}

#[tokio::test]
async fn filter_order_and_limit() {
    let (_driver, source) = sales_source().await;
    let reader = Reader::new(sales_day());

    let query = Query::all()
        .filter(Expr::ge("sales", 200))
        .order_by(OrderBy::desc("sales"));
    let rows = assert_ok!(reader.read(&source, &query).await);
    assert_eq!(
        days(&rows),
        [Value::Date(date(2020, 10, 2)), Value::Date(date(2020, 10, 1))]
    );

    let query = assert_ok!(Query::parse("sales > 0 and day < '2020-10-03'")).limit(1);
    let rows = assert_ok!(reader.read(&source, &query).await);
    assert_eq!(days(&rows), [Value::Date(date(2020, 10, 1))]);

    let query = assert_ok!(Query::parse("day in ('2020-10-02', '2020-10-04')"));
    let rows = assert_ok!(reader.read(&source, &query).await);
    assert_eq!(
        days(&rows),
        [Value::Date(date(2020, 10, 2)), Value::Date(date(2020, 10, 4))]
    );
}

#[tokio::test]
async fn nullable_columns_and_null_filters() {
    let (_driver, source) = sales_source().await;

    let table = assert_ok!(Table::builder("sales_2020Q4")
        .column("day", Type::Date)
        .column_with(ColumnDef::new("region", Type::String).nullable())
        .read_only()
        .build());
    let reader = Reader::new(table);

    let query = assert_ok!(Query::parse("region is null"));
    let rows = assert_ok!(reader.read(&source, &query).await);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("region"), Some(&Value::Null));

    let query = assert_ok!(Query::parse("not region = 'north'"));
    let rows = assert_ok!(reader.read(&source, &query).await);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("region"), Some(&Value::from("south")));

    let query = assert_ok!(Query::parse(
        "region like 'n%' and day between '2020-10-01' and '2020-10-02'"
    ));
    let rows = assert_ok!(reader.read(&source, &query).await);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("day"), Some(&Value::Date(date(2020, 10, 1))));
}

#[tokio::test]
async fn storage_names_map_to_field_names() {
    let (_driver, source) = sales_source().await;

    let table = assert_ok!(Table::builder("sales_2020Q4")
        .column_with(ColumnDef::new("date", Type::Date).storage_name("day"))
        .column_with(ColumnDef::new("amount", Type::F64).storage_name("sales"))
        .key(["date"])
        .build());

    let query = assert_ok!(Query::parse("amount < 200"));
    let rows = assert_ok!(Reader::new(table).read(&source, &query).await);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("amount"), Some(&Value::F64(190.0)));
    assert_eq!(rows[0].get("sales"), None);
}

#[tokio::test]
async fn malformed_queries_fail_before_io() {
    // The source does not exist, so any I/O would fail with a connection error.
    let source = Source::new("missing", chartbridge::driver::Sqlite::open("/nonexistent/sales.db"));
    let reader = Reader::new(sales_day());

    for (filter, message) in [
        ("revenue > 3", "unknown field `revenue`"),
        ("day = 'yesterday'", "value for `day` does not match its type `date`"),
        ("sales = -1", "value for `sales` does not match its type `u64`"),
        ("sales = null", "cannot compare `sales` with null"),
        ("sales like '2%'", "cannot match `sales` against a pattern"),
    ] {
        let query = assert_ok!(Query::parse(filter));
        let err = assert_err!(reader.read(&source, &query).await, "filter={filter}");
        assert!(err.is_query(), "filter={filter}; err={err}");
        assert!(err.to_string().contains(message), "filter={filter}; err={err}");
    }

    let err = assert_err!(Query::parse("sales >"));
    assert!(err.is_query());

    let query = Query::all().order_by(OrderBy::asc("revenue"));
    let err = assert_err!(reader.read(&source, &query).await);
    assert!(err.is_query());
}

#[tokio::test]
async fn unreachable_source_is_a_connection_error() {
    let source = Source::new("missing", chartbridge::driver::Sqlite::open("/nonexistent/sales.db"));

    let err = assert_err!(Reader::new(sales_day()).read_all(&source).await);
    assert!(err.is_connection(), "{err}");
}

#[tokio::test]
async fn mapping_must_match_the_source() {
    let (_driver, source) = sales_source().await;

    // Declared as text, stored as an integer.
    let table = assert_ok!(Table::builder("sales_2020Q4")
        .column("day", Type::Date)
        .column("sales", Type::String)
        .key(["day"])
        .build());
    let err = assert_err!(Reader::new(table).read_all(&source).await);
    assert!(err.is_schema_mismatch(), "{err}");

    let table = assert_ok!(Table::builder("sales_2020Q4")
        .column("day", Type::Date)
        .column("revenue", Type::U64)
        .key(["day"])
        .build());
    let err = assert_err!(Reader::new(table).read_all(&source).await);
    assert!(err.is_schema_mismatch());
    assert!(err.to_string().contains("column `revenue` is missing"));

    let table = assert_ok!(Table::builder("sales_2021Q1")
        .column("day", Type::Date)
        .read_only()
        .build());
    let err = assert_err!(Reader::new(table).read_all(&source).await);
    assert!(err.is_schema_mismatch());
    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
async fn null_in_non_nullable_column_is_a_mismatch() {
    let (_driver, source) = sales_source().await;

    let table = assert_ok!(Table::builder("sales_2020Q4")
        .column("day", Type::Date)
        .column("note", Type::String)
        .key(["day"])
        .build());

    let err = assert_err!(Reader::new(table).read_all(&source).await);
    assert!(err.is_schema_mismatch());
    assert!(err.to_string().contains("column `note`"));
}

#[tokio::test]
async fn verify_checks_without_reading() {
    let (_driver, source) = sales_source().await;
    assert_ok!(Reader::new(sales_day()).verify(&source).await);
}

#[tokio::test]
async fn timeout_is_a_connection_error() {
    let (driver, source) = sales_source().await;
    let source = source.with_timeout(Duration::from_millis(50));

    // The in-memory database admits one connection at a time.
    let held = assert_ok!(driver.connect().await);

    let err = assert_err!(Reader::new(sales_day()).read_all(&source).await);
    assert!(err.is_connection(), "{err}");
    assert!(err.to_string().contains("did not respond within 50ms"));

    drop(held);
    let rows = assert_ok!(Reader::new(sales_day()).read_all(&source).await);
    assert_eq!(rows.len(), 4);
}

#[tokio::test]
async fn timeout_interrupts_a_running_statement() {
    let (driver, source) = sales_source().await;

    // The filter on the view counts to thirty million before yielding a row.
    assert_ok!(
        driver
            .execute_batch(
                r#"
CREATE VIEW "slow_sales" AS
SELECT day, sales FROM "sales_2020Q4"
WHERE (
    WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 30000000)
    SELECT count(*) FROM n
) > 0;
"#
            )
            .await
    );

    let table = assert_ok!(Table::builder("slow_sales")
        .column("day", Type::Date)
        .column("sales", Type::U64)
        .read_only()
        .build());
    let bounded = source.clone().with_timeout(Duration::from_millis(50));

    let started = Instant::now();
    let err = assert_err!(Reader::new(table).read_all(&bounded).await);
    assert!(err.is_connection(), "{err}");
    assert!(err.to_string().contains("did not respond within 50ms"));
    assert!(started.elapsed() < Duration::from_secs(2), "{:?}", started.elapsed());

    // The interrupted statement releases the database.
    let rows = assert_ok!(Reader::new(sales_day()).read_all(&source).await);
    assert_eq!(rows.len(), SALES_ROWS);
    assert!(started.elapsed() < Duration::from_secs(2), "{:?}", started.elapsed());
}

#[tokio::test]
async fn datetime_filters_compare_instants() {
    let (driver, source) = sales_source().await;

    // A foreign writer stored timestamps with a `T` separator.
    assert_ok!(
        driver
            .execute_batch(
                r#"
CREATE TABLE "readings" (id INTEGER PRIMARY KEY, taken_at DATETIME NOT NULL);
INSERT INTO "readings" (id, taken_at) VALUES
    (1, '2020-10-01T08:00:00'),
    (2, '2020-10-01T12:00:00'),
    (3, '2020-10-02 09:30:00');
"#
            )
            .await
    );

    let table = assert_ok!(Table::builder("readings")
        .column("id", Type::I64)
        .column("taken_at", Type::DateTime)
        .key(["id"])
        .build());
    let reader = Reader::new(table);

    let ids = |rows: &[chartbridge::Row]| -> Vec<Value> {
        rows.iter().map(|row| row.get("id").unwrap().clone()).collect()
    };

    let rows = assert_ok!(reader.read_all(&source).await);
    assert_eq!(rows.len(), 3);

    let query = assert_ok!(Query::parse("taken_at > '2020-10-01T10:00:00'"));
    let rows = assert_ok!(reader.read(&source, &query).await);
    assert_eq!(ids(&rows), [Value::I64(2), Value::I64(3)]);

    let query = assert_ok!(Query::parse("taken_at = '2020-10-01T08:00:00'"));
    let rows = assert_ok!(reader.read(&source, &query).await);
    assert_eq!(ids(&rows), [Value::I64(1)]);

    let query = assert_ok!(Query::parse(
        "taken_at between '2020-10-01T09:00:00' and '2020-10-02T09:30:00'"
    ));
    let rows = assert_ok!(reader.read(&source, &query).await);
    assert_eq!(ids(&rows), [Value::I64(2), Value::I64(3)]);
}

#[tokio::test]
async fn sources_are_created_from_urls() {
    let source = assert_ok!(Source::from_url("sales_db", "sqlite::memory:"));
    assert_eq!(source.name(), "sales_db");
    assert_eq!(source.driver().url(), "sqlite::memory:");

    let err = assert_err!(Source::from_url("sales_db", "mysql://localhost/sales"));
    assert!(err.is_invalid_connection_url());

    let err = assert_err!(Source::from_url("sales_db", "sales.db"));
    assert!(err.is_invalid_connection_url());
}

#[tokio::test]
async fn concurrent_reads_share_a_source() {
    let (_driver, source) = sales_source().await;
    let reader = Arc::new(Reader::new(sales_day()));

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let reader = reader.clone();
            let source = source.clone();
            tokio::spawn(async move { reader.read_all(&source).await })
        })
        .collect();

    for task in tasks {
        let rows = assert_ok!(assert_ok!(task.await));
        assert_eq!(rows.len(), 4);
    }
}
