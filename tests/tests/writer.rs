use chartbridge::{
    schema::Table,
    stmt::{Type, Value, ValueRecord},
    Query, Reader, Writer,
};
use jiff::civil::date;
use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, sales_day, sales_source};

fn key(day: &str) -> ValueRecord {
    ValueRecord::from_vec(vec![Value::from(day)])
}

#[tokio::test]
async fn read_only_mappings_cannot_be_written() {
    let table = assert_ok!(Table::builder("sales_2020Q4")
        .column("day", Type::Date)
        .read_only()
        .build());

    let err = assert_err!(Writer::new(table));
    assert!(err.is_read_only_table());
}

#[tokio::test]
async fn insert_update_delete() {
    let (_driver, source) = sales_source().await;
    let writer = assert_ok!(Writer::new(sales_day()));

    assert_ok!(
        writer
            .insert(
                &source,
                ValueRecord::from_vec(vec![Value::from("2020-10-05"), Value::from(230)])
            )
            .await
    );

    assert_ok!(
        writer
            .update_by_key(&source, key("2020-10-05"), [("sales", Value::from(231))])
            .await
    );

    let rows = assert_ok!(
        Reader::new(sales_day())
            .read(&source, &assert_ok!(Query::parse("day = '2020-10-05'")))
            .await
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("day"), Some(&Value::Date(date(2020, 10, 5))));
    assert_eq!(rows[0].get("sales"), Some(&Value::U64(231)));

    assert_ok!(writer.delete_by_key(&source, key("2020-10-05")).await);
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let (_driver, source) = sales_source().await;
    let writer = assert_ok!(Writer::new(sales_day()));

    let err = assert_err!(
        writer
            .update_by_key(&source, key("2021-01-01"), [("sales", Value::from(1))])
            .await
    );
    assert!(err.is_record_not_found());

    let err = assert_err!(writer.delete_by_key(&source, key("2021-01-01")).await);
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn invalid_writes_are_query_errors() {
    let (_driver, source) = sales_source().await;
    let writer = assert_ok!(Writer::new(sales_day()));

    let err = assert_err!(
        writer
            .update_by_key(&source, key("2020-10-01"), [("day", Value::from("2020-10-09"))])
            .await
    );
    assert!(err.is_query());

    let err = assert_err!(
        writer
            .update_by_key(&source, key("2020-10-01"), Vec::<(&str, Value)>::new())
            .await
    );
    assert!(err.is_query());

    let err = assert_err!(
        writer
            .insert(&source, ValueRecord::from_vec(vec![Value::from("2020-10-06")]))
            .await
    );
    assert!(err.is_query());

    let err = assert_err!(
        writer
            .insert(
                &source,
                ValueRecord::from_vec(vec![Value::from("2020-10-06"), Value::Null])
            )
            .await
    );
    assert!(err.is_query());
}
