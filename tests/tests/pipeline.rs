use chartbridge::{
    chart::{Channel, ChartConfig, Encoding, FieldDef, Mark},
    columnar::{self, ColumnSpec, Transform},
    stmt::Value,
    Pipeline, Query, Reader,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{assert_err, assert_ok, sales_day, sales_source, SALES_ROWS};

fn dashboard() -> ChartConfig {
    ChartConfig::new(Mark::Bar).width(800).encoding(
        Encoding::default()
            .x(FieldDef::new("day:temporal")
                .title("Day")
                .time_unit("utcyearmonthdate"))
            .y(FieldDef::new("sales").title("Sales"))
            .tooltip(FieldDef::new("day:temporal")
                .title("Day")
                .time_unit("utcyearmonthdate"))
            .tooltip("sales"),
    )
}

#[tokio::test]
async fn sales_dashboard() {
    let (_driver, source) = sales_source().await;

    let pipeline = Pipeline::new(Reader::new(sales_day()), dashboard()).columns([
        ColumnSpec::new("day").transform(Transform::CalendarDate),
        ColumnSpec::new("sales"),
    ]);

    let query = assert_ok!(Query::parse("sales > 0"));
    let spec = assert_ok!(pipeline.run(&source, &query).await);

    assert_eq!(spec.values().len(), 3);
    assert_eq!(spec.values()[0]["day"], json!("2020-10-01"));
    assert_eq!(spec.values()[0]["sales"], json!(208));

    let y = spec.channel("y").and_then(Channel::as_field).unwrap();
    assert_eq!(y.ty.as_str(), "quantitative");

    let json: serde_json::Value = serde_json::from_str(&assert_ok!(spec.to_json())).unwrap();
    assert_eq!(
        json["encoding"],
        json!({
            "x": { "field": "day", "type": "temporal", "title": "Day", "timeUnit": "utcyearmonthdate" },
            "y": { "field": "sales", "type": "quantitative", "title": "Sales" },
            "tooltip": [
                { "field": "day", "type": "temporal", "title": "Day", "timeUnit": "utcyearmonthdate" },
                { "field": "sales", "type": "quantitative" },
            ],
        })
    );
}

#[tokio::test]
async fn every_column_has_the_row_count() {
    let (_driver, source) = sales_source().await;

    let rows = assert_ok!(Reader::new(sales_day()).read_all(&source).await);
    let table = assert_ok!(columnar::shape(
        &rows,
        &columnar::all_columns(&sales_day())
    ));

    assert_eq!(table.len(), SALES_ROWS);
    for (_, values) in table.columns() {
        assert_eq!(values.len(), SALES_ROWS);
    }
}

#[tokio::test]
async fn shaping_errors() {
    let (_driver, source) = sales_source().await;
    let rows = assert_ok!(Reader::new(sales_day()).read_all(&source).await);

    let err = assert_err!(columnar::shape(&rows, &["revenue".into()]));
    assert!(err.is_transform());

    let err = assert_err!(columnar::shape(&rows, &["day".into(), "day".into()]));
    assert!(err.is_transform());

    let err = assert_err!(columnar::shape(
        &rows,
        &[ColumnSpec::new("sales").transform(Transform::CalendarDate)]
    ));
    assert!(err.is_transform());

    let table = assert_ok!(columnar::shape(
        &rows,
        &[ColumnSpec::new("sales").transform(Transform::ToFloat)]
    ));
    assert_eq!(table.column("sales").unwrap()[0], Value::F64(208.0));
}

#[tokio::test]
async fn empty_result_keeps_requested_columns() {
    let (_driver, source) = sales_source().await;

    let rows = assert_ok!(
        Reader::new(sales_day())
            .read(&source, &assert_ok!(Query::parse("sales > 1000")))
            .await
    );
    assert!(rows.is_empty());

    let table = assert_ok!(columnar::shape(&rows, &["day".into(), "sales".into()]));
    assert!(table.is_empty());
    assert_eq!(table.column_names().collect::<Vec<_>>(), ["day", "sales"]);

    let pipeline = Pipeline::new(Reader::new(sales_day()), dashboard());
    let spec = assert_ok!(
        pipeline
            .run(&source, &assert_ok!(Query::parse("sales > 1000")))
            .await
    );
    assert!(spec.values().is_empty());
}

#[tokio::test]
async fn failures_emit_no_spec() {
    let (_driver, source) = sales_source().await;

    // Unknown column in the shaper request.
    let pipeline =
        Pipeline::new(Reader::new(sales_day()), dashboard()).columns(["day", "revenue"]);
    let err = assert_err!(pipeline.run(&source, &Query::all()).await);
    assert!(err.is_transform());

    // Encoding references a column that was not shaped.
    let pipeline = Pipeline::new(Reader::new(sales_day()), dashboard()).columns(["day"]);
    let err = assert_err!(pipeline.run(&source, &Query::all()).await);
    assert!(err.is_encoding());
}
