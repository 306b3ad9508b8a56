use chartbridge::{
    chart::{self, Channel, ChartConfig, Encoding, FieldDef, Mark, VisualType},
    stmt::Value,
    ColumnarTable,
};
use jiff::civil::date;
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{assert_err, assert_ok};

fn two_days() -> ColumnarTable {
    assert_ok!(ColumnarTable::from_columns([
        (
            "day",
            vec![
                Value::Date(date(2020, 10, 1)),
                Value::Date(date(2020, 10, 2)),
            ]
        ),
        ("sales", vec![Value::U64(208), Value::U64(215)]),
    ]))
}

fn sales_chart() -> ChartConfig {
    ChartConfig::new(Mark::Bar).width(800).encoding(
        Encoding::default()
            .x(FieldDef::new("day:temporal").title("Day").time_unit("yearmonthdate"))
            .y(FieldDef::new("sales:quantitative").title("Sales")),
    )
}

#[test]
fn two_day_bar_chart() {
    let spec = assert_ok!(chart::build(&two_days(), &sales_chart()));

    assert_eq!(spec.values().len(), 2);

    let x = spec.channel("x").and_then(Channel::as_field).unwrap();
    assert_eq!(x.field, "day");
    assert_eq!(x.ty, VisualType::Temporal);

    let y = spec.channel("y").and_then(Channel::as_field).unwrap();
    assert_eq!(y.field, "sales");
    assert_eq!(y.ty, VisualType::Quantitative);

    let json: serde_json::Value = serde_json::from_str(&assert_ok!(spec.to_json())).unwrap();
    assert_eq!(
        json,
        json!({
            "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
            "mark": "bar",
            "width": 800,
            "data": {
                "values": [
                    { "day": "2020-10-01", "sales": 208 },
                    { "day": "2020-10-02", "sales": 215 },
                ]
            },
            "encoding": {
                "x": { "field": "day", "type": "temporal", "title": "Day", "timeUnit": "yearmonthdate" },
                "y": { "field": "sales", "type": "quantitative", "title": "Sales" },
            }
        })
    );
}

#[test]
fn building_twice_is_byte_identical() {
    let config = sales_chart().title("Q4 sales").description("Daily sales");
    let config = ChartConfig {
        encoding: config
            .encoding
            .clone()
            .color("sales")
            .tooltip("day:T")
            .tooltip("sales"),
        ..config
    };

    let a = assert_ok!(assert_ok!(chart::build(&two_days(), &config)).to_json());
    let b = assert_ok!(assert_ok!(chart::build(&two_days(), &config)).to_json());
    assert_eq!(a, b);
}

#[test]
fn encoding_references_only_data_columns() {
    let config = sales_chart();
    let spec = assert_ok!(chart::build(&two_days(), &config));

    for field in spec.encoded_fields() {
        assert!(spec.values().iter().all(|row| row.contains_key(field)));
    }
}

#[test]
fn absent_column_is_an_encoding_error() {
    let config = ChartConfig::new(Mark::Line)
        .encoding(Encoding::default().x("day:T").y("revenue:Q"));

    let err = assert_err!(chart::build(&two_days(), &config));
    assert!(err.is_encoding());
    assert_eq!(
        err.to_string(),
        "encoding error: channel `y` references column `revenue`, which is not in the data"
    );
}

#[test]
fn unknown_visual_type() {
    let config = ChartConfig::new(Mark::Bar).encoding(Encoding::default().x("day:temporl"));

    let err = assert_err!(chart::build(&two_days(), &config));
    assert!(err.is_invalid_encoding_type());
}

#[test]
fn time_units_are_validated() {
    let config = ChartConfig::new(Mark::Bar)
        .encoding(Encoding::default().x(FieldDef::new("day:T").time_unit("fortnight")));
    let err = assert_err!(chart::build(&two_days(), &config));
    assert!(err.is_encoding());

    let config = ChartConfig::new(Mark::Bar)
        .encoding(Encoding::default().y(FieldDef::new("sales:Q").time_unit("year")));
    let err = assert_err!(chart::build(&two_days(), &config));
    assert!(err.is_encoding());
    assert!(err.to_string().contains("rather than temporal"));
}

#[test]
fn types_are_inferred_from_values() {
    let table = assert_ok!(ColumnarTable::from_columns([
        ("day", vec![Value::Null, Value::Date(date(2020, 10, 1))]),
        ("sales", vec![Value::U64(208), Value::Null]),
        ("region", vec![Value::from("north"), Value::from("south")]),
        ("closed", vec![Value::Bool(false), Value::Bool(true)]),
    ]));

    let config = ChartConfig::new(Mark::Point).encoding(
        Encoding::default()
            .x("day")
            .y("sales")
            .color("region")
            .shape("closed"),
    );
    let spec = assert_ok!(chart::build(&table, &config));

    let ty = |channel: &str| {
        spec.channel(channel)
            .and_then(Channel::as_field)
            .map(|def| def.ty)
            .unwrap()
    };

    assert_eq!(ty("x"), VisualType::Temporal);
    assert_eq!(ty("y"), VisualType::Quantitative);
    assert_eq!(ty("color"), VisualType::Nominal);
    assert_eq!(ty("shape"), VisualType::Nominal);

    // A time unit alone implies a temporal channel.
    let config = ChartConfig::new(Mark::Bar)
        .encoding(Encoding::default().x(FieldDef::new("day").time_unit("utcyearmonthdate")));
    let spec = assert_ok!(chart::build(&table, &config));
    assert_eq!(
        spec.channel("x").and_then(Channel::as_field).map(|def| def.ty),
        Some(VisualType::Temporal)
    );
}

#[test]
fn tooltip_is_a_list() {
    let config = ChartConfig::new(Mark::Bar).encoding(
        Encoding::default()
            .x("day:T")
            .tooltip(FieldDef::new("day:T").title("Day").time_unit("utcyearmonthdate"))
            .tooltip("sales"),
    );
    let spec = assert_ok!(chart::build(&two_days(), &config));

    let json: serde_json::Value = serde_json::from_str(&assert_ok!(spec.to_json())).unwrap();
    assert_eq!(
        json["encoding"]["tooltip"],
        json!([
            { "field": "day", "type": "temporal", "title": "Day", "timeUnit": "utcyearmonthdate" },
            { "field": "sales", "type": "quantitative" },
        ])
    );
    assert_eq!(spec.channel("tooltip").and_then(Channel::as_list).map(<[_]>::len), Some(2));
}

#[test]
fn bytes_cannot_be_embedded() {
    let table = assert_ok!(ColumnarTable::from_columns([(
        "raw",
        vec![Value::Bytes(vec![0xde, 0xad])]
    )]));

    let err = assert_err!(chart::build(&table, &ChartConfig::new(Mark::Tick)));
    assert!(err.is_encoding());
}

#[test]
fn embeddable_json_survives_script_tags() {
    let table = assert_ok!(ColumnarTable::from_columns([(
        "label",
        vec![Value::from("</script><script>alert(1)</script>")]
    )]));
    let config = ChartConfig::new(Mark::Text)
        .title("A & B")
        .encoding(Encoding::default().text("label"));
    let spec = assert_ok!(chart::build(&table, &config));

    let embeddable = assert_ok!(spec.to_embeddable_json());
    assert!(!embeddable.contains('<'));
    assert!(!embeddable.contains('&'));

    let decoded: serde_json::Value = serde_json::from_str(&embeddable).unwrap();
    let plain: serde_json::Value = serde_json::from_str(&assert_ok!(spec.to_json())).unwrap();
    assert_eq!(decoded, plain);

    let page = assert_ok!(chartbridge::embed::html_page("A & B", &spec));
    assert!(page.contains("<title>A &amp; B</title>"));
    assert!(page.contains("vega-lite@5"));
    assert!(page.contains(&embeddable));
}

#[test]
fn marks_parse_from_names() {
    for mark in Mark::ALL {
        assert_eq!(assert_ok!(mark.as_str().parse::<Mark>()), *mark);
    }

    assert!(assert_err!("pie".parse::<Mark>()).is_encoding());
}
