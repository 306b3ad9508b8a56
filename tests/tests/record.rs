use chartbridge::{
    delete_record, insert_record, read_records, update_record, Query, Reader, Record,
};
use jiff::civil::{date, Date};
use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, sales_source, SALES_ROWS};

#[derive(Debug, PartialEq, Record)]
#[table = "sales_2020Q4"]
struct SalesDay {
    #[key]
    day: Date,

    sales: u64,
}

#[derive(Debug, PartialEq, Record)]
#[table = "sales_2020Q4"]
#[read_only]
struct RegionNote {
    #[column("day")]
    date: Date,

    region: Option<String>,

    note: Option<String>,
}

#[test]
fn derived_mapping() {
    let table = SalesDay::table();
    assert_eq!(table.name, "sales_2020Q4");
    assert_eq!(table.columns.len(), 2);
    assert!(table.columns[0].primary_key);
    assert!(!table.columns[1].nullable);

    let table = RegionNote::table();
    assert!(table.is_read_only());
    assert_eq!(table.columns[0].app_name(), "date");
    assert_eq!(table.columns[0].storage_name(), "day");
    assert!(table.columns[1].nullable);
}

#[tokio::test]
async fn read_typed_records() {
    let (_driver, source) = sales_source().await;

    let days: Vec<SalesDay> = assert_ok!(read_records(&source, &Query::all()).await);
    assert_eq!(days.len(), SALES_ROWS);
    assert_eq!(
        days[0],
        SalesDay {
            day: date(2020, 10, 1),
            sales: 208
        }
    );

    let query = assert_ok!(Query::parse("note is not null"));
    let notes: Vec<RegionNote> = assert_ok!(read_records(&source, &query).await);
    assert_eq!(
        notes,
        [
            RegionNote {
                date: date(2020, 10, 3),
                region: Some("north".to_string()),
                note: Some("storm".to_string()),
            },
            RegionNote {
                date: date(2020, 10, 4),
                region: None,
                note: Some("closed".to_string()),
            },
        ]
    );
}

#[tokio::test]
async fn write_keyed_records() {
    let (_driver, source) = sales_source().await;

    let new_day = SalesDay {
        day: date(2020, 10, 5),
        sales: 230,
    };
    assert_ok!(insert_record(&source, new_day).await);

    assert_ok!(
        update_record(
            &source,
            SalesDay {
                day: date(2020, 10, 1),
                sales: 210,
            }
        )
        .await
    );

    let query = assert_ok!(Query::parse("day = '2020-10-01' or day = '2020-10-05'"));
    let days: Vec<SalesDay> = assert_ok!(read_records(&source, &query).await);
    assert_eq!(
        days.iter().map(|d| d.sales).collect::<Vec<_>>(),
        [210, 230]
    );

    assert_ok!(delete_record(&source, &days[1]).await);
    let err = assert_err!(delete_record(&source, &days[1]).await);
    assert!(err.is_record_not_found());
    assert_eq!(
        err.to_string(),
        "record not found: table=sales_2020Q4 key=(2020-10-05)"
    );

    let rows = assert_ok!(Reader::for_record::<SalesDay>().read_all(&source).await);
    assert_eq!(rows.len(), SALES_ROWS);
}
