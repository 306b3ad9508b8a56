#[macro_use]
mod macros;

use chartbridge::{driver::Sqlite, schema::Table, stmt::Type, Source};

use std::sync::Arc;

/// The foreign table the sales dashboard reads. It is owned by another
/// application; tests only ever seed it.
pub const SALES_2020Q4: &str = r#"
CREATE TABLE "sales_2020Q4" (
    day DATE PRIMARY KEY,
    sales INTEGER NOT NULL,
    region TEXT,
    note TEXT
);
INSERT INTO "sales_2020Q4" (day, sales, region, note) VALUES
    ('2020-10-01', 208, 'north', NULL),
    ('2020-10-02', 215, 'south', NULL),
    ('2020-10-03', 190, 'north', 'storm'),
    ('2020-10-04', 0, NULL, 'closed');
"#;

/// Number of rows seeded into `sales_2020Q4`.
pub const SALES_ROWS: usize = 4;

/// Installs the test logger. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh in-memory source named `sales_db` holding `sales_2020Q4`.
pub async fn sales_source() -> (Sqlite, Source) {
    init_logging();

    let driver = assert_ok!(Sqlite::in_memory());
    assert_ok!(driver.execute_batch(SALES_2020Q4).await);

    let source = Source::new("sales_db", driver.clone());
    (driver, source)
}

/// The `sales_day` mapping: `day` keyed, `sales` as an unsigned count.
pub fn sales_day() -> Arc<Table> {
    Arc::new(assert_ok!(Table::builder("sales_2020Q4")
        .column("day", Type::Date)
        .column("sales", Type::U64)
        .key(["day"])
        .build()))
}
