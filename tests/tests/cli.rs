use chartbridge_cli::{ChartbridgeCli, Config};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tests::{assert_err, assert_ok, sales_source};

const CONFIG: &str = r#"
[sources.sales_db]
url = "sqlite::memory:"

[tables.sales_day]
table = "sales_2020Q4"
key = ["day"]
columns = [
  { name = "day", type = "date" },
  { name = "sales", type = "u64" },
]

[tables.sales_region]
table = "sales_2020Q4"
read_only = true
columns = [
  { name = "day", type = "date" },
  { name = "region", type = "text", nullable = true },
]

[charts.sales]
source = "sales_db"
table = "sales_day"
mark = "bar"
width = 800
filter = "sales > 0"
columns = [{ name = "day", transform = "calendar_date" }, { name = "sales" }]

[charts.sales.encoding]
x = { field = "day", type = "temporal", title = "Day", time_unit = "utcyearmonthdate" }
y = { field = "sales", title = "Sales" }
tooltip = [{ field = "day", type = "temporal", time_unit = "utcyearmonthdate" }, { field = "sales" }]
"#;

fn output_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("chartbridge-{}-{name}", std::process::id()))
}

#[tokio::test]
async fn render_to_file() {
    let (_driver, source) = sales_source().await;
    let config: Config = assert_ok!(CONFIG.parse());
    let cli = ChartbridgeCli::with_config(config).source(source);

    let path = output_path("sales.json");
    assert_ok!(
        cli.parse_from([
            "chartbridge",
            "render",
            "sales",
            "--output",
            path.to_str().unwrap(),
        ])
        .await
    );

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(json["mark"], "bar");
    assert_eq!(json["width"], 800);
    assert_eq!(json["data"]["values"].as_array().unwrap().len(), 3);
    assert_eq!(json["encoding"]["x"]["timeUnit"], "utcyearmonthdate");
    assert_eq!(json["encoding"]["y"]["type"], "quantitative");
}

#[tokio::test]
async fn render_html_with_filter_override() {
    let (_driver, source) = sales_source().await;
    let config: Config = assert_ok!(CONFIG.parse());
    let cli = ChartbridgeCli::with_config(config).source(source);

    let path = output_path("sales.html");
    assert_ok!(
        cli.parse_from([
            "chartbridge",
            "render",
            "sales",
            "--filter",
            "sales >= 210",
            "--html",
            "--output",
            path.to_str().unwrap(),
        ])
        .await
    );

    let page = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("vegaEmbed(\"#chart\""));
    assert!(page.contains("\"sales\":215"));
    assert!(!page.contains("\"sales\":208"));
}

#[tokio::test]
async fn verify_reports_mismatches() {
    let (_driver, source) = sales_source().await;
    let config: Config = assert_ok!(CONFIG.parse());
    let cli = ChartbridgeCli::with_config(config).source(source);
    assert_ok!(cli.parse_from(["chartbridge", "verify"]).await);

    let broken = CONFIG.replacen(
        r#"{ name = "day", type = "date" }"#,
        r#"{ name = "day", type = "bytes" }"#,
        1,
    );
    let (_driver, source) = sales_source().await;
    let config: Config = assert_ok!(broken.parse());
    let cli = ChartbridgeCli::with_config(config).source(source);
    let err = assert_err!(cli.parse_from(["chartbridge", "verify"]).await);
    assert!(err.to_string().contains("1 mapping(s)"));
}

#[tokio::test]
async fn unknown_chart() {
    let config: Config = assert_ok!(CONFIG.parse());
    let cli = ChartbridgeCli::with_config(config);

    let err = assert_err!(cli.parse_from(["chartbridge", "render", "revenue"]).await);
    assert_eq!(err.to_string(), "unknown chart `revenue`");
}
