use chartbridge_cli::ChartbridgeCli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    ChartbridgeCli::new().parse_and_run().await
}
