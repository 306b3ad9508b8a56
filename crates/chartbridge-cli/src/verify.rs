use crate::{Config, Sources};
use anyhow::{bail, Result};
use chartbridge::Reader;
use clap::Parser;
use console::style;

#[derive(Parser, Debug)]
pub struct VerifyCommand {}

impl VerifyCommand {
    pub(crate) async fn run(self, config: &Config, sources: &Sources<'_>) -> Result<()> {
        println!();
        println!("  {}", style("Verify Mappings").cyan().bold().underlined());
        println!();

        let bindings = config.bindings();

        if bindings.is_empty() {
            println!(
                "  {}",
                style("No charts configured; nothing to verify.")
                    .magenta()
                    .dim()
            );
            println!();
            return Ok(());
        }

        let mut failed = 0;

        for (source_name, table_name) in bindings {
            let table = config.table(table_name)?;
            let source = sources.get(source_name)?;

            match Reader::new(table).verify(&source).await {
                Ok(()) => println!(
                    "  {} {} matches source {}",
                    style("✔").green().bold(),
                    style(table_name).bold(),
                    style(source_name).cyan()
                ),
                Err(err) => {
                    failed += 1;
                    println!(
                        "  {} {} on source {}: {}",
                        style("✖").red().bold(),
                        style(table_name).bold(),
                        style(source_name).cyan(),
                        err
                    );
                }
            }
        }

        println!();

        if failed > 0 {
            bail!("{failed} mapping(s) do not match their source");
        }

        Ok(())
    }
}
