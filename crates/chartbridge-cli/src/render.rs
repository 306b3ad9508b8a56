use crate::{Config, Sources};
use anyhow::{Context, Result};
use chartbridge::embed;
use clap::Parser;
use console::style;
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
pub struct RenderCommand {
    /// Name of the chart to render
    chart: String,

    /// Filter replacing the chart's configured filter
    #[arg(long)]
    filter: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a standalone HTML page instead of JSON
    #[arg(long)]
    html: bool,

    /// Pretty-print the JSON
    #[arg(long, conflicts_with = "html")]
    pretty: bool,
}

impl RenderCommand {
    pub(crate) async fn run(self, config: &Config, sources: &Sources<'_>) -> Result<()> {
        let plan = config.plan(&self.chart, self.filter.as_deref())?;
        let source = sources.get(&plan.source)?;

        let spec = plan
            .pipeline
            .run(&source, &plan.query)
            .await
            .with_context(|| format!("failed to render chart `{}`", self.chart))?;

        let rendered = if self.html {
            let title = spec.title().unwrap_or(&self.chart);
            embed::html_page(title, &spec)?
        } else if self.pretty {
            spec.to_json_pretty()?
        } else {
            spec.to_json()?
        };

        match &self.output {
            Some(path) => {
                fs::write(path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?;

                eprintln!(
                    "  {} Rendered {} ({} rows) to {}",
                    style("✔").green().bold(),
                    style(&self.chart).bold(),
                    spec.values().len(),
                    style(path.display()).cyan()
                );
            }
            None => println!("{rendered}"),
        }

        Ok(())
    }
}
