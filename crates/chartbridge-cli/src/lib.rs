mod config;
mod render;
mod verify;

pub use config::*;
pub use render::RenderCommand;
pub use verify::VerifyCommand;

use anyhow::Result;
use chartbridge::Source;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Chartbridge CLI library for building custom command-line tools
#[derive(Debug, Default)]
pub struct ChartbridgeCli {
    config: Option<Config>,
    sources: Vec<Source>,
}

impl ChartbridgeCli {
    /// Create a CLI that loads its configuration from `--config`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a CLI with an already loaded configuration. `--config` is ignored.
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Some(config),
            sources: vec![],
        }
    }

    /// Use `source` in place of the configured source with the same name
    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli).await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::parse_from(args);
        self.run(cli).await
    }

    async fn run(&self, cli: Cli) -> Result<()> {
        let loaded;
        let config = match &self.config {
            Some(config) => config,
            None => {
                loaded = load_config(&cli.config)?;
                &loaded
            }
        };

        let sources = Sources {
            config,
            overrides: &self.sources,
        };

        match cli.command {
            Command::Render(cmd) => cmd.run(config, &sources).await,
            Command::Verify(cmd) => cmd.run(config, &sources).await,
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    log::debug!("loading configuration from {}", path.display());
    Config::load(path)
}

/// Resolves source names, preferring sources registered on the CLI.
pub(crate) struct Sources<'a> {
    config: &'a Config,
    overrides: &'a [Source],
}

impl Sources<'_> {
    pub(crate) fn get(&self, name: &str) -> Result<Source> {
        match self.overrides.iter().find(|source| source.name() == name) {
            Some(source) => Ok(source.clone()),
            None => self.config.source(name),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chartbridge")]
#[command(about = "Chartbridge CLI - render Vega-Lite charts from foreign SQL tables")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "chartbridge.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Read a chart's rows and write its Vega-Lite specification
    Render(RenderCommand),

    /// Check every chart's table mapping against its source
    Verify(VerifyCommand),
}
