use anyhow::{bail, Context, Result};
use chartbridge::{
    chart::FieldDef,
    columnar::{self, ColumnSpec},
    schema::ColumnDef,
    stmt::Type,
    ChartConfig, Pipeline, Query, Reader, Source, Table,
};
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path, str::FromStr, sync::Arc, time::Duration};

/// The configuration file: named sources, table mappings and charts.
///
/// Loading validates every mapping and every chart's references, so a
/// configuration that loads never fails on them later.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub sources: BTreeMap<String, SourceConfig>,

    #[serde(default)]
    pub tables: BTreeMap<String, TableConfig>,

    #[serde(default)]
    pub charts: BTreeMap<String, ChartEntry>,

    /// Mappings built from `tables` during validation
    #[serde(skip)]
    mappings: BTreeMap<String, Arc<Table>>,
}

/// A foreign data source, identified by connection URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub url: String,

    /// Bound on every connect and query, in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// A schema mapping for one external table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Name of the external table
    pub table: String,

    #[serde(default)]
    pub key: Option<Vec<String>>,

    #[serde(default)]
    pub read_only: bool,

    pub columns: Vec<ColumnConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    /// External column name, when it differs from `name`
    #[serde(default)]
    pub column: Option<String>,

    #[serde(default)]
    pub nullable: bool,
}

/// A chart: where its rows come from, how they are shaped and how they are
/// drawn.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartEntry {
    pub source: String,

    pub table: String,

    #[serde(default)]
    pub filter: Option<String>,

    /// Columns to extract. Empty means every mapped field.
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,

    #[serde(flatten)]
    pub chart: ChartConfig,

    /// Keys neither the entry nor the chart config recognize
    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Everything needed to render one chart.
#[derive(Debug)]
pub struct RenderPlan {
    pub source: String,
    pub pipeline: Pipeline,
    pub query: Query,
}

impl Config {
    /// Load and validate a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// The validated mapping named `name`
    pub fn table(&self, name: &str) -> Result<Arc<Table>> {
        match self.mappings.get(name) {
            Some(table) => Ok(table.clone()),
            None => bail!("unknown table `{name}`"),
        }
    }

    /// Creates the source named `name`. No connection is opened.
    pub fn source(&self, name: &str) -> Result<Source> {
        let Some(config) = self.sources.get(name) else {
            bail!("unknown source `{name}`");
        };

        let mut source = Source::from_url(name, &config.url)?;
        if let Some(timeout_ms) = config.timeout_ms {
            source = source.with_timeout(Duration::from_millis(timeout_ms));
        }
        Ok(source)
    }

    pub fn chart(&self, name: &str) -> Result<&ChartEntry> {
        match self.charts.get(name) {
            Some(chart) => Ok(chart),
            None => bail!("unknown chart `{name}`"),
        }
    }

    /// Plans a render of chart `name`. `filter` replaces the configured
    /// filter.
    pub fn plan(&self, name: &str, filter: Option<&str>) -> Result<RenderPlan> {
        let chart = self.chart(name)?;
        let table = self.table(&chart.table)?;

        let query = match filter.or(chart.filter.as_deref()) {
            Some(filter) => Query::parse(filter)?,
            None => Query::all(),
        };

        // Bind once up front so a bad filter fails before connecting.
        query
            .bind(&table)
            .with_context(|| format!("invalid filter for chart `{name}`"))?;

        let mut pipeline = Pipeline::new(Reader::new(table), chart.chart.clone());
        if !chart.columns.is_empty() {
            pipeline = pipeline.columns(chart.columns.clone());
        }

        Ok(RenderPlan {
            source: chart.source.clone(),
            pipeline,
            query,
        })
    }

    /// Distinct `(source, table)` pairs used by charts
    pub fn bindings(&self) -> Vec<(&str, &str)> {
        let mut bindings: Vec<_> = self
            .charts
            .values()
            .map(|chart| (chart.source.as_str(), chart.table.as_str()))
            .collect();
        bindings.sort_unstable();
        bindings.dedup();
        bindings
    }

    fn validate(&mut self) -> Result<()> {
        for (name, table) in &self.tables {
            let mapping = table
                .to_table()
                .with_context(|| format!("invalid table `{name}`"))?;
            self.mappings.insert(name.clone(), Arc::new(mapping));
        }

        for (name, chart) in &self.charts {
            self.validate_chart(chart)
                .with_context(|| format!("invalid chart `{name}`"))?;
        }

        Ok(())
    }

    fn validate_chart(&self, chart: &ChartEntry) -> Result<()> {
        if let Some(key) = chart.unknown.keys().next() {
            bail!("unknown field `{key}`");
        }

        if !self.sources.contains_key(&chart.source) {
            bail!("unknown source `{}`", chart.source);
        }

        let table = self.table(&chart.table)?;

        if let Some(filter) = &chart.filter {
            Query::parse(filter)?.bind(&table)?;
        }

        let columns = if chart.columns.is_empty() {
            columnar::all_columns(&table)
        } else {
            columnar::check_columns(&table, &chart.columns)?;
            chart.columns.clone()
        };

        let encoding = &chart.chart.encoding;
        let fields = encoding
            .channels()
            .map(|(_, def)| def)
            .chain(&encoding.tooltip);

        for FieldDef { field, .. } in fields {
            if !columns.iter().any(|column| column.name == *field) {
                bail!("encoding references `{field}`, which is not one of the chart's columns");
            }
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl TableConfig {
    pub fn to_table(&self) -> chartbridge::Result<Table> {
        let mut builder = Table::builder(&self.table);

        for column in &self.columns {
            let ty: Type = column.ty.parse()?;
            let mut def = ColumnDef::new(&column.name, ty).set_nullable(column.nullable);
            if let Some(storage_name) = &column.column {
                def = def.storage_name(storage_name);
            }
            builder = builder.column_with(def);
        }

        if let Some(key) = &self.key {
            builder = builder.key(key);
        }

        if self.read_only {
            builder = builder.read_only();
        }

        builder.build()
    }
}
