use crate::{
    chart::{self, ChartConfig, ChartSpec},
    columnar::{self, ColumnSpec},
    Query, Reader, Source,
};

use chartbridge_core::Result;

/// One chart request: read, shape, build.
///
/// A pipeline holds no connection or intermediate state; it can be run
/// concurrently against the same source.
#[derive(Debug, Clone)]
pub struct Pipeline {
    reader: Reader,
    columns: Vec<ColumnSpec>,
    chart: ChartConfig,
}

impl Pipeline {
    /// Creates a pipeline extracting every field of the reader's mapping.
    pub fn new(reader: Reader, chart: ChartConfig) -> Self {
        let columns = columnar::all_columns(reader.table());
        Self {
            reader,
            columns,
            chart,
        }
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<ColumnSpec>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    pub fn chart(&self) -> &ChartConfig {
        &self.chart
    }

    pub async fn run(&self, source: &Source, query: &Query) -> Result<ChartSpec> {
        columnar::check_columns(self.reader.table(), &self.columns)?;

        let rows = self.reader.read(source, query).await?;
        let table = columnar::shape(&rows, &self.columns)?;
        let spec = chart::build(&table, &self.chart)?;

        log::info!(
            "built {} chart from {} rows of `{}` (source `{}`)",
            self.chart.mark,
            table.len(),
            self.reader.table().name,
            source.name()
        );

        Ok(spec)
    }
}
