use crate::{Query, Record, Row, Source};

use chartbridge_core::{schema::Table, stmt::ValueRecord, Error, Result};

use std::sync::Arc;

/// Reads rows of one mapped table.
///
/// The reader holds no connection between calls. Each read opens a
/// connection, verifies the mapping against the external table, runs one
/// query and drops the connection before returning.
#[derive(Debug, Clone)]
pub struct Reader {
    table: Arc<Table>,
}

impl Reader {
    pub fn new(table: impl Into<Arc<Table>>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// A reader for the mapping generated by `#[derive(Record)]`.
    pub fn for_record<R: Record>() -> Self {
        Self::new(R::table())
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Reads the rows matching `query`, in query order.
    pub async fn read(&self, source: &Source, query: &Query) -> Result<Vec<Row>> {
        // Malformed queries fail before any I/O.
        let select = query.bind(&self.table)?;

        let mut connection = source.connect_verified(&self.table).await?;

        log::debug!(
            "reading `{}` from source `{}`; filter={:?}",
            self.table.name,
            source.name(),
            select.filter
        );

        let records = source
            .exec(&mut connection, select.into())
            .await?
            .rows
            .into_values()?;

        drop(connection);

        let rows = records
            .into_iter()
            .map(|record| self.row(record))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("read {} rows from `{}`", rows.len(), self.table.name);

        Ok(rows)
    }

    pub async fn read_all(&self, source: &Source) -> Result<Vec<Row>> {
        self.read(source, &Query::all()).await
    }

    /// Checks the mapping against the source without reading rows.
    pub async fn verify(&self, source: &Source) -> Result<()> {
        source.connect_verified(&self.table).await?;
        Ok(())
    }

    fn row(&self, record: ValueRecord) -> Result<Row> {
        if record.len() != self.table.columns.len() {
            return Err(Error::schema_mismatch(format!(
                "source returned {} values for `{}`, which maps {} columns",
                record.len(),
                self.table.name,
                self.table.columns.len()
            )));
        }

        for (column, value) in self.table.columns.iter().zip(record.iter()) {
            if value.is_null() && !column.nullable {
                return Err(Error::schema_mismatch(format!(
                    "column `{}` in `{}` is not nullable but the source returned null",
                    column.storage_name(),
                    self.table.name
                )));
            }
        }

        Ok(Row::new(self.table.clone(), record))
    }
}
