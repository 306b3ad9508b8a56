use crate::{Keyed, Source};

use chartbridge_core::{
    driver::operation::{DeleteByKey, Insert, Operation, UpdateByKey},
    schema::{ColumnId, Table},
    stmt::{Value, ValueRecord},
    Error, Result,
};

use std::sync::Arc;

/// Writes rows of a mapping with a declared key.
///
/// Read-only mappings are rejected when the writer is created, before any
/// I/O.
#[derive(Debug, Clone)]
pub struct Writer {
    table: Arc<Table>,
}

impl Writer {
    pub fn new(table: impl Into<Arc<Table>>) -> Result<Self> {
        let table = table.into();
        table.require_key()?;
        Ok(Self { table })
    }

    pub fn for_record<R: Keyed>() -> Self {
        Self { table: R::table() }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Inserts one row. `values` holds one value per mapped column.
    pub async fn insert(&self, source: &Source, values: ValueRecord) -> Result<()> {
        let values = self.coerce_record(values)?;
        let op = Insert {
            table: self.table.clone(),
            values,
        };
        self.exec(source, op.into()).await?;
        Ok(())
    }

    /// Sets the named fields of the row identified by `key`.
    pub async fn update_by_key<S: AsRef<str>>(
        &self,
        source: &Source,
        key: ValueRecord,
        assignments: impl IntoIterator<Item = (S, Value)>,
    ) -> Result<()> {
        let key = self.coerce_key(key)?;
        let mut resolved = vec![];

        for (field, value) in assignments {
            let field = field.as_ref();
            let Some(column) = self.table.column_by_name(field) else {
                return Err(Error::query(format!(
                    "unknown field `{field}` in update of `{}`",
                    self.table.name
                )));
            };

            if column.primary_key {
                return Err(Error::query(format!(
                    "cannot update key field `{field}` of `{}`",
                    self.table.name
                )));
            }

            resolved.push((column.id, self.coerce(column.id, value)?));
        }

        if resolved.is_empty() {
            return Err(Error::query(format!(
                "update of `{}` assigns no fields",
                self.table.name
            )));
        }

        let op = UpdateByKey {
            table: self.table.clone(),
            key: key.clone(),
            assignments: resolved,
        };

        self.exec_one(source, op.into(), &key).await
    }

    pub async fn delete_by_key(&self, source: &Source, key: ValueRecord) -> Result<()> {
        let key = self.coerce_key(key)?;
        let op = DeleteByKey {
            table: self.table.clone(),
            key: key.clone(),
        };
        self.exec_one(source, op.into(), &key).await
    }

    async fn exec_one(&self, source: &Source, op: Operation, key: &ValueRecord) -> Result<()> {
        if self.exec(source, op).await? == 0 {
            let key = key
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            return Err(Error::record_not_found(format!(
                "table={} key=({key})",
                self.table.name
            )));
        }

        Ok(())
    }

    async fn exec(&self, source: &Source, op: Operation) -> Result<u64> {
        let mut connection = source.connect_verified(&self.table).await?;
        let count = source.exec(&mut connection, op).await?.rows.into_count()?;
        log::debug!("{count} rows affected in `{}`", self.table.name);
        Ok(count)
    }

    fn coerce_record(&self, values: ValueRecord) -> Result<ValueRecord> {
        if values.len() != self.table.columns.len() {
            return Err(Error::query(format!(
                "`{}` maps {} columns but {} values were given",
                self.table.name,
                self.table.columns.len(),
                values.len()
            )));
        }

        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| self.coerce(ColumnId(index), value))
            .collect()
    }

    fn coerce_key(&self, key: ValueRecord) -> Result<ValueRecord> {
        let columns = self.table.require_key()?;

        if key.len() != columns.len() {
            return Err(Error::query(format!(
                "key of `{}` has {} fields but {} values were given",
                self.table.name,
                columns.len(),
                key.len()
            )));
        }

        columns
            .iter()
            .zip(key)
            .map(|(id, value)| self.coerce(*id, value))
            .collect()
    }

    fn coerce(&self, id: ColumnId, value: Value) -> Result<Value> {
        let column = self.table.column(id);

        if value.is_null() && !column.nullable {
            return Err(Error::query(format!(
                "field `{}` of `{}` is not nullable",
                column.app_name(),
                self.table.name
            )));
        }

        value.coerce(column.ty).map_err(|err| {
            err.context(Error::query(format!(
                "value for `{}` does not match its type `{}`",
                column.app_name(),
                column.ty
            )))
        })
    }
}
