use chartbridge_core::{
    schema::Table,
    stmt::{Value, ValueRecord},
};

use std::sync::Arc;

/// One record read from a foreign table, typed by its mapping.
///
/// Values are stored in the mapping's column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    table: Arc<Table>,
    values: ValueRecord,
}

impl Row {
    pub(crate) fn new(table: Arc<Table>, values: ValueRecord) -> Self {
        debug_assert_eq!(table.columns.len(), values.len());
        Self { table, values }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Returns the value of a field by application name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        let column = self.table.column_by_name(field)?;
        self.values.get(column.id.0)
    }

    pub fn values(&self) -> &ValueRecord {
        &self.values
    }

    /// Iterates over `(field, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.table
            .columns
            .iter()
            .map(|column| column.app_name())
            .zip(self.values.iter())
    }

    pub fn into_record(self) -> ValueRecord {
        self.values
    }
}
