use super::{ColumnSpec, ColumnarTable};
use crate::Row;

use chartbridge_core::{schema::Table, Error, Result};

use std::collections::HashSet;

/// Folds rows into a columnar table holding the requested columns.
///
/// Columns appear in the order requested. Every requested column must be a
/// field of the rows' mapping. With no rows the result has every requested
/// column, each empty.
pub fn shape(rows: &[Row], specs: &[ColumnSpec]) -> Result<ColumnarTable> {
    check_unique(specs)?;

    // Resolve each column to its position once, using the first row's mapping.
    let positions = match rows.first() {
        Some(row) => specs
            .iter()
            .map(|spec| position(row.table(), &spec.name))
            .collect::<Result<Vec<_>>>()?,
        None => vec![0; specs.len()],
    };

    let mut columns: Vec<_> = specs
        .iter()
        .map(|spec| (spec.name.clone(), Vec::with_capacity(rows.len())))
        .collect();

    for row in rows {
        for ((spec, index), (_, values)) in specs.iter().zip(&positions).zip(&mut columns) {
            let Some(value) = row.values().get(*index) else {
                return Err(missing(&spec.name, &row.table().name));
            };

            let value = match spec.transform {
                Some(transform) => transform.apply(&spec.name, value.clone())?,
                None => value.clone(),
            };

            values.push(value);
        }
    }

    let table = ColumnarTable::from_columns(columns)?;

    log::trace!(
        "shaped {} rows into columns {:?}",
        table.len(),
        table.column_names().collect::<Vec<_>>()
    );

    Ok(table)
}

/// Checks column requests against a mapping before any rows are read.
pub fn check_columns(table: &Table, specs: &[ColumnSpec]) -> Result<()> {
    check_unique(specs)?;

    for spec in specs {
        position(table, &spec.name)?;
    }

    Ok(())
}

/// Requests every field of `table`, untransformed.
pub fn all_columns(table: &Table) -> Vec<ColumnSpec> {
    table
        .columns
        .iter()
        .map(|column| ColumnSpec::new(column.app_name()))
        .collect()
}

fn check_unique(specs: &[ColumnSpec]) -> Result<()> {
    let mut seen = HashSet::new();

    for spec in specs {
        if !seen.insert(spec.name.as_str()) {
            return Err(Error::transform(format!(
                "column `{}` requested twice",
                spec.name
            )));
        }
    }

    Ok(())
}

fn position(table: &Table, name: &str) -> Result<usize> {
    table
        .column_by_name(name)
        .map(|column| column.id.0)
        .ok_or_else(|| missing(name, &table.name))
}

fn missing(name: &str, table: &str) -> Error {
    Error::transform(format!("column `{name}` is not a field of `{table}`"))
}
