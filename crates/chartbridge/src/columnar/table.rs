use chartbridge_core::{stmt::Value, Error, Result};

use indexmap::IndexMap;

/// Column name to an ordered sequence of values, all of equal length.
///
/// Columns keep the order they were requested in. The table is read-only once
/// built.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ColumnarTable {
    columns: IndexMap<String, Vec<Value>>,
    len: usize,
}

impl ColumnarTable {
    /// Builds a table, checking that every column has the same length.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let mut table = ColumnarTable::default();

        for (index, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();

            if index == 0 {
                table.len = values.len();
            } else if values.len() != table.len {
                return Err(Error::transform(format!(
                    "column `{name}` has {} values, expected {}",
                    values.len(),
                    table.len
                )));
            }

            if table.columns.insert(name.clone(), values).is_some() {
                return Err(Error::transform(format!("column `{name}` given twice")));
            }
        }

        Ok(table)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Value])> + '_ {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Returns row `index` as `(column, value)` pairs in column order.
    pub fn record(&self, index: usize) -> Option<impl Iterator<Item = (&str, &Value)> + '_> {
        if index >= self.len {
            return None;
        }

        Some(
            self.columns
                .iter()
                .map(move |(name, values)| (name.as_str(), &values[index])),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_columns() {
        let err = ColumnarTable::from_columns([
            ("day", vec![Value::from("2020-10-01"), Value::from("2020-10-02")]),
            ("sales", vec![Value::from(208u64)]),
        ])
        .unwrap_err();

        assert!(err.is_transform());
        assert_eq!(
            err.to_string(),
            "transform error: column `sales` has 1 values, expected 2"
        );
    }

    #[test]
    fn records_follow_column_order() {
        let table = ColumnarTable::from_columns([
            ("sales", vec![Value::from(208u64)]),
            ("day", vec![Value::from("2020-10-01")]),
        ])
        .unwrap();

        let record: Vec<_> = table.record(0).unwrap().collect();
        assert_eq!(
            record,
            [
                ("sales", &Value::from(208u64)),
                ("day", &Value::from("2020-10-01"))
            ]
        );
        assert!(table.record(1).is_none());
    }
}
