use super::{Builder, Column, ColumnId};
use crate::{Error, Result};

/// A schema mapping for one external table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Name of the external table
    pub name: String,

    /// The mapped columns, in declaration order
    pub columns: Vec<Column>,

    pub identity: Identity,
}

/// How rows of a mapped table are identified.
///
/// There is no implicit identity: a mapping either names its key columns or
/// declares itself read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Key(Vec<ColumnId>),
    ReadOnly,
}

impl Table {
    pub fn builder(name: impl Into<String>) -> Builder {
        Builder::new(name)
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        &self.columns[id.into().0]
    }

    /// Finds a column by application name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name.app_name == name)
    }

    pub fn key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        let key: &[ColumnId] = match &self.identity {
            Identity::Key(columns) => columns,
            Identity::ReadOnly => &[],
        };
        key.iter().map(|id| &self.columns[id.0])
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.identity, Identity::ReadOnly)
    }

    /// Returns the key column ids, or `Error::read_only_table` when the
    /// mapping has no declared key.
    pub fn require_key(&self) -> Result<&[ColumnId]> {
        match &self.identity {
            Identity::Key(columns) => Ok(columns),
            Identity::ReadOnly => Err(Error::read_only_table(&self.name)),
        }
    }
}
