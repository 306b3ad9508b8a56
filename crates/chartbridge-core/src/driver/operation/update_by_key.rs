use super::Operation;
use crate::{
    schema::{ColumnId, Table},
    stmt,
};

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct UpdateByKey {
    pub table: Arc<Table>,

    /// Key values, in the order of the table's key columns
    pub key: stmt::ValueRecord,

    /// Columns to set. Key columns are never assigned.
    pub assignments: Vec<(ColumnId, stmt::Value)>,
}

impl From<UpdateByKey> for Operation {
    fn from(value: UpdateByKey) -> Self {
        Self::UpdateByKey(value)
    }
}
