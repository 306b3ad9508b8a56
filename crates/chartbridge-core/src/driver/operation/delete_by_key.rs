use super::Operation;
use crate::{schema::Table, stmt};

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DeleteByKey {
    /// Which table to delete from
    pub table: Arc<Table>,

    /// Key values, in the order of the table's key columns
    pub key: stmt::ValueRecord,
}

impl From<DeleteByKey> for Operation {
    fn from(value: DeleteByKey) -> Self {
        Self::DeleteByKey(value)
    }
}
