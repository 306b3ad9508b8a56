use super::Operation;
use crate::{schema::Table, stmt};

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Insert {
    pub table: Arc<Table>,

    /// One value per mapped column, in column order
    pub values: stmt::ValueRecord,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
