use super::Operation;
use crate::{schema::Table, stmt};

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Select {
    /// The mapping to read through. Every mapped column is selected.
    pub table: Arc<Table>,

    /// Only return rows matching the filter. Literals are already coerced to
    /// the column types.
    pub filter: Option<stmt::Expr>,

    pub order_by: Vec<stmt::OrderBy>,

    pub limit: Option<u64>,
}

impl From<Select> for Operation {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
