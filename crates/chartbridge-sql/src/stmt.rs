pub use chartbridge_core::driver::operation::{DeleteByKey, Insert, Select, UpdateByKey};
pub use chartbridge_core::stmt::*;

use chartbridge_core::{driver::Operation, schema::Table};

/// A statement against a single mapped table.
#[derive(Debug, Clone)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(UpdateByKey),
    Delete(DeleteByKey),
}

impl Statement {
    pub fn table(&self) -> &Table {
        match self {
            Statement::Select(stmt) => &stmt.table,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
            Statement::Delete(stmt) => &stmt.table,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Statement::Select(_))
    }
}

impl From<Operation> for Statement {
    fn from(value: Operation) -> Self {
        match value {
            Operation::Select(stmt) => Statement::Select(stmt),
            Operation::Insert(stmt) => Statement::Insert(stmt),
            Operation::UpdateByKey(stmt) => Statement::Update(stmt),
            Operation::DeleteByKey(stmt) => Statement::Delete(stmt),
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}
