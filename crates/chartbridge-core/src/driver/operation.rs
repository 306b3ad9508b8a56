mod delete_by_key;
pub use delete_by_key::DeleteByKey;

mod insert;
pub use insert::Insert;

mod select;
pub use select::Select;

mod update_by_key;
pub use update_by_key::UpdateByKey;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Read rows from a mapped table
    Select(Select),

    /// Create a new record
    Insert(Insert),

    /// Update a record by its declared key
    UpdateByKey(UpdateByKey),

    /// Delete a record by its declared key
    DeleteByKey(DeleteByKey),
}

impl Operation {
    pub fn is_read(&self) -> bool {
        matches!(self, Operation::Select(_))
    }
}
