//! Column-oriented tables built from rows.

mod shape;
pub use shape::{all_columns, check_columns, shape};

mod table;
pub use table::ColumnarTable;

mod transform;
pub use transform::Transform;

use serde::Deserialize;

/// A column to extract from the rows, with an optional transform.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnSpec {
    pub name: String,

    #[serde(default)]
    pub transform: Option<Transform>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: None,
        }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl From<&str> for ColumnSpec {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
