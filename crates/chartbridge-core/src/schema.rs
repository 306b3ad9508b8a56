//! Schema mappings: the static declaration binding a foreign table's columns
//! to semantic types.
//!
//! A mapping never owns the external table. It is checked against the live
//! source with [`Table::verify`] before rows are read.

mod builder;
pub use builder::{Builder, ColumnDef};

mod column;
pub use column::{Column, ColumnId, FieldName};

mod source;
pub use source::{SourceColumn, StorageClass};

mod table;
pub use table::{Identity, Table};

mod verify;

/// Names that address rows on the read side and therefore cannot name a field.
pub const RESERVED_NAMES: &[&str] = &["pk", "rowid", "oid", "_rowid_"];

/// Implicit row identifiers a source exposes without declaring them as
/// columns. A field cannot be read from one of these.
pub const ROW_ID_COLUMNS: &[&str] = &["rowid", "oid", "_rowid_"];

/// Returns true if `name` collides with a reserved row-addressing identifier.
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// Returns true if `name` is an implicit row identifier rather than a column.
pub fn is_row_id_column(name: &str) -> bool {
    ROW_ID_COLUMNS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}
