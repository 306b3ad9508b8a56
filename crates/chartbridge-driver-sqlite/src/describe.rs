use chartbridge_core::{
    schema::{SourceColumn, StorageClass},
    Result,
};
use rusqlite::Connection;

use crate::Connection as SqliteConnection;

pub(crate) fn describe(connection: &Connection, table: &str) -> Result<Option<Vec<SourceColumn>>> {
    let mut stmt = connection
        .prepare_cached(r#"SELECT name, type, "notnull" FROM pragma_table_info(?1)"#)
        .map_err(SqliteConnection::map_err)?;

    let columns = stmt
        .query_map([table], |row| {
            let name: String = row.get(0)?;
            let declared: String = row.get(1)?;
            let not_null: bool = row.get(2)?;

            Ok(SourceColumn {
                storage: storage_class(&declared),
                name,
                declared,
                nullable: !not_null,
            })
        })
        .map_err(SqliteConnection::map_err)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(SqliteConnection::map_err)?;

    log::debug!("sqlite describe `{table}`: {} columns", columns.len());

    // pragma_table_info yields no rows for a missing table
    Ok((!columns.is_empty()).then_some(columns))
}

/// Maps a declared column type to a storage class using SQLite's affinity
/// rules, refined for the date and boolean types SQLite leaves to convention.
pub(crate) fn storage_class(declared: &str) -> StorageClass {
    let ty = declared.to_ascii_uppercase();

    if ty.contains("INT") {
        StorageClass::Integer
    } else if ty.contains("CHAR") || ty.contains("CLOB") || ty.contains("TEXT") {
        StorageClass::Text
    } else if ty.is_empty() || ty.contains("BLOB") {
        StorageClass::Blob
    } else if ty.contains("REAL") || ty.contains("FLOA") || ty.contains("DOUB") {
        StorageClass::Real
    } else if ty.contains("BOOL") {
        StorageClass::Boolean
    } else if ty.contains("DATETIME") || ty.contains("TIMESTAMP") {
        StorageClass::DateTime
    } else if ty.contains("DATE") {
        StorageClass::Date
    } else {
        StorageClass::Numeric
    }
}
