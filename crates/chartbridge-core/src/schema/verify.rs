use super::{SourceColumn, Table};
use crate::{Error, Result};

impl Table {
    /// Checks the mapping against the columns the source reports for the
    /// external table.
    ///
    /// Unmapped source columns are ignored. Column names compare
    /// case-insensitively, as SQL identifiers do.
    pub fn verify(&self, source: &[SourceColumn]) -> Result<()> {
        for column in &self.columns {
            let storage_name = column.storage_name();

            let Some(actual) = source
                .iter()
                .find(|actual| actual.name.eq_ignore_ascii_case(storage_name))
            else {
                return Err(Error::schema_mismatch(format!(
                    "column `{storage_name}` is missing from `{}`",
                    self.name
                )));
            };

            if !actual.storage.accepts(column.ty) {
                return Err(Error::schema_mismatch(format!(
                    "column `{storage_name}` in `{}` is declared `{}` in the source, \
                     which cannot hold {}",
                    self.name, actual.declared, column.ty
                )));
            }
        }

        Ok(())
    }
}
