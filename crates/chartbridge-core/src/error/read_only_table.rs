use super::Error;

/// Error when a write is attempted against a mapping without a declared key.
#[derive(Debug)]
pub(super) struct ReadOnlyTable {
    table: Box<str>,
}

impl std::error::Error for ReadOnlyTable {}

impl core::fmt::Display for ReadOnlyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "table `{}` is read-only; writes require a declared key",
            self.table
        )
    }
}

impl Error {
    /// Creates a read-only table error.
    pub fn read_only_table(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ReadOnlyTable(ReadOnlyTable {
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is a read-only table error.
    pub fn is_read_only_table(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ReadOnlyTable(_)))
    }
}
