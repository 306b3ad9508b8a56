use super::Error;

/// Error when the foreign source does not match the schema mapping.
///
/// This occurs when:
/// - The external table does not exist
/// - A mapped column is missing from the external table
/// - A column's storage class cannot hold the declared type
/// - A stored value cannot be decoded as the declared type, or is `NULL` in a
///   column declared non-nullable
#[derive(Debug)]
pub(super) struct SchemaMismatch {
    message: Box<str>,
}

impl std::error::Error for SchemaMismatch {}

impl core::fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "schema mismatch: {}", self.message)
    }
}

impl Error {
    /// Creates a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaMismatch(SchemaMismatch {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema mismatch error.
    pub fn is_schema_mismatch(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::SchemaMismatch(_)))
    }
}
