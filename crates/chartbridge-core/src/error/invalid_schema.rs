use super::Error;

/// Error when a schema mapping is invalid.
///
/// This occurs when:
/// - A field uses a reserved identifier (`pk`, `rowid`, ...)
/// - Two fields share a name or an external column
/// - The mapping declares neither a key nor `read_only`
/// - A key names a field the mapping does not declare
///
/// These errors are raised while the mapping is built, before any connection is opened.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}
