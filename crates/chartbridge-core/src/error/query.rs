use super::Error;

/// Error when a filter or ordering cannot be applied to a mapping.
#[derive(Debug)]
pub(super) struct QueryError {
    message: Box<str>,
}

impl std::error::Error for QueryError {}

impl core::fmt::Display for QueryError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "query error: {}", self.message)
    }
}

impl Error {
    /// Creates a query error.
    ///
    /// Used for unparseable filter text, filters naming unknown fields, and
    /// literals that do not fit the field's declared type.
    pub fn query(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Query(QueryError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a query error.
    pub fn is_query(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Query(_)))
    }
}
