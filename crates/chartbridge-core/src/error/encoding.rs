use super::Error;

/// Error when an encoding configuration cannot be applied to the data.
///
/// This occurs when:
/// - A channel references a column absent from the columnar table
/// - A time unit is unknown or set on a non-temporal channel
/// - A shorthand field definition is malformed
#[derive(Debug)]
pub(super) struct EncodingError {
    message: Box<str>,
}

impl std::error::Error for EncodingError {}

impl core::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "encoding error: {}", self.message)
    }
}

impl Error {
    /// Creates an encoding error.
    pub fn encoding(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Encoding(EncodingError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an encoding error.
    pub fn is_encoding(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Encoding(_)))
    }
}
