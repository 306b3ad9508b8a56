use super::Error;

/// Error when the columnar shaper cannot apply a transform.
#[derive(Debug)]
pub(super) struct TransformError {
    message: Box<str>,
}

impl std::error::Error for TransformError {}

impl core::fmt::Display for TransformError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "transform error: {}", self.message)
    }
}

impl Error {
    /// Creates a transform error.
    pub fn transform(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Transform(TransformError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a transform error.
    pub fn is_transform(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Transform(_)))
    }
}
