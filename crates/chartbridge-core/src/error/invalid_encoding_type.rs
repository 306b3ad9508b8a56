use super::Error;

/// Error when a channel declares a visualization type outside the fixed set.
#[derive(Debug)]
pub(super) struct InvalidEncodingType {
    channel: Box<str>,
    ty: Box<str>,
}

impl std::error::Error for InvalidEncodingType {}

impl core::fmt::Display for InvalidEncodingType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid encoding type `{}` for channel `{}`; expected one of \
             quantitative, temporal, nominal, ordinal",
            self.ty, self.channel
        )
    }
}

impl Error {
    /// Creates an invalid encoding type error.
    pub fn invalid_encoding_type(channel: impl Into<String>, ty: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidEncodingType(InvalidEncodingType {
            channel: channel.into().into(),
            ty: ty.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid encoding type error.
    pub fn is_invalid_encoding_type(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidEncodingType(_)))
    }
}
