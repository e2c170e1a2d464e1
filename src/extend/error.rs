use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtendErrorCode {
    InvalidArgument,
    UnexpectedSpecificValue,
    DepthLimitExceeded,
}

impl ExtendErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtendErrorCode::InvalidArgument => "deep-extend/invalid-argument",
            ExtendErrorCode::UnexpectedSpecificValue => "deep-extend/unexpected-specific-value",
            ExtendErrorCode::DepthLimitExceeded => "deep-extend/depth-limit-exceeded",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExtendError {
    pub code: ExtendErrorCode,
    message: String,
}

impl ExtendError {
    pub fn new(code: ExtendErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ExtendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for ExtendError {}

pub type ExtendResult<T> = Result<T, ExtendError>;

pub fn invalid_argument(message: impl Into<String>) -> ExtendError {
    ExtendError::new(ExtendErrorCode::InvalidArgument, message)
}

/// Raised when a value classified as specific has no working clone function.
///
/// This means the registry and the value disagree about the concrete kind; it is never
/// caused by the shape of the merged data.
pub fn unexpected_specific_value(kind: &str) -> ExtendError {
    ExtendError::new(
        ExtendErrorCode::UnexpectedSpecificValue,
        format!("Unexpected situation: no clone constructor accepts specific value of kind `{kind}`"),
    )
}

pub fn depth_limit_exceeded(limit: usize) -> ExtendError {
    ExtendError::new(
        ExtendErrorCode::DepthLimitExceeded,
        format!("nesting depth exceeds the configured limit of {limit}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message_and_code() {
        let err = invalid_argument("bad flags");
        assert_eq!(err.to_string(), "bad flags (deep-extend/invalid-argument)");
    }

    #[test]
    fn unexpected_specific_value_names_the_kind() {
        let err = unexpected_specific_value("uint8array");
        assert_eq!(err.code, ExtendErrorCode::UnexpectedSpecificValue);
        assert!(err.message().contains("uint8array"));
    }
}
